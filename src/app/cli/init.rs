//! Init command implementation.

use crate::app::api::{self, InitMode};
use crate::domain::AppError;

pub fn run_init(project_name: Option<&str>, force: bool, minimal: bool) -> Result<(), AppError> {
    let outcome = api::init(project_name, minimal, force)?;

    println!("✅ Initialized zen project '{}' ({} setup)", outcome.project_name, outcome.mode.label());
    for path in &outcome.skipped {
        println!("  kept existing {}", path.display());
    }

    println!();
    println!("Next steps:");
    if let Some(name) = project_name {
        println!("  cd {}", name);
    }
    println!("  zen add <component-url>");
    if outcome.mode == InitMode::Full {
        println!("  pip install -r requirements.txt");
    }
    Ok(())
}

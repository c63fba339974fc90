//! List, info and remove command implementations.

use crate::app::api::{self, InstalledComponent};
use crate::domain::AppError;

const HEADERS: [&str; 4] = ["NAME", "VERSION", "CATEGORY", "SOURCE"];

pub fn run_list() -> Result<(), AppError> {
    let components = api::list()?;
    if components.is_empty() {
        println!("No components installed.");
        return Ok(());
    }

    println!("Installed components ({}):", components.len());
    for line in render_table(&components) {
        println!("{}", line);
    }
    Ok(())
}

pub fn run_info(name: &str) -> Result<(), AppError> {
    let component = api::info(name)?;

    println!("📦 Component: {}", component.name);
    println!("Version: {}", component.version);
    println!("Category: {}", component.category);
    println!("Source: {}", component.source);
    if !component.dependencies.is_empty() {
        println!("Dependencies: {}", component.dependencies.join(", "));
    }
    Ok(())
}

pub fn run_remove(name: &str, force: bool) -> Result<(), AppError> {
    let removed = api::remove(name)?;

    if !force {
        println!("Note: only the record for '{}' was removed.", removed.name);
        println!("Installed files and dependencies were kept; remove them manually if needed.");
    }
    println!("✅ Removed component: {}", removed.name);
    Ok(())
}

fn render_table(components: &[InstalledComponent]) -> Vec<String> {
    let rows: Vec<[&str; 4]> = components
        .iter()
        .map(|c| [c.name.as_str(), c.version.as_str(), c.category.as_str(), c.source.as_str()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    std::iter::once(HEADERS)
        .chain(rows)
        .map(|row| {
            format!(
                "{:<w0$}  {:<w1$}  {:<w2$}  {}",
                row[0],
                row[1],
                row[2],
                row[3],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2]
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

//! Add command implementation.

use crate::adapters::ConsoleReporter;
use crate::app::api::{self, AddOptions, AddOutcome, InstallPreview, InstallResult};
use crate::domain::AppError;

pub fn run_add(options: AddOptions, verbose: bool) -> Result<(), AppError> {
    let reporter = ConsoleReporter::new(verbose);
    match api::add(&options, &reporter)? {
        AddOutcome::Previewed(preview) => print_preview(&preview),
        AddOutcome::Installed(result) => print_result(&result),
    }
    Ok(())
}

fn print_preview(preview: &InstallPreview) {
    let manifest = &preview.manifest;
    println!("🔍 Dry run: no changes were made");
    println!("Component: {}@{}", manifest.name, manifest.version);
    if !manifest.description.is_empty() {
        println!("Description: {}", manifest.description);
    }
    println!("Category: {} ({})", manifest.category, manifest.kind);
    for (label, value) in [
        ("Author", &manifest.author),
        ("License", &manifest.license),
        ("Homepage", &manifest.homepage),
        ("Python", &manifest.python_requires),
    ] {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    println!("Install path: {}", preview.install_path.display());

    println!("Planned changes:");
    for directory in &preview.plan.directories {
        println!("  mkdir {}", directory.display());
    }
    for step in &preview.plan.steps {
        println!("  {} {}", step.action.label(), step.path.display());
    }

    if !preview.new_dependencies.is_empty() {
        println!("Dependencies to add: {}", preview.new_dependencies.join(", "));
    }
    if !manifest.dev_dependencies.is_empty() {
        println!("Dev dependencies (not installed): {}", manifest.dev_dependencies.join(", "));
    }
    if !manifest.registry_dependencies.is_empty() {
        println!("Requires components: {}", manifest.registry_dependencies.join(", "));
    }
}

fn print_result(result: &InstallResult) {
    println!("✅ Installed {}@{}", result.component_name, result.version);
    println!("  Files installed: {}", result.files_installed);
    let overwritten = result.plan.overwrites();
    if overwritten > 0 {
        println!("  Files overwritten: {}", overwritten);
    }
    println!("  Dependencies added: {}", result.dependencies_added);
    println!("  Install path: {}", result.install_path.display());

    for collision in &result.constraint_collisions {
        println!(
            "⚠️  Kept conflicting constraints for {}: {} and {}",
            collision.package, collision.existing, collision.incoming
        );
    }
}

use std::path::Path;

use colored::Colorize;
use sc_core::validate_project;

pub fn run(file: &Path) -> Result<(), String> {
    let project = super::load_project(file)?;
    let issues = validate_project(&project);

    for issue in &issues {
        let level = if issue.is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        eprintln!("{level}: {}: {}", issue.location, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{errors} error(s), {warnings} warning(s) in {}",
            file.display()
        ));
    }

    let rules: usize = project.scenes.iter().map(|s| s.rules.len()).sum();
    let objects: usize = project.scenes.iter().map(|s| s.objects.len()).sum();
    println!("  All checks passed for '{}'.", project.name());
    println!(
        "  {} scenes, {objects} objects, {rules} rules, {warnings} warning(s)",
        project.scenes.len()
    );
    Ok(())
}

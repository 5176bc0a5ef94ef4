//! Interactive prompts for inputs missing from the command line.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

/// Ask for a project name. Empty input is rejected and re-prompted.
pub fn project_name() -> Result<String> {
    let name = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Project name")
        .validate_with(|input: &String| {
            if input.is_empty() {
                Err("Project name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read project name")?;

    Ok(name)
}

/// Ask the user to pick one of the available templates. Returns `None` when
/// the selection is cancelled, which callers treat as an abort rather than
/// an error.
pub fn choose_template(templates: &[String]) -> Result<Option<String>> {
    let labels: Vec<String> = templates.iter().map(|t| display_label(t)).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a template")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Failed to read template selection")?;

    Ok(selection.map(|index| templates[index].clone()))
}

/// Display label for a template identifier: hyphens become spaces and the
/// whole thing is upper-cased ("vanilla-ts" shows as "VANILLA TS").
fn display_label(template: &str) -> String {
    template.replace('-', " ").to_uppercase()
}

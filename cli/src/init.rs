use crate::error::{Result, ResultExt};
use crate::ui;
use dialoguer::{Confirm, theme::ColorfulTheme};
use feedback::config::ensure_data_file_exists;
use std::path::Path;

pub fn execute(data: String, force: bool) -> Result<()> {
    let path = Path::new(&data);
    if !ui::is_quiet() {
        ui::section_header("Feedback Data Setup");
    }

    if path.exists() && !force {
        ui::warning_message(&format!("{} already exists", path.display()));
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Overwrite it with the sample data?")
            .default(false)
            .interact()?;

        if !overwrite {
            ui::info_message("Keeping the existing data file");
            return Ok(());
        }
    }

    ui::status_message("Writing sample data file");
    ensure_data_file_exists(path, true)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ui::success_message(&format!("Created {}", path.display()));
    ui::info_message("Edit the [survey] table to change aspects, and add [[scopes.responses]] entries");
    Ok(())
}

//! Starter configuration command

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use console::style;

use odoo_scaffold::StarterKind;

/// Write a starter configuration file
pub struct InitCommand {
    kind: StarterKind,
    output_path: PathBuf,
}

impl InitCommand {
    /// Create a new command instance
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown template name or when the target file
    /// already exists and `force` is not set.
    pub fn new(template: &str, output_path: PathBuf, force: bool) -> Result<Self> {
        let kind = StarterKind::from_str(template)?;
        if output_path.exists() && !force {
            anyhow::bail!(
                "File '{}' already exists. Pass --force to overwrite it.",
                output_path.display()
            );
        }
        Ok(Self { kind, output_path })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn execute(&self) -> Result<()> {
        let path = odoo_scaffold::make_starter_config(self.kind, &self.output_path)?;

        println!(
            "{} {} {}",
            style("✓").green().bold(),
            style(format!("Created {} starter config:", self.kind)).bold(),
            style(path.display().to_string()).cyan()
        );
        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Edit the configuration:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("$EDITOR {}", path.display())).cyan()
        );
        println!();
        println!("  {} Generate the module:", style("2.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("odoo-scaffold generate {}", path.display())).cyan()
        );

        Ok(())
    }
}

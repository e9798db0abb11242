//! Configuration validation command

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use odoo_scaffold::ModuleGenerator;

/// Validate a configuration file and summarize its contents
pub struct ValidateCommand {
    config_path: PathBuf,
}

impl ValidateCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be loaded or the configuration
    /// is invalid.
    pub fn execute(&self) -> Result<()> {
        let config = odoo_scaffold::load_config(&self.config_path)?;
        let generator = ModuleGenerator::new();
        let (models, module) = generator.check(&config, "generated_module")?;

        println!(
            "{} {}",
            style("✓").green().bold(),
            style(format!("{} is valid", self.config_path.display())).bold()
        );
        println!();
        println!("{} {}", style("Module:").bold(), module.name);
        println!("{} {}", style("Version:").bold(), module.version);
        println!("{} {}", style("Depends:").bold(), module.depends.join(", "));
        println!();
        println!("{}", style("Models:").bold());
        for model in &models {
            println!(
                "  {} {} ({} fields, groups: {})",
                style("•").cyan(),
                model.name,
                model.fields.len(),
                model.security_groups.join(", ")
            );
        }

        Ok(())
    }
}

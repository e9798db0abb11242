//! Module generation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use odoo_scaffold::{naming, GenerateOptions, ModuleGenerator};

/// Generate an addon module from a configuration file
pub struct GenerateCommand {
    config_path: PathBuf,
    output_dir: PathBuf,
    module_name: Option<String>,
    interactive: bool,
    validate_only: bool,
}

impl GenerateCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(
        config_path: PathBuf,
        output_dir: PathBuf,
        module_name: Option<String>,
        interactive: bool,
        validate_only: bool,
    ) -> Self {
        Self {
            config_path,
            output_dir,
            module_name,
            interactive,
            validate_only,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be loaded, fails
    /// validation, or the module cannot be written.
    pub fn execute(&self) -> Result<()> {
        let config = odoo_scaffold::load_config(&self.config_path)?;
        let generator = ModuleGenerator::new();

        let fallback = self
            .module_name
            .clone()
            .unwrap_or_else(|| "generated_module".to_string());
        let (models, module) = generator.check(&config, &fallback)?;

        if self.validate_only {
            println!(
                "{} {}",
                style("✓").green().bold(),
                style(format!(
                    "{} is valid ({} model{})",
                    self.config_path.display(),
                    models.len(),
                    if models.len() == 1 { "" } else { "s" }
                ))
                .bold()
            );
            return Ok(());
        }

        let mut module_name = self
            .module_name
            .clone()
            .unwrap_or_else(|| naming::sanitize_module_name(&module.name));

        if self.interactive {
            println!("{}", style(format!("Module: {}", module.name)).bold());
            for model in &models {
                println!(
                    "  {} {} ({} fields)",
                    style("•").cyan(),
                    model.name,
                    model.fields.len()
                );
            }
            println!();

            module_name = Input::new()
                .with_prompt("Module directory name")
                .default(module_name)
                .interact_text()
                .context("Failed to read module name")?;

            let proceed = Confirm::new()
                .with_prompt(format!(
                    "Generate into {}?",
                    self.output_dir.join(&module_name).display()
                ))
                .default(true)
                .interact()
                .context("Failed to read confirmation")?;
            if !proceed {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        println!(
            "{} {} {}",
            style("Generating").green().bold(),
            style("Odoo module:").bold(),
            style(&module_name).cyan().bold()
        );
        println!();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Rendering module files...");

        let outcome = generator.generate(
            &config,
            &self.output_dir,
            &module_name,
            &GenerateOptions::default(),
        )?;

        spinner.finish_and_clear();

        if outcome.report.is_complete() {
            println!("{}", style("✓ Module generated successfully!").green().bold());
        } else {
            println!(
                "{}",
                style("⚠ Module generated with missing artifacts:").yellow().bold()
            );
            for path in outcome.report.missing() {
                println!("  {} {path}", style("missing").yellow());
            }
        }
        println!();
        print_next_steps(&outcome.path.display().to_string());

        Ok(())
    }
}

fn print_next_steps(module_path: &str) {
    println!("{}", style("Next steps:").bold());
    println!();
    println!("  {} Copy the module into your addons path:", style("1.").cyan());
    println!(
        "     {} {}",
        style("$").dim(),
        style(format!("cp -r {module_path} /path/to/odoo/addons/")).cyan()
    );
    println!();
    println!("  {} Update the apps list:", style("2.").cyan());
    println!(
        "     {} {}",
        style("$").dim(),
        style("odoo -u base -d your_database").cyan()
    );
    println!();
    println!("  {} Install the module from the Apps menu.", style("3.").cyan());
}

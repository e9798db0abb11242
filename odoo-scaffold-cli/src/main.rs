//! odoo-scaffold CLI tool

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{GenerateCommand, InitCommand, ListCommand, ListTopic, ValidateCommand};

#[derive(Parser)]
#[command(name = "odoo-scaffold")]
#[command(version)]
#[command(about = "Generate installable Odoo addon modules from declarative configs", long_about = None)]
struct Cli {
    /// Enable verbose tracing output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an addon module from a configuration file
    Generate {
        /// Configuration file (JSON or YAML)
        config: PathBuf,
        /// Directory the module is written into
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
        /// Override the module directory name
        #[arg(short, long)]
        module_name: Option<String>,
        /// Review the configuration interactively before generating
        #[arg(short, long)]
        interactive: bool,
        /// Validate the configuration without writing anything
        #[arg(long)]
        validate_only: bool,
    },
    /// Write a starter configuration file
    Init {
        /// Starter template (basic, crm, inventory, hr)
        #[arg(short, long, default_value = "basic")]
        template: String,
        /// Path of the configuration file to create
        #[arg(short, long, default_value = "./config.yaml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Validate a configuration file and summarize its contents
    Validate {
        /// Configuration file (JSON or YAML)
        config: PathBuf,
    },
    /// List available starter templates or field types
    List {
        /// What to list
        #[arg(value_enum, default_value = "templates")]
        topic: ListTopic,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .try_init()
            .ok();
    }

    match cli.command {
        Commands::Generate {
            config,
            output,
            module_name,
            interactive,
            validate_only,
        } => {
            let cmd = GenerateCommand::new(config, output, module_name, interactive, validate_only);
            cmd.execute()?;
        }
        Commands::Init {
            template,
            output,
            force,
        } => {
            let cmd = InitCommand::new(&template, output, force)?;
            cmd.execute()?;
        }
        Commands::Validate { config } => {
            let cmd = ValidateCommand::new(config);
            cmd.execute()?;
        }
        Commands::List { topic } => {
            ListCommand::new(topic).execute();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::parse_from([
            "odoo-scaffold",
            "generate",
            "config.yaml",
            "--output",
            "./addons",
            "--validate-only",
        ]);
        match cli.command {
            Commands::Generate {
                config,
                output,
                validate_only,
                ..
            } => {
                assert_eq!(config, PathBuf::from("config.yaml"));
                assert_eq!(output, PathBuf::from("./addons"));
                assert!(validate_only);
            }
            _ => panic!("expected generate subcommand"),
        }
    }
}

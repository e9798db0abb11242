//! Listing command for templates and field types

use clap::ValueEnum;
use console::style;

use odoo_scaffold::{FieldKind, StarterKind};

/// What the `list` subcommand prints
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListTopic {
    /// Available starter templates
    Templates,
    /// Supported field types
    Fields,
}

/// List available starter templates or field types
pub struct ListCommand {
    topic: ListTopic,
}

impl ListCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(topic: ListTopic) -> Self {
        Self { topic }
    }

    /// Execute the command
    pub fn execute(&self) {
        match self.topic {
            ListTopic::Templates => {
                println!("{}", style("Available starter templates:").bold());
                println!();
                for kind in StarterKind::ALL {
                    println!(
                        "  {} {}",
                        style(format!("{:<10}", kind.as_str())).cyan().bold(),
                        kind.description()
                    );
                }
            }
            ListTopic::Fields => {
                println!("{}", style("Supported field types:").bold());
                println!();
                for kind in FieldKind::ALL {
                    println!(
                        "  {} fields.{}",
                        style(format!("{:<10}", kind.as_str())).cyan().bold(),
                        kind.constructor()
                    );
                }
            }
        }
    }
}

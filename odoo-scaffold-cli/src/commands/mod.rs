//! CLI command implementations

pub mod generate;
pub mod init;
pub mod list;
pub mod validate;

pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use list::{ListCommand, ListTopic};
pub use validate::ValidateCommand;

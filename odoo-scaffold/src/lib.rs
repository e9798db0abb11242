//! # odoo-scaffold
//!
//! Generate complete, installable Odoo addon modules from declarative model
//! descriptions.
//!
//! Given a configuration document (JSON or YAML) describing models and their
//! typed fields, the generator deterministically renders every artifact an
//! addon needs: Python model sources, tree/form/search/kanban view XML,
//! menu and action XML, an access-rights CSV, the `__manifest__.py`, demo
//! records, documentation and static assets — with all cross-file
//! identifiers derived through a single naming module so references never
//! drift apart.
//!
//! ```no_run
//! use serde_json::json;
//! use odoo_scaffold::{GenerateOptions, ModuleGenerator};
//!
//! # fn main() -> odoo_scaffold::Result<()> {
//! let config = json!({
//!     "module": {"name": "Event Management"},
//!     "models": [{
//!         "name": "event.custom",
//!         "fields": [
//!             {"name": "name", "type": "char", "required": true},
//!             {"name": "status", "type": "selection",
//!              "selection": [["draft", "Draft"], ["done", "Done"]]}
//!         ]
//!     }]
//! });
//! let generator = ModuleGenerator::new();
//! let outcome = generator.generate(
//!     &config,
//!     std::path::Path::new("./output"),
//!     "event_management",
//!     &GenerateOptions::default(),
//! )?;
//! assert!(outcome.report.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod defaults;
pub mod error;
pub mod generator;
pub mod naming;
pub mod render;
pub mod spec;
pub mod templates;
pub mod validate;

pub use assemble::{CompletenessReport, GenerateOptions, ModuleAssembler};
pub use defaults::StarterKind;
pub use error::{Error, Result};
pub use generator::{load_config, make_starter_config, GenerationOutcome, ModuleGenerator};
pub use render::{GlobalNavConfig, MenuBuilder, ModelBuilder, NavConfig, ViewBuilder};
pub use spec::{DefaultValue, FieldKind, FieldSpec, ModelSpec, ModuleSpec};

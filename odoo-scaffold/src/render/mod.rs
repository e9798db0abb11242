//! Renderers for the per-model artifacts: Python source, view XML and
//! menu/action XML.

pub mod menu;
pub mod model;
pub mod views;

pub use menu::{GlobalNavConfig, MenuBuilder, NavConfig};
pub use model::ModelBuilder;
pub use views::ViewBuilder;

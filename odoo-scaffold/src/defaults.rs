//! Built-in defaults: the standard field template, baseline module metadata,
//! and the starter configuration catalog.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::error::Error;
use crate::spec::{DefaultValue, FieldKind, FieldSpec};

/// Baseline addon dependencies when the configuration declares none.
pub const DEFAULT_DEPENDS: [&str; 2] = ["base", "mail"];

/// Access group granted rights when a model declares none.
pub const DEFAULT_SECURITY_GROUP: &str = "base.group_user";

/// Default Odoo-style version string.
pub const DEFAULT_VERSION: &str = "17.0.1.0.0";

/// Default app-store category.
pub const DEFAULT_CATEGORY: &str = "Custom";

/// Default author line.
pub const DEFAULT_AUTHOR: &str = "Odoo Scaffold";

/// Default website URL.
pub const DEFAULT_WEBSITE: &str = "https://github.com";

/// Default license identifier.
pub const DEFAULT_LICENSE: &str = "LGPL-3";

/// Default menu ordering weight.
pub const DEFAULT_SEQUENCE: u32 = 100;

/// The fields appended to every model unless already declared or opted out.
///
/// Currently a single `active` boolean enabling the archive workflow.
#[must_use]
pub fn default_fields() -> Vec<FieldSpec> {
    let mut active = FieldSpec::new("active", FieldKind::Boolean);
    active.label = "Active".to_string();
    active.default = Some(DefaultValue::Literal(Value::Bool(true)));
    active.help = Some("Uncheck to archive this record".to_string());
    vec![active]
}

/// The available starter configuration templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterKind {
    /// A minimal single-model module.
    Basic,
    /// A CRM extension with a custom lead model.
    Crm,
    /// An inventory module with a product category model.
    Inventory,
    /// An HR module with an employee-skill model.
    Hr,
}

impl StarterKind {
    /// All starter kinds, in listing order.
    pub const ALL: [Self; 4] = [Self::Basic, Self::Crm, Self::Inventory, Self::Hr];

    /// The name accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Crm => "crm",
            Self::Inventory => "inventory",
            Self::Hr => "hr",
        }
    }

    /// One-line description for listings.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Basic => "Minimal module with one simple model",
            Self::Crm => "CRM extension with a custom lead model",
            Self::Inventory => "Inventory module with a product category model",
            Self::Hr => "HR module with an employee skill model",
        }
    }
}

impl fmt::Display for StarterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StarterKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "basic" => Ok(Self::Basic),
            "crm" => Ok(Self::Crm),
            "inventory" => Ok(Self::Inventory),
            "hr" => Ok(Self::Hr),
            other => Err(Error::config(format!(
                "unknown starter template `{other}` (available: basic, crm, inventory, hr)"
            ))),
        }
    }
}

/// The canned configuration document for a starter kind.
#[must_use]
pub fn starter_config(kind: StarterKind) -> Value {
    match kind {
        StarterKind::Basic => json!({
            "module": {
                "name": "My Custom Module",
                "version": DEFAULT_VERSION,
                "category": "Custom",
                "description": "Module generated with odoo-scaffold",
                "author": "My Company",
                "depends": ["base", "mail"]
            },
            "models": [{
                "name": "x_my_model",
                "description": "My Model",
                "fields": [
                    {"name": "name", "type": "char", "label": "Name",
                     "required": true, "size": 100},
                    {"name": "description", "type": "text", "label": "Description"},
                    {"name": "start_date", "type": "date", "label": "Start Date",
                     "default": "fields.Date.context_today"}
                ]
            }]
        }),
        StarterKind::Crm => json!({
            "module": {
                "name": "Custom CRM",
                "category": "Sales/CRM",
                "description": "CRM module with custom lead tracking",
                "depends": ["base", "mail", "crm"]
            },
            "models": [{
                "name": "crm.lead.custom",
                "description": "Custom Lead",
                "inherit": ["crm.lead"],
                "fields": [
                    {"name": "custom_source", "type": "selection",
                     "label": "Custom Source",
                     "selection": [
                         ["website", "Website"],
                         ["social", "Social Media"],
                         ["referral", "Referral"],
                         ["other", "Other"]
                     ]},
                    {"name": "follow_up_date", "type": "date", "label": "Follow-up Date"}
                ]
            }]
        }),
        StarterKind::Inventory => json!({
            "module": {
                "name": "Custom Inventory",
                "category": "Inventory/Inventory",
                "description": "Inventory module with custom product categories",
                "depends": ["base", "mail", "stock"]
            },
            "models": [{
                "name": "stock.custom.category",
                "description": "Custom Product Category",
                "fields": [
                    {"name": "name", "type": "char", "label": "Category Name",
                     "required": true},
                    {"name": "code", "type": "char", "label": "Code", "size": 20},
                    {"name": "description", "type": "text", "label": "Description"}
                ]
            }]
        }),
        StarterKind::Hr => json!({
            "module": {
                "name": "Custom HR",
                "category": "Human Resources",
                "description": "HR module with employee skill tracking",
                "depends": ["base", "mail", "hr"]
            },
            "models": [{
                "name": "hr.employee.skill",
                "description": "Employee Skill",
                "fields": [
                    {"name": "name", "type": "char", "label": "Skill Name",
                     "required": true},
                    {"name": "employee_id", "type": "many2one", "label": "Employee",
                     "comodel_name": "hr.employee", "required": true},
                    {"name": "level", "type": "selection", "label": "Level",
                     "selection": [
                         ["beginner", "Beginner"],
                         ["intermediate", "Intermediate"],
                         ["advanced", "Advanced"],
                         ["expert", "Expert"]
                     ]}
                ]
            }]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fields_carry_active() {
        let fields = default_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "active");
        assert_eq!(fields[0].kind, FieldKind::Boolean);
        assert_eq!(
            fields[0].default,
            Some(DefaultValue::Literal(Value::Bool(true)))
        );
    }

    #[test]
    fn starter_kind_round_trips() {
        for kind in StarterKind::ALL {
            assert_eq!(kind.as_str().parse::<StarterKind>().unwrap(), kind);
        }
        assert!("warehouse".parse::<StarterKind>().is_err());
    }

    #[test]
    fn starter_configs_are_parseable() {
        for kind in StarterKind::ALL {
            let config = starter_config(kind);
            let models = config["models"].as_array().unwrap();
            assert!(!models.is_empty());
            let parsed = crate::spec::parse_models(models).unwrap();
            assert!(parsed[0].has_active_field());
        }
    }
}

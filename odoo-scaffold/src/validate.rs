//! Validation of parsed model and module specifications.
//!
//! All checks run before any file is written and never mutate their input.
//! Failures are [`Error::Config`] with a message naming the offending model,
//! field or value.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::spec::{FieldKind, FieldSpec, ModelSpec, ModuleSpec};

/// PostgreSQL identifier limit, shared by model, field and table names.
const MAX_NAME_LEN: usize = 63;

/// Names a field may not use: Python keywords plus Odoo magic columns.
pub const RESERVED_FIELD_NAMES: &[&str] = &[
    // Python keywords
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in",
    "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
    // Odoo magic columns
    "id", "create_date", "create_uid", "write_date", "write_uid",
    "__last_update", "display_name",
];

/// Whether a dotted model name is legal: lowercase start, letters, digits,
/// dots and underscores, alphanumeric end.
#[must_use]
pub fn is_valid_model_name(name: &str) -> bool {
    if name.len() > MAX_NAME_LEN {
        return false;
    }
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_lowercase() {
        return false;
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
    {
        return false;
    }
    name.chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Whether a field name is legal: lowercase start, then lowercase letters,
/// digits or underscores.
#[must_use]
pub fn is_valid_field_name(name: &str) -> bool {
    if name.len() > MAX_NAME_LEN {
        return false;
    }
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase()
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Whether a table name override is legal; same shape as a field name.
#[must_use]
pub fn is_valid_table_name(name: &str) -> bool {
    is_valid_field_name(name)
}

/// Validate a full module description.
///
/// # Errors
///
/// Returns [`Error::Config`] on: an empty module name, no models, duplicate
/// model names, name pattern violations, reserved or duplicate field names,
/// models with zero fields, char sizes outside `1..=65535`, empty or
/// malformed selection lists, and relational fields without a target model.
///
/// Cross-model target resolution is deliberately not enforced; a target that
/// is neither declared in this module nor a standard platform model only
/// produces a warning log.
pub fn validate(models: &[ModelSpec], module: &ModuleSpec) -> Result<()> {
    if module.name.trim().is_empty() {
        return Err(Error::config("module name must not be empty"));
    }
    if models.is_empty() {
        return Err(Error::config("at least one model is required"));
    }

    let mut seen = BTreeSet::new();
    for model in models {
        if !seen.insert(model.name.as_str()) {
            return Err(Error::config(format!(
                "duplicate model name `{}`",
                model.name
            )));
        }
        validate_model(model)?;
    }

    warn_external_references(models);
    Ok(())
}

fn validate_model(model: &ModelSpec) -> Result<()> {
    if !is_valid_model_name(&model.name) {
        return Err(Error::config(format!(
            "invalid model name `{}`: must start with a lowercase letter and \
             contain only lowercase letters, digits, dots and underscores \
             (max {MAX_NAME_LEN} chars)",
            model.name
        )));
    }
    if model.fields.is_empty() {
        return Err(Error::config(format!(
            "model `{}` must declare at least one field",
            model.name
        )));
    }
    if let Some(table) = &model.table_name {
        if !is_valid_table_name(table) {
            return Err(Error::config(format!(
                "invalid table name `{table}` on model `{}`",
                model.name
            )));
        }
    }
    for parent in &model.inherit {
        if !is_valid_model_name(parent) {
            return Err(Error::config(format!(
                "invalid inherited model name `{parent}` on model `{}`",
                model.name
            )));
        }
    }

    let mut seen = BTreeSet::new();
    for field in &model.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(Error::config(format!(
                "duplicate field `{}` on model `{}`",
                field.name, model.name
            )));
        }
        validate_field(&model.name, field)?;
    }
    Ok(())
}

fn validate_field(model_name: &str, field: &FieldSpec) -> Result<()> {
    if !is_valid_field_name(&field.name) {
        return Err(Error::config(format!(
            "invalid field name `{}` on model `{model_name}`: must start with \
             a lowercase letter and contain only lowercase letters, digits \
             and underscores (max {MAX_NAME_LEN} chars)",
            field.name
        )));
    }
    if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
        return Err(Error::config(format!(
            "field name `{}` on model `{model_name}` is reserved",
            field.name
        )));
    }

    match field.kind {
        FieldKind::Char => {
            let size = field
                .extra
                .get("size")
                .map_or(Some(255), serde_json::Value::as_u64);
            match size {
                Some(s) if (1..=65535).contains(&s) => {}
                _ => {
                    return Err(Error::config(format!(
                        "invalid size for char field `{}` on model `{model_name}`: \
                         must be an integer between 1 and 65535",
                        field.name
                    )))
                }
            }
        }
        FieldKind::Selection => {
            let choices = field.choices().ok_or_else(|| {
                Error::config(format!(
                    "selection field `{}` on model `{model_name}` must declare \
                     a `selection` list of (value, label) pairs",
                    field.name
                ))
            })?;
            if choices.is_empty() {
                return Err(Error::config(format!(
                    "selection field `{}` on model `{model_name}` has an empty \
                     choice list",
                    field.name
                )));
            }
            let mut values = BTreeSet::new();
            for (value, _) in &choices {
                if !values.insert(value.as_str()) {
                    return Err(Error::config(format!(
                        "selection field `{}` on model `{model_name}` has a \
                         duplicate choice value `{value}`",
                        field.name
                    )));
                }
            }
        }
        FieldKind::Many2one | FieldKind::One2many | FieldKind::Many2many => {
            let comodel = field.comodel().ok_or_else(|| {
                Error::config(format!(
                    "relational field `{}` on model `{model_name}` requires a \
                     `comodel_name`",
                    field.name
                ))
            })?;
            if !is_valid_model_name(comodel) {
                return Err(Error::config(format!(
                    "invalid comodel name `{comodel}` on field `{}` of model \
                     `{model_name}`",
                    field.name
                )));
            }
            if field.kind == FieldKind::One2many {
                if let Some(inverse) = field.inverse_name() {
                    if !is_valid_field_name(inverse) {
                        return Err(Error::config(format!(
                            "invalid inverse_name `{inverse}` on field `{}` of \
                             model `{model_name}`",
                            field.name
                        )));
                    }
                }
            }
        }
        FieldKind::Text
        | FieldKind::Integer
        | FieldKind::Float
        | FieldKind::Boolean
        | FieldKind::Date
        | FieldKind::Datetime
        | FieldKind::Binary
        | FieldKind::Html
        | FieldKind::Monetary => {}
    }
    Ok(())
}

/// Log a warning for relational targets that resolve neither to a declared
/// model nor to a standard platform model. Unresolved targets are accepted:
/// they may live in another installed addon.
fn warn_external_references(models: &[ModelSpec]) {
    let declared: BTreeSet<&str> = models.iter().map(|m| m.name.as_str()).collect();
    for model in models {
        for field in &model.fields {
            if !field.kind.is_relational() {
                continue;
            }
            if let Some(comodel) = field.comodel() {
                if !declared.contains(comodel)
                    && !comodel.starts_with("res.")
                    && !comodel.starts_with("ir.")
                {
                    tracing::warn!(
                        model = %model.name,
                        field = %field.name,
                        target = %comodel,
                        "relational field targets a model outside this module"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{parse_models, parse_module};
    use serde_json::json;

    fn module() -> ModuleSpec {
        parse_module(None, "test_module").unwrap()
    }

    fn model_with_field(field: serde_json::Value) -> Vec<ModelSpec> {
        parse_models(&[json!({"name": "event.custom", "fields": [field]})]).unwrap()
    }

    #[test]
    fn accepts_well_formed_input() {
        let models = model_with_field(json!({
            "name": "name", "type": "char", "required": true, "size": 200
        }));
        assert!(validate(&models, &module()).is_ok());
    }

    #[test]
    fn name_patterns() {
        assert!(is_valid_model_name("event.custom"));
        assert!(is_valid_model_name("x_my_model"));
        assert!(!is_valid_model_name("Event.Custom"));
        assert!(!is_valid_model_name("event."));
        assert!(!is_valid_model_name(""));

        assert!(is_valid_field_name("partner_id"));
        assert!(!is_valid_field_name("2bad"));
        assert!(!is_valid_field_name("Bad-Name"));
        assert!(!is_valid_field_name("_private"));
    }

    #[test]
    fn rejects_reserved_field_names() {
        let models = model_with_field(json!({"name": "class", "type": "char"}));
        let err = validate(&models, &module()).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn rejects_duplicate_model_names() {
        let models = parse_models(&[
            json!({"name": "a.b", "fields": [{"name": "name", "type": "char"}]}),
            json!({"name": "a.b", "fields": [{"name": "name", "type": "char"}]}),
        ])
        .unwrap();
        let err = validate(&models, &module()).unwrap_err();
        assert!(err.to_string().contains("duplicate model name"));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let models = parse_models(&[json!({"name": "a.b", "fields": [
            {"name": "name", "type": "char"},
            {"name": "name", "type": "text"}
        ]})])
        .unwrap();
        let err = validate(&models, &module()).unwrap_err();
        assert!(err.to_string().contains("duplicate field"));
    }

    #[test]
    fn rejects_empty_selection() {
        let models = model_with_field(json!({
            "name": "status", "type": "selection", "selection": []
        }));
        let err = validate(&models, &module()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("status"));
        assert!(message.contains("event.custom"));
    }

    #[test]
    fn rejects_malformed_selection_entries() {
        let models = model_with_field(json!({
            "name": "status", "type": "selection",
            "selection": [["draft", "Draft", "extra"]]
        }));
        assert!(validate(&models, &module()).is_err());
    }

    #[test]
    fn rejects_duplicate_selection_values() {
        let models = model_with_field(json!({
            "name": "status", "type": "selection",
            "selection": [["draft", "Draft"], ["draft", "Also Draft"]]
        }));
        let err = validate(&models, &module()).unwrap_err();
        assert!(err.to_string().contains("duplicate choice value"));
    }

    #[test]
    fn rejects_relational_without_comodel() {
        let models = model_with_field(json!({"name": "partner_id", "type": "many2one"}));
        let err = validate(&models, &module()).unwrap_err();
        assert!(err.to_string().contains("comodel_name"));
    }

    #[test]
    fn rejects_char_size_out_of_range() {
        let models = model_with_field(json!({
            "name": "code", "type": "char", "size": 0
        }));
        assert!(validate(&models, &module()).is_err());

        let models = model_with_field(json!({
            "name": "code", "type": "char", "size": 70000
        }));
        assert!(validate(&models, &module()).is_err());
    }

    #[test]
    fn accepts_unresolved_external_comodel() {
        let models = model_with_field(json!({
            "name": "project_id", "type": "many2one",
            "comodel_name": "project.project"
        }));
        assert!(validate(&models, &module()).is_ok());
    }
}

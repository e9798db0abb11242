//! Python model source renderer.

use serde_json::json;

use crate::error::{Error, Result};
use crate::spec::{python_escape, python_literal, FieldKind, FieldSpec, ModelSpec};
use crate::templates::{Templates, MODEL_PY};

/// Renders one Python source file per model.
pub struct ModelBuilder {
    templates: Templates,
}

impl ModelBuilder {
    /// Create a builder with the default template set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: Templates::new(),
        }
    }

    /// Render the complete Python source for one model.
    ///
    /// Output is byte-identical for identical input: field order follows the
    /// declaration order, pass-through attributes render in sorted order and
    /// no timestamps are embedded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a field is missing a kind-specific
    /// attribute the validator should have caught, or [`Error::Template`] on
    /// a malformed built-in template.
    pub fn render(&self, model: &ModelSpec) -> Result<String> {
        let rec_name = model.record_name_field().map(|f| f.name.clone());
        let order = rec_name.clone().unwrap_or_else(|| "id desc".to_string());

        let mut field_block = String::new();
        for field in &model.fields {
            field_block.push_str("    ");
            field_block.push_str(&field_definition(&model.name, field)?);
            field_block.push('\n');
        }
        for field in &model.fields {
            if field.kind == FieldKind::One2many {
                field_block.push_str(&count_field(field));
            }
        }
        field_block.push('\n');

        let compute_block: String = model
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::One2many)
            .map(compute_method)
            .collect();

        let constraint_block = constraint_listing(model);

        let display_expression = rec_name.as_ref().map_or_else(
            || "f\"#{record.id}\"".to_string(),
            |name| format!("record.{name} or f\"#{{record.id}}\""),
        );

        let inherit_line = if model.inherit.is_empty() {
            String::new()
        } else {
            let entries: Vec<String> = model
                .inherit
                .iter()
                .map(|m| format!("'{}'", python_escape(m)))
                .collect();
            format!("    _inherit = [{}]\n", entries.join(", "))
        };

        let context = json!({
            "class_name": model.class_name(),
            "model_name": model.name,
            "description": python_escape(&model.description),
            "table_line": model.table_name.as_ref().map_or_else(String::new, |t| {
                format!("    _table = '{t}'\n")
            }),
            "inherit_line": inherit_line,
            "order": order,
            "rec_name_line": rec_name.as_ref().map_or_else(String::new, |name| {
                format!("    _rec_name = '{name}'\n")
            }),
            "field_block": field_block,
            "compute_block": compute_block,
            "constraint_block": constraint_block,
            "display_expression": display_expression,
            "active_block": if model.has_active_field() {
                ACTIVE_METHODS
            } else {
                ""
            },
        });
        self.templates.render(MODEL_PY, &context)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const ACTIVE_METHODS: &str = r"
    def toggle_active(self):
        for record in self:
            record.active = not record.active
        return True

    def archive(self):
        return self.write({'active': False})

    def unarchive(self):
        return self.write({'active': True})
";

/// Render one `name = fields.Kind(...)` line.
///
/// Attribute order is canonical: string, required, readonly, help, default,
/// kind-specific attributes, then pass-through attributes in sorted order.
///
/// # Errors
///
/// Returns [`Error::Config`] when a selection field has no usable choice
/// list or a relational field has no target model.
pub fn field_definition(model_name: &str, field: &FieldSpec) -> Result<String> {
    let mut attrs = vec![format!("string='{}'", python_escape(&field.label))];
    if field.required {
        attrs.push("required=True".to_string());
    }
    if field.readonly {
        attrs.push("readonly=True".to_string());
    }
    if let Some(help) = &field.help {
        attrs.push(format!("help='{}'", python_escape(help)));
    }
    if let Some(default) = &field.default {
        attrs.push(format!("default={}", default.as_python()));
    }

    match field.kind {
        FieldKind::Char => attrs.push(format!("size={}", field.size())),
        FieldKind::Selection => {
            let choices = field.choices().ok_or_else(|| missing(model_name, field, "selection"))?;
            if choices.is_empty() {
                return Err(missing(model_name, field, "selection"));
            }
            let entries: Vec<String> = choices
                .iter()
                .map(|(value, label)| {
                    format!("('{}', '{}')", python_escape(value), python_escape(label))
                })
                .collect();
            attrs.push(format!("selection=[{}]", entries.join(", ")));
        }
        FieldKind::Many2one | FieldKind::One2many | FieldKind::Many2many => {
            let comodel = field
                .comodel()
                .ok_or_else(|| missing(model_name, field, "comodel_name"))?;
            attrs.push(format!("comodel_name='{comodel}'"));
            if field.kind == FieldKind::One2many {
                if let Some(inverse) = field.inverse_name() {
                    attrs.push(format!("inverse_name='{inverse}'"));
                }
            }
            if field.kind == FieldKind::Many2many {
                if let Some(relation) = field.relation() {
                    attrs.push(format!("relation='{relation}'"));
                }
                if let Some(column1) = field.column1() {
                    attrs.push(format!("column1='{column1}'"));
                }
                if let Some(column2) = field.column2() {
                    attrs.push(format!("column2='{column2}'"));
                }
            }
        }
        FieldKind::Monetary => {
            attrs.push(format!("currency_field='{}'", field.currency_field()));
        }
        FieldKind::Text
        | FieldKind::Integer
        | FieldKind::Float
        | FieldKind::Boolean
        | FieldKind::Date
        | FieldKind::Datetime
        | FieldKind::Binary
        | FieldKind::Html => {}
    }

    for (key, value) in field.passthrough() {
        attrs.push(format!("{key}={}", python_literal(value)));
    }

    Ok(format!(
        "{} = fields.{}({})",
        field.name,
        field.kind.constructor(),
        attrs.join(", ")
    ))
}

fn missing(model_name: &str, field: &FieldSpec, attribute: &str) -> Error {
    Error::config(format!(
        "field `{}` on model `{model_name}` is missing `{attribute}`",
        field.name
    ))
}

fn count_field(field: &FieldSpec) -> String {
    format!(
        "    {name}_count = fields.Integer(string='{label} Count', compute='_compute_{name}_count')\n",
        name = field.name,
        label = python_escape(&field.label),
    )
}

fn compute_method(field: &FieldSpec) -> String {
    format!(
        "    @api.depends('{name}')\n    def _compute_{name}_count(self):\n        for record in self:\n            record.{name}_count = len(record.{name})\n\n",
        name = field.name,
    )
}

fn constraint_listing(model: &ModelSpec) -> String {
    let entries: Vec<String> = model
        .fields
        .iter()
        .filter(|f| f.is_unique())
        .map(|f| {
            format!(
                "        ('{name}_unique', 'UNIQUE({name})', 'The field {label} must be unique.'),",
                name = f.name,
                label = python_escape(&f.label),
            )
        })
        .collect();
    if entries.is_empty() {
        String::new()
    } else {
        format!("    _sql_constraints = [\n{}\n    ]\n\n", entries.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_models;
    use serde_json::json;

    fn event_model() -> ModelSpec {
        parse_models(&[json!({
            "name": "event.custom",
            "fields": [
                {"name": "name", "type": "char", "required": true, "size": 200},
                {"name": "status", "type": "selection", "default": "draft",
                 "selection": [["draft", "Draft"], ["open", "Open"], ["done", "Done"]]},
                {"name": "attendee_ids", "type": "one2many",
                 "comodel_name": "event.attendee", "inverse_name": "event_id"}
            ]
        })])
        .unwrap()
        .remove(0)
    }

    #[test]
    fn field_definition_canonical_order() {
        let model = event_model();
        let def = field_definition(&model.name, model.field("name").unwrap()).unwrap();
        assert_eq!(
            def,
            "name = fields.Char(string='Name', required=True, size=200)"
        );
    }

    #[test]
    fn field_definition_selection_literal() {
        let model = event_model();
        let def = field_definition(&model.name, model.field("status").unwrap()).unwrap();
        assert_eq!(
            def,
            "status = fields.Selection(string='Status', default='draft', \
             selection=[('draft', 'Draft'), ('open', 'Open'), ('done', 'Done')])"
        );
    }

    #[test]
    fn field_definition_passthrough_sorted() {
        let models = parse_models(&[json!({
            "name": "a.b",
            "fields": [{"name": "code", "type": "char",
                "tracking": true, "index": true}]
        })])
        .unwrap();
        let def = field_definition("a.b", models[0].field("code").unwrap()).unwrap();
        assert_eq!(
            def,
            "code = fields.Char(string='Code', size=255, index=True, tracking=True)"
        );
    }

    #[test]
    fn field_definition_rejects_missing_comodel() {
        let mut field = FieldSpec::new("partner_id", FieldKind::Many2one);
        field.label = "Partner".to_string();
        let err = field_definition("a.b", &field).unwrap_err();
        assert!(err.to_string().contains("comodel_name"));
    }

    #[test]
    fn render_contains_class_and_lifecycle() {
        let source = ModelBuilder::new().render(&event_model()).unwrap();
        assert!(source.contains("class EventCustom(models.Model):"));
        assert!(source.contains("_name = 'event.custom'"));
        assert!(source.contains("_order = 'name'"));
        assert!(source.contains("_rec_name = 'name'"));
        assert!(source.contains("def create(self, vals):"));
        assert!(source.contains("def toggle_active(self):"));
        assert!(source.contains("attendee_ids_count = fields.Integer"));
        assert!(source.contains("@api.depends('attendee_ids')"));
    }

    #[test]
    fn render_counts_declared_plus_active() {
        let source = ModelBuilder::new().render(&event_model()).unwrap();
        let declarations = source.matches(" = fields.").count();
        // 3 declared + auto active + one2many count aggregate
        assert_eq!(declarations, 5);
    }

    #[test]
    fn render_without_active_skips_toggle() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "add_default_fields": false,
            "fields": [{"name": "total", "type": "integer"}]
        })])
        .unwrap()
        .remove(0);
        let source = ModelBuilder::new().render(&model).unwrap();
        assert!(!source.contains("toggle_active"));
        assert!(source.contains("_order = 'id desc'"));
        assert!(source.contains("name = f\"#{record.id}\""));
    }

    #[test]
    fn order_uses_first_char_field_in_declaration_order() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "fields": [
                {"name": "code", "type": "char"},
                {"name": "name", "type": "char"}
            ]
        })])
        .unwrap()
        .remove(0);
        let source = ModelBuilder::new().render(&model).unwrap();
        assert!(source.contains("_order = 'code'"));
        assert!(source.contains("_rec_name = 'code'"));
    }

    #[test]
    fn render_is_deterministic() {
        let builder = ModelBuilder::new();
        let model = event_model();
        assert_eq!(builder.render(&model).unwrap(), builder.render(&model).unwrap());
    }

    #[test]
    fn render_unique_constraint() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "fields": [{"name": "code", "type": "char", "unique": true}]
        })])
        .unwrap()
        .remove(0);
        let source = ModelBuilder::new().render(&model).unwrap();
        assert!(source.contains("_sql_constraints"));
        assert!(source.contains("('code_unique', 'UNIQUE(code)'"));
    }
}

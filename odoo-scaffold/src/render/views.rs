//! View XML renderer: tree, form, search and kanban views for one model.

use serde_json::json;

use crate::error::Result;
use crate::spec::{FieldKind, FieldSpec, ModelSpec};
use crate::templates::{xml_escape, Templates, DATA_XML};

/// Maximum number of columns in the generated tree view.
const TREE_FIELD_CAP: usize = 8;

/// Maximum number of body fields on a kanban card.
const KANBAN_BODY_CAP: usize = 3;

/// Renders the view XML document for one model.
pub struct ViewBuilder {
    templates: Templates,
}

impl ViewBuilder {
    /// Create a builder with the default template set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: Templates::new(),
        }
    }

    /// Render tree, form, search and kanban views as one XML document.
    ///
    /// The kanban view is always present even when the action's view mode
    /// does not reference it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Template`] on a malformed built-in template.
    pub fn render_all(&self, model: &ModelSpec) -> Result<String> {
        let body = format!(
            "{}{}{}{}",
            render_tree(model),
            render_form(model),
            render_search(model),
            render_kanban(model)
        );
        self.templates.render(DATA_XML, &json!({ "body": body }))
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the tree view record.
///
/// Selects up to eight fields in declaration order, skipping Text/Html and
/// One2many kinds, and mutes archived rows when an `active` field exists.
#[must_use]
pub fn render_tree(model: &ModelSpec) -> String {
    let suffix = model.table_suffix();
    let description = xml_escape(&model.description);
    let decoration = if model.has_active_field() {
        " decoration-muted=\"not active\""
    } else {
        ""
    };

    let mut out = format!(
        r#"        <record id="view_{suffix}_tree" model="ir.ui.view">
            <field name="name">{description} - List</field>
            <field name="model">{model_name}</field>
            <field name="arch" type="xml">
                <tree string="{description}"{decoration}>
"#,
        model_name = model.name,
    );
    for field in model
        .fields
        .iter()
        .filter(|f| !matches!(f.kind, FieldKind::Text | FieldKind::Html | FieldKind::One2many))
        .take(TREE_FIELD_CAP)
    {
        out.push_str(&format!(
            "                    <field name=\"{}\"{}/>\n",
            field.name,
            field_attrs(field, ViewContext::Tree)
        ));
    }
    out.push_str(
        "                </tree>
            </field>
        </record>
",
    );
    out
}

/// Render the form view record.
///
/// Basic fields go in the main group; detail and relational fields go in
/// notebook pages that are only emitted when non-empty. The first
/// `name`/`title` field is hoisted to the headline, a Binary field with
/// `image` in its name becomes the avatar, and each One2many gets a stat
/// button bound to its count aggregate.
#[must_use]
pub fn render_form(model: &ModelSpec) -> String {
    let suffix = model.table_suffix();
    let description = xml_escape(&model.description);

    let title_field = model
        .fields
        .iter()
        .find(|f| f.name == "name" || f.name == "title");
    let image_field = model
        .fields
        .iter()
        .find(|f| f.kind == FieldKind::Binary && f.name.contains("image"));

    let mut basic = Vec::new();
    let mut detail = Vec::new();
    let mut relational = Vec::new();
    for field in &model.fields {
        if title_field.is_some_and(|t| t.name == field.name)
            || image_field.is_some_and(|i| i.name == field.name)
            || field.name == "active"
        {
            continue;
        }
        match field.kind {
            FieldKind::Char
            | FieldKind::Integer
            | FieldKind::Float
            | FieldKind::Boolean
            | FieldKind::Selection => basic.push(field),
            FieldKind::Text
            | FieldKind::Html
            | FieldKind::Date
            | FieldKind::Datetime
            | FieldKind::Monetary
            | FieldKind::Binary => detail.push(field),
            FieldKind::Many2one | FieldKind::One2many | FieldKind::Many2many => {
                relational.push(field);
            }
        }
    }

    let mut out = format!(
        r#"        <record id="view_{suffix}_form" model="ir.ui.view">
            <field name="name">{description} - Form</field>
            <field name="model">{model_name}</field>
            <field name="arch" type="xml">
                <form string="{description}">
                    <header>
"#,
        model_name = model.name,
    );
    if model.has_active_field() {
        out.push_str("                        <button name=\"toggle_active\" type=\"object\" string=\"Toggle Active\" class=\"btn-secondary\"/>\n");
    }
    out.push_str(
        "                    </header>
                    <sheet>
                        <div class=\"oe_button_box\" name=\"button_box\">
",
    );
    for field in model.fields.iter().filter(|f| f.kind == FieldKind::One2many) {
        out.push_str(&format!(
            r#"                            <button class="oe_stat_button" type="object" name="action_view_{name}" icon="fa-list-ul">
                                <field string="{label}" name="{name}_count" widget="statinfo"/>
                            </button>
"#,
            name = field.name,
            label = xml_escape(&field.label),
        ));
    }
    out.push_str("                        </div>\n");
    if let Some(image) = image_field {
        out.push_str(&format!(
            "                        <field name=\"{name}\" widget=\"image\" class=\"oe_avatar\" options=\"{{'preview_image': '{name}', 'size': [90, 90]}}\"/>\n",
            name = image.name,
        ));
    }
    out.push_str("                        <div class=\"oe_title\">\n");
    if let Some(title) = title_field {
        out.push_str(&format!(
            r#"                            <h1>
                                <field name="{}" placeholder="{}"/>
                            </h1>
"#,
            title.name,
            xml_escape(&title.label),
        ));
    }
    out.push_str("                        </div>\n");
    if !basic.is_empty() {
        out.push_str(
            "                        <group>
                            <group string=\"General Information\">
",
        );
        for field in &basic {
            out.push_str(&format!(
                "                                <field name=\"{}\"{}/>\n",
                field.name,
                field_attrs(field, ViewContext::Form)
            ));
        }
        out.push_str(
            "                            </group>
                        </group>
",
        );
    }
    if !detail.is_empty() || !relational.is_empty() {
        out.push_str("                        <notebook>\n");
        for (title, fields) in [("Details", &detail), ("Relations", &relational)] {
            if fields.is_empty() {
                continue;
            }
            out.push_str(&format!(
                "                            <page string=\"{title}\">
                                <group>
"
            ));
            for field in fields.iter().copied() {
                out.push_str(&format!(
                    "                                    <field name=\"{}\"{}/>\n",
                    field.name,
                    field_attrs(field, ViewContext::Form)
                ));
            }
            out.push_str(
                "                                </group>
                            </page>
",
            );
        }
        out.push_str("                        </notebook>\n");
    }
    out.push_str(
        "                    </sheet>
                </form>
            </field>
        </record>
",
    );
    out
}

/// Render the search view record.
///
/// Char/Text/Selection/Many2one fields are searchable; Active/Inactive
/// filters appear when an `active` field exists; grouping prefers the first
/// Selection or Many2one field and falls back to the creation date.
#[must_use]
pub fn render_search(model: &ModelSpec) -> String {
    let suffix = model.table_suffix();
    let description = xml_escape(&model.description);

    let mut out = format!(
        r#"        <record id="view_{suffix}_search" model="ir.ui.view">
            <field name="name">{description} - Search</field>
            <field name="model">{model_name}</field>
            <field name="arch" type="xml">
                <search string="Search {description}">
"#,
        model_name = model.name,
    );
    for field in model.fields.iter().filter(|f| {
        matches!(
            f.kind,
            FieldKind::Char | FieldKind::Text | FieldKind::Selection | FieldKind::Many2one
        )
    }) {
        out.push_str(&format!(
            "                    <field name=\"{}\"/>\n",
            field.name
        ));
    }
    out.push_str("                    <separator/>\n");
    if model.has_active_field() {
        out.push_str(
            r#"                    <filter string="Active" name="active" domain="[('active', '=', True)]"/>
                    <filter string="Inactive" name="inactive" domain="[('active', '=', False)]"/>
"#,
        );
    }
    out.push_str("                    <separator/>\n");
    let (group_by, group_by_label) = model
        .fields
        .iter()
        .find(|f| matches!(f.kind, FieldKind::Selection | FieldKind::Many2one))
        .map_or_else(
            || ("create_date".to_string(), "Creation Date".to_string()),
            |f| (f.name.clone(), f.label.clone()),
        );
    out.push_str(&format!(
        "                    <filter string=\"Group by {label}\" name=\"group_by_{group_by}\" context=\"{{'group_by': '{group_by}'}}\"/>\n",
        label = xml_escape(&group_by_label),
    ));
    out.push_str(
        "                </search>
            </field>
        </record>
",
    );
    out
}

/// Render the kanban view record.
///
/// The card title is the record display-name field (falling back to the row
/// id); up to three further non-Text/Html fields fill the card body.
#[must_use]
pub fn render_kanban(model: &ModelSpec) -> String {
    let suffix = model.table_suffix();
    let description = xml_escape(&model.description);
    let title_field = model
        .record_name_field()
        .map_or_else(|| "id".to_string(), |f| f.name.clone());

    let mut out = format!(
        r#"        <record id="view_{suffix}_kanban" model="ir.ui.view">
            <field name="name">{description} - Kanban</field>
            <field name="model">{model_name}</field>
            <field name="arch" type="xml">
                <kanban>
                    <templates>
                        <t t-name="kanban-box">
                            <div class="oe_kanban_card oe_kanban_global_click">
                                <div class="oe_kanban_content">
                                    <strong class="o_kanban_record_title">
                                        <field name="{title_field}"/>
                                    </strong>
"#,
        model_name = model.name,
    );
    for field in model
        .fields
        .iter()
        .filter(|f| f.name != title_field && !matches!(f.kind, FieldKind::Text | FieldKind::Html))
        .take(KANBAN_BODY_CAP)
    {
        out.push_str(&format!(
            r#"                                    <div class="o_kanban_record_body">
                                        <field name="{}"/>
                                    </div>
"#,
            field.name
        ));
    }
    out.push_str(
        "                                </div>
                            </div>
                        </t>
                    </templates>
                </kanban>
            </field>
        </record>
",
    );
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewContext {
    Tree,
    Form,
}

/// XML attributes for a field tag, kind- and context-driven; includes the
/// leading space when non-empty.
fn field_attrs(field: &FieldSpec, context: ViewContext) -> String {
    let mut attrs = Vec::new();
    if field.required && context == ViewContext::Form {
        attrs.push("required=\"1\"".to_string());
    }
    if field.readonly {
        attrs.push("readonly=\"1\"".to_string());
    }
    match field.kind {
        FieldKind::Html => attrs.push("widget=\"html\"".to_string()),
        FieldKind::Monetary => attrs.push("widget=\"monetary\"".to_string()),
        FieldKind::Binary => {
            if field.name.contains("image") {
                attrs.push("widget=\"image\"".to_string());
            } else {
                attrs.push("widget=\"binary\"".to_string());
            }
        }
        FieldKind::Boolean if context == ViewContext::Tree => {
            attrs.push("widget=\"boolean_toggle\"".to_string());
        }
        FieldKind::Many2many if context == ViewContext::Form => {
            attrs.push("widget=\"many2many_tags\"".to_string());
        }
        _ => {}
    }
    if context == ViewContext::Tree && matches!(field.kind, FieldKind::Char | FieldKind::Text) {
        attrs.push("optional=\"show\"".to_string());
    }
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", attrs.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_models;
    use serde_json::json;

    fn sample() -> ModelSpec {
        parse_models(&[json!({
            "name": "event.custom",
            "fields": [
                {"name": "name", "type": "char", "required": true},
                {"name": "notes", "type": "text"},
                {"name": "status", "type": "selection",
                 "selection": [["draft", "Draft"], ["done", "Done"]]},
                {"name": "partner_id", "type": "many2one", "comodel_name": "res.partner"},
                {"name": "attendee_ids", "type": "one2many",
                 "comodel_name": "event.attendee", "inverse_name": "event_id"}
            ]
        })])
        .unwrap()
        .remove(0)
    }

    #[test]
    fn tree_skips_text_and_one2many() {
        let tree = render_tree(&sample());
        assert!(tree.contains("view_event_custom_tree"));
        assert!(tree.contains("<field name=\"name\""));
        assert!(tree.contains("<field name=\"status\""));
        assert!(!tree.contains("<field name=\"notes\""));
        assert!(!tree.contains("<field name=\"attendee_ids\""));
        assert!(tree.contains("decoration-muted=\"not active\""));
    }

    #[test]
    fn tree_caps_at_eight_fields() {
        let fields: Vec<serde_json::Value> = (0..12)
            .map(|i| json!({"name": format!("f{i}"), "type": "integer"}))
            .collect();
        let model = parse_models(&[json!({"name": "a.b", "fields": fields})])
            .unwrap()
            .remove(0);
        let tree = render_tree(&model);
        assert_eq!(tree.matches("<field name=\"f").count(), 8);
    }

    #[test]
    fn form_buckets_and_headline() {
        let form = render_form(&sample());
        assert!(form.contains("<h1>"));
        assert!(form.contains("<field name=\"name\" placeholder=\"Name\"/>"));
        assert!(form.contains("page string=\"Details\""));
        assert!(form.contains("page string=\"Relations\""));
        assert!(form.contains("<field name=\"notes\"/>"));
        assert!(form.contains("<field name=\"partner_id\"/>"));
        assert!(form.contains("action_view_attendee_ids"));
        assert!(form.contains("attendee_ids_count"));
        assert!(form.contains("toggle_active"));
        assert!(form.contains("<field name=\"status\"/>"));
    }

    #[test]
    fn form_skips_empty_pages() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "fields": [{"name": "total", "type": "integer"}]
        })])
        .unwrap()
        .remove(0);
        let form = render_form(&model);
        assert!(!form.contains("<notebook>"));
    }

    #[test]
    fn search_filters_and_group_by() {
        let search = render_search(&sample());
        assert!(search.contains("name=\"active\""));
        assert!(search.contains("name=\"inactive\""));
        assert!(search.contains("'group_by': 'status'"));
        assert!(search.contains("<field name=\"partner_id\"/>"));
    }

    #[test]
    fn search_falls_back_to_create_date() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "fields": [{"name": "total", "type": "integer"}]
        })])
        .unwrap()
        .remove(0);
        let search = render_search(&model);
        assert!(search.contains("'group_by': 'create_date'"));
    }

    #[test]
    fn kanban_title_and_body() {
        let kanban = render_kanban(&sample());
        assert!(kanban.contains("o_kanban_record_title"));
        assert!(kanban.contains("<field name=\"name\"/>"));
        assert_eq!(kanban.matches("o_kanban_record_body").count(), 3);
    }

    #[test]
    fn kanban_falls_back_to_id() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "add_default_fields": false,
            "fields": [{"name": "total", "type": "integer"}]
        })])
        .unwrap()
        .remove(0);
        let kanban = render_kanban(&model);
        assert!(kanban.contains("<field name=\"id\"/>"));
    }

    #[test]
    fn widget_selection() {
        let model = parse_models(&[json!({
            "name": "a.b",
            "fields": [
                {"name": "photo_image", "type": "binary"},
                {"name": "attachment", "type": "binary"},
                {"name": "body", "type": "html"},
                {"name": "amount", "type": "monetary"},
                {"name": "tag_ids", "type": "many2many", "comodel_name": "res.partner.category"}
            ]
        })])
        .unwrap()
        .remove(0);
        let form = render_form(&model);
        assert!(form.contains("<field name=\"photo_image\" widget=\"image\""));
        assert!(form.contains("<field name=\"attachment\" widget=\"binary\"/>"));
        assert!(form.contains("<field name=\"body\" widget=\"html\"/>"));
        assert!(form.contains("<field name=\"amount\" widget=\"monetary\"/>"));
        assert!(form.contains("<field name=\"tag_ids\" widget=\"many2many_tags\"/>"));

        let tree = render_tree(&model);
        assert!(tree.contains("<field name=\"active\" widget=\"boolean_toggle\"/>"));
    }

    #[test]
    fn render_all_wraps_in_envelope() {
        let document = ViewBuilder::new().render_all(&sample()).unwrap();
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(document.contains("view_event_custom_tree"));
        assert!(document.contains("view_event_custom_form"));
        assert!(document.contains("view_event_custom_search"));
        assert!(document.contains("view_event_custom_kanban"));
        assert!(document.ends_with("</odoo>\n"));
    }
}

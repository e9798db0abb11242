//! Navigation renderer: window actions, menu items and server actions for
//! one model, plus the combined menu tree spanning all models.

use serde_json::{json, Value};

use crate::error::Result;
use crate::spec::{FieldKind, ModelSpec};
use crate::templates::{xml_escape, Templates, DATA_XML};

/// Sequence of the combined root menu; fixed so reinstalls keep ordering.
pub const ROOT_MENU_SEQUENCE: u32 = 10;

/// Sequence increment between sibling model menus in the combined tree.
pub const MENU_SEQUENCE_STEP: u32 = 10;

/// A caller-supplied submenu entry, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuItem {
    /// XML id fragment, appended to the model's menu id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// XML id of the action the submenu opens.
    pub action: String,
    /// Ordering weight.
    pub sequence: u32,
}

/// A caller-supplied window action, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraAction {
    /// XML id fragment, appended to the model's action id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Comma-separated view mode list.
    pub view_mode: String,
    /// Context literal.
    pub context: String,
    /// Domain literal.
    pub domain: String,
}

/// A caller-supplied server action, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAction {
    /// XML id fragment.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Python code body.
    pub code: String,
}

/// Per-model navigation options.
///
/// Every field has a sensible default; `Default::default()` produces the
/// standard single-model navigation.
#[derive(Debug, Clone, Default)]
pub struct NavConfig {
    /// Menu label; defaults to the model description.
    pub menu_name: Option<String>,
    /// Action context literal; defaults to `{}`.
    pub context: Option<String>,
    /// Action domain literal; defaults to `[]`.
    pub domain: Option<String>,
    /// Empty-state help text; defaults to "Create your first {description}".
    pub help_text: Option<String>,
    /// Menu sequence; defaults to 10.
    pub sequence: Option<u32>,
    /// Optional record limit on the action.
    pub limit: Option<u32>,
    /// Overrides the derived view-mode list.
    pub view_mode: Option<String>,
    /// Parent menu XML id; overrides the model's `menu_parent`.
    pub parent_menu: Option<String>,
    /// Emit a per-model root menu when no parent is set.
    pub create_root_menu: bool,
    /// Root menu label; defaults to the model description.
    pub root_menu_name: Option<String>,
    /// Root menu sequence; defaults to 10.
    pub root_sequence: Option<u32>,
    /// Root menu icon; defaults to `fa fa-list`.
    pub root_icon: Option<String>,
    /// Extra submenu entries.
    pub submenus: Vec<SubmenuItem>,
    /// Extra window actions.
    pub extra_actions: Vec<ExtraAction>,
    /// Extra server actions.
    pub server_actions: Vec<ServerAction>,
}

/// Options for the combined cross-model menu tree.
#[derive(Debug, Clone, Default)]
pub struct GlobalNavConfig {
    /// Root menu label; defaults to "Custom Module".
    pub root_menu_name: Option<String>,
    /// Root menu XML id; defaults to `custom_module_root`.
    pub root_menu_id: Option<String>,
}

impl GlobalNavConfig {
    /// Read the `global_menu` section of a configuration document.
    #[must_use]
    pub fn from_value(raw: Option<&Value>) -> Self {
        let Some(map) = raw.and_then(Value::as_object) else {
            return Self::default();
        };
        Self {
            root_menu_name: map
                .get("root_menu_name")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            root_menu_id: map
                .get("root_menu_id")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        }
    }
}

/// Renders menu/action XML documents.
pub struct MenuBuilder {
    templates: Templates,
}

impl MenuBuilder {
    /// Create a builder with the default template set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: Templates::new(),
        }
    }

    /// Render the menu/action XML document for one model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Template`] on a malformed built-in template.
    pub fn render(&self, model: &ModelSpec, nav: &NavConfig) -> Result<String> {
        let body = render_fragment(model, nav);
        self.templates.render(DATA_XML, &json!({ "body": body }))
    }

    /// Render the combined menu tree for several models: one root menu plus
    /// one child menu per model, sequenced `(index + 1) * 10` in declared
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Template`] on a malformed built-in template.
    pub fn render_combined(
        &self,
        models: &[ModelSpec],
        global: &GlobalNavConfig,
    ) -> Result<String> {
        let root_name = global.root_menu_name.as_deref().unwrap_or("Custom Module");
        let root_id = global.root_menu_id.as_deref().unwrap_or("custom_module_root");

        let mut body = format!(
            r#"        <menuitem id="{root_id}"
                  name="{name}"
                  sequence="{ROOT_MENU_SEQUENCE}"
                  web_icon="fa fa-star"/>
"#,
            name = xml_escape(root_name),
        );
        for (index, model) in models.iter().enumerate() {
            let nav = NavConfig {
                parent_menu: Some(root_id.to_string()),
                sequence: Some(
                    (u32::try_from(index).unwrap_or(u32::MAX - 1) + 1) * MENU_SEQUENCE_STEP,
                ),
                ..NavConfig::default()
            };
            body.push_str(&render_fragment(model, &nav));
        }
        self.templates.render(DATA_XML, &json!({ "body": body }))
    }
}

impl Default for MenuBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The derived view-mode list: kanban first when the model has a
/// state-like selection field, then tree and form, with calendar appended
/// when any date field exists.
#[must_use]
pub fn view_mode(model: &ModelSpec) -> String {
    let mut modes = Vec::new();
    if has_stage_field(model) {
        modes.push("kanban");
    }
    modes.push("tree");
    modes.push("form");
    if model
        .fields
        .iter()
        .any(|f| matches!(f.kind, FieldKind::Date | FieldKind::Datetime))
    {
        modes.push("calendar");
    }
    modes.join(",")
}

fn has_stage_field(model: &ModelSpec) -> bool {
    model.fields.iter().any(|f| {
        (f.kind == FieldKind::Selection
            && ["state", "status", "stage"]
                .iter()
                .any(|token| f.name.contains(token)))
            || matches!(f.name.as_str(), "state" | "status" | "stage_id")
    })
}

/// Render the inner records for one model, without the XML envelope.
#[must_use]
pub fn render_fragment(model: &ModelSpec, nav: &NavConfig) -> String {
    let suffix = model.table_suffix();
    let description = xml_escape(&model.description);
    let description_lower = xml_escape(&model.description.to_lowercase());
    let mode = nav
        .view_mode
        .clone()
        .unwrap_or_else(|| view_mode(model));
    let context = nav.context.as_deref().unwrap_or("{}");
    let domain = nav.domain.as_deref().unwrap_or("[]");
    let help = nav.help_text.as_ref().map_or_else(
        || format!("Create your first {description_lower}"),
        |h| xml_escape(h),
    );

    let mut out = format!(
        r#"        <record id="action_{suffix}" model="ir.actions.act_window">
            <field name="name">{description}</field>
            <field name="res_model">{model_name}</field>
            <field name="view_mode">{mode}</field>
            <field name="context">{context}</field>
            <field name="domain">{domain}</field>
            <field name="help" type="html">
                <p class="o_view_nocontent_smiling_face">
                    {help}
                </p>
            </field>
"#,
        model_name = model.name,
    );
    if let Some(limit) = nav.limit {
        out.push_str(&format!(
            "            <field name=\"limit\">{limit}</field>\n"
        ));
    }
    out.push_str("            <field name=\"view_ids\" eval=\"[(5, 0, 0),\n");
    for view in mode.split(',').filter(|m| *m != "calendar") {
        out.push_str(&format!(
            "                (0, 0, {{'view_mode': '{view}', 'view_id': ref('view_{suffix}_{view}')}}),\n"
        ));
    }
    out.push_str("            ]\"/>\n        </record>\n");

    // Parent resolution: explicit option, then the model's own parent, then
    // the per-model root menu when requested.
    let parent = nav
        .parent_menu
        .clone()
        .or_else(|| model.menu_parent.clone());
    if parent.is_none() && nav.create_root_menu {
        let root_name = nav.root_menu_name.clone().unwrap_or_else(|| model.description.clone());
        let root_sequence = nav.root_sequence.unwrap_or(ROOT_MENU_SEQUENCE);
        let root_icon = nav.root_icon.as_deref().unwrap_or("fa fa-list");
        out.push_str(&format!(
            r#"        <menuitem id="menu_{suffix}_root"
                  name="{name}"
                  sequence="{root_sequence}"
                  web_icon="{root_icon}"/>
"#,
            name = xml_escape(&root_name),
        ));
    }

    let parent_attr = parent.as_ref().map_or_else(
        || {
            if nav.create_root_menu {
                format!("\n                  parent=\"menu_{suffix}_root\"")
            } else {
                String::new()
            }
        },
        |p| format!("\n                  parent=\"{p}\""),
    );
    let groups_attr = if model.security_groups.is_empty() {
        String::new()
    } else {
        format!(
            "\n                  groups=\"{}\"",
            model.security_groups.join(",")
        )
    };
    let menu_name = nav
        .menu_name
        .clone()
        .map_or_else(|| description.clone(), |n| xml_escape(&n));
    out.push_str(&format!(
        r#"        <menuitem id="menu_{suffix}"
                  name="{menu_name}"
                  action="action_{suffix}"{parent_attr}
                  sequence="{sequence}"{groups_attr}/>
"#,
        sequence = nav.sequence.unwrap_or(10),
    ));

    for submenu in &nav.submenus {
        out.push_str(&format!(
            r#"        <menuitem id="menu_{suffix}_{id}"
                  name="{name}"
                  action="{action}"
                  parent="menu_{suffix}"
                  sequence="{sequence}"/>
"#,
            id = submenu.id,
            name = xml_escape(&submenu.name),
            action = submenu.action,
            sequence = submenu.sequence,
        ));
    }

    for action in auto_actions(model).iter().chain(&nav.extra_actions) {
        out.push_str(&format!(
            r#"        <record id="action_{suffix}_{id}" model="ir.actions.act_window">
            <field name="name">{name}</field>
            <field name="res_model">{model_name}</field>
            <field name="view_mode">{view_mode}</field>
            <field name="context">{context}</field>
            <field name="domain">{domain}</field>
        </record>
"#,
            id = action.id,
            name = xml_escape(&action.name),
            model_name = model.name,
            view_mode = action.view_mode,
            context = action.context,
            domain = action.domain,
        ));
    }

    for action in auto_server_actions(model).iter().chain(&nav.server_actions) {
        out.push_str(&format!(
            r#"        <record id="action_server_{suffix}_{id}" model="ir.actions.server">
            <field name="name">{name}</field>
            <field name="model_id" ref="model_{suffix}"/>
            <field name="binding_model_id" ref="model_{suffix}"/>
            <field name="state">code</field>
            <field name="code">{code}</field>
        </record>
"#,
            id = action.id,
            name = xml_escape(&action.name),
            code = xml_escape(&action.code),
        ));
    }

    out
}

/// The built-in "active only" filtered action, emitted when the model has an
/// `active` field.
fn auto_actions(model: &ModelSpec) -> Vec<ExtraAction> {
    if !model.has_active_field() {
        return Vec::new();
    }
    vec![ExtraAction {
        id: "active_only".to_string(),
        name: format!("{} (Active)", model.description),
        view_mode: "tree,form".to_string(),
        context: "{}".to_string(),
        domain: "[('active', '=', True)]".to_string(),
    }]
}

/// The built-in archive/unarchive bulk actions, emitted when the model has
/// an `active` field.
fn auto_server_actions(model: &ModelSpec) -> Vec<ServerAction> {
    if !model.has_active_field() {
        return Vec::new();
    }
    vec![
        ServerAction {
            id: "archive".to_string(),
            name: format!("Archive {}", model.description),
            code: "for record in records:\n    record.active = False".to_string(),
        },
        ServerAction {
            id: "unarchive".to_string(),
            name: format!("Unarchive {}", model.description),
            code: "for record in records:\n    record.active = True".to_string(),
        },
    ]
}

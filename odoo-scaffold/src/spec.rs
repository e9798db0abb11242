//! Schema types for module, model and field descriptions, plus the parsing
//! that normalizes raw JSON/YAML maps into them.
//!
//! Parsing fills every omitted optional attribute from documented defaults and
//! appends the standard `active` field to each model. Validation lives in
//! [`crate::validate`]; nothing here rejects semantically bad input beyond
//! structural problems (missing `name`, unknown field kind).

use std::collections::BTreeMap;

use serde_json::Value;

use crate::defaults;
use crate::error::{Error, Result};
use crate::naming;

/// The closed set of supported Odoo field types.
///
/// Every renderer matches exhaustively on this enum, so adding a variant
/// forces each kind-specific branch to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Short text (`fields.Char`).
    Char,
    /// Multiline text (`fields.Text`).
    Text,
    /// Integer number (`fields.Integer`).
    Integer,
    /// Decimal number (`fields.Float`).
    Float,
    /// Boolean flag (`fields.Boolean`).
    Boolean,
    /// Calendar date (`fields.Date`).
    Date,
    /// Date and time (`fields.Datetime`).
    Datetime,
    /// Single choice from a fixed list (`fields.Selection`).
    Selection,
    /// Reference to one record of another model (`fields.Many2one`).
    Many2one,
    /// Inverse collection of a many-to-one (`fields.One2many`).
    One2many,
    /// Symmetric relation through a join table (`fields.Many2many`).
    Many2many,
    /// Binary payload such as a file or image (`fields.Binary`).
    Binary,
    /// Rich text rendered as HTML (`fields.Html`).
    Html,
    /// Monetary amount tied to a currency field (`fields.Monetary`).
    Monetary,
}

impl FieldKind {
    /// All supported kinds, in wire-name order.
    pub const ALL: [Self; 14] = [
        Self::Char,
        Self::Text,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Date,
        Self::Datetime,
        Self::Selection,
        Self::Many2one,
        Self::One2many,
        Self::Many2many,
        Self::Binary,
        Self::Html,
        Self::Monetary,
    ];

    /// Parse a wire name such as `"char"` or `"many2one"`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "char" => Some(Self::Char),
            "text" => Some(Self::Text),
            "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::Datetime),
            "selection" => Some(Self::Selection),
            "many2one" => Some(Self::Many2one),
            "one2many" => Some(Self::One2many),
            "many2many" => Some(Self::Many2many),
            "binary" => Some(Self::Binary),
            "html" => Some(Self::Html),
            "monetary" => Some(Self::Monetary),
            _ => None,
        }
    }

    /// The wire name accepted in configuration documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Selection => "selection",
            Self::Many2one => "many2one",
            Self::One2many => "one2many",
            Self::Many2many => "many2many",
            Self::Binary => "binary",
            Self::Html => "html",
            Self::Monetary => "monetary",
        }
    }

    /// The `fields.X` constructor name in generated Python.
    #[must_use]
    pub const fn constructor(self) -> &'static str {
        match self {
            Self::Char => "Char",
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Selection => "Selection",
            Self::Many2one => "Many2one",
            Self::One2many => "One2many",
            Self::Many2many => "Many2many",
            Self::Binary => "Binary",
            Self::Html => "Html",
            Self::Monetary => "Monetary",
        }
    }

    /// Whether this kind references another model.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Many2one | Self::One2many | Self::Many2many)
    }
}

/// A field default: either a literal value or a reference to a server-side
/// computed default.
///
/// The configuration format has no explicit tag; a string default beginning
/// with `fields.` (e.g. `fields.Date.today`) is by convention a computed
/// reference, everything else is a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal value rendered as a Python literal.
    Literal(Value),
    /// A named server-side callable rendered verbatim.
    Computed(String),
}

impl DefaultValue {
    /// Classify a raw configuration value.
    #[must_use]
    pub fn from_config(raw: &Value) -> Self {
        match raw {
            Value::String(s) if s.starts_with("fields.") => Self::Computed(s.clone()),
            other => Self::Literal(other.clone()),
        }
    }

    /// Render the default as the Python expression used in the field keyword.
    #[must_use]
    pub fn as_python(&self) -> String {
        match self {
            Self::Computed(reference) => reference.clone(),
            Self::Literal(value) => python_literal(value),
        }
    }
}

/// Render a JSON value as a Python literal.
#[must_use]
pub fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", python_escape(s)),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{}': {}", python_escape(k), python_literal(v)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

/// Escape a string for embedding in a single-quoted Python literal.
#[must_use]
pub fn python_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Keys the renderers interpret; everything else in a field's attribute map is
/// passed through verbatim.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "size",
    "selection",
    "comodel_name",
    "inverse_name",
    "relation",
    "column1",
    "column2",
    "currency_field",
    "unique",
];

/// One field of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field identifier, unique within the model.
    pub name: String,
    /// The field's type.
    pub kind: FieldKind,
    /// Display label; derived from `name` when absent in the input.
    pub label: String,
    /// Whether the field is mandatory.
    pub required: bool,
    /// Whether the field is read-only in the UI.
    pub readonly: bool,
    /// Optional tooltip text.
    pub help: Option<String>,
    /// Optional default value.
    pub default: Option<DefaultValue>,
    /// Kind-specific attributes plus any unrecognized pass-through keys,
    /// kept sorted for deterministic rendering.
    pub extra: BTreeMap<String, Value>,
}

impl FieldSpec {
    /// Construct a field with defaults for everything but name and kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let label = naming::humanize(&name);
        Self {
            name,
            kind,
            label,
            required: false,
            readonly: false,
            help: None,
            default: None,
            extra: BTreeMap::new(),
        }
    }

    /// Maximum length for [`FieldKind::Char`] fields; defaults to 255.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.extra
            .get("size")
            .and_then(Value::as_u64)
            .unwrap_or(255)
    }

    /// The declared choice list for [`FieldKind::Selection`] fields.
    ///
    /// Returns `None` when the key is absent or not an array of 2-element
    /// arrays; the validator rejects such inputs before rendering.
    #[must_use]
    pub fn choices(&self) -> Option<Vec<(String, String)>> {
        let entries = self.extra.get("selection")?.as_array()?;
        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let pair = entry.as_array()?;
            if pair.len() != 2 {
                return None;
            }
            pairs.push((value_as_text(&pair[0]), value_as_text(&pair[1])));
        }
        Some(pairs)
    }

    /// Target model name for relational kinds.
    #[must_use]
    pub fn comodel(&self) -> Option<&str> {
        self.extra.get("comodel_name").and_then(Value::as_str)
    }

    /// Inverse field name for [`FieldKind::One2many`] fields.
    #[must_use]
    pub fn inverse_name(&self) -> Option<&str> {
        self.extra.get("inverse_name").and_then(Value::as_str)
    }

    /// Join table name for [`FieldKind::Many2many`] fields.
    #[must_use]
    pub fn relation(&self) -> Option<&str> {
        self.extra.get("relation").and_then(Value::as_str)
    }

    /// Join column pointing at this model, for [`FieldKind::Many2many`].
    #[must_use]
    pub fn column1(&self) -> Option<&str> {
        self.extra.get("column1").and_then(Value::as_str)
    }

    /// Join column pointing at the target model, for [`FieldKind::Many2many`].
    #[must_use]
    pub fn column2(&self) -> Option<&str> {
        self.extra.get("column2").and_then(Value::as_str)
    }

    /// Currency field name for [`FieldKind::Monetary`]; defaults to
    /// `currency_id`.
    #[must_use]
    pub fn currency_field(&self) -> &str {
        self.extra
            .get("currency_field")
            .and_then(Value::as_str)
            .unwrap_or("currency_id")
    }

    /// Whether the field requested a SQL uniqueness constraint.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.extra
            .get("unique")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Pass-through attributes the renderers do not interpret, in sorted
    /// order.
    pub fn passthrough(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra
            .iter()
            .filter(|(key, _)| !RECOGNIZED_KEYS.contains(&key.as_str()))
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One generated data-object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// Dotted model name, e.g. `event.custom`.
    pub name: String,
    /// Display description; derived from `name` when absent.
    pub description: String,
    /// Optional database table override.
    pub table_name: Option<String>,
    /// Inherited model names, informational only.
    pub inherit: Vec<String>,
    /// Ordered field list; names are unique after validation.
    pub fields: Vec<FieldSpec>,
    /// Whether view XML is generated for this model.
    pub auto_views: bool,
    /// Whether menu/action XML is generated for this model.
    pub auto_menu: bool,
    /// Optional parent menu XML id.
    pub menu_parent: Option<String>,
    /// Access groups granted rights on this model.
    pub security_groups: Vec<String>,
}

impl ModelSpec {
    /// Construct a model with defaults for everything but the name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let description = naming::describe_model(&name);
        Self {
            name,
            description,
            table_name: None,
            inherit: Vec::new(),
            fields: Vec::new(),
            auto_views: true,
            auto_menu: true,
            menu_parent: None,
            security_groups: vec![defaults::DEFAULT_SECURITY_GROUP.to_string()],
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the model carries an `active` boolean field.
    #[must_use]
    pub fn has_active_field(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == "active" && f.kind == FieldKind::Boolean)
    }

    /// The field used as the record display name: the first field, in
    /// declaration order, that is a [`FieldKind::Char`] or is named `name`
    /// or `title`.
    #[must_use]
    pub fn record_name_field(&self) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::Char || f.name == "name" || f.name == "title")
    }

    /// The snake token embedded in all per-model file names and XML ids.
    #[must_use]
    pub fn table_suffix(&self) -> String {
        naming::table_suffix(&self.name)
    }

    /// The generated Python class name.
    #[must_use]
    pub fn class_name(&self) -> String {
        naming::class_name(&self.name)
    }
}

/// The packaging/metadata envelope for the generated addon.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpec {
    /// Human-readable module name.
    pub name: String,
    /// Odoo-style version string.
    pub version: String,
    /// App-store category.
    pub category: String,
    /// One-line summary.
    pub summary: String,
    /// Long description.
    pub description: String,
    /// Author line.
    pub author: String,
    /// Website URL.
    pub website: String,
    /// Addon dependency list.
    pub depends: Vec<String>,
    /// License identifier.
    pub license: String,
    /// Whether the addon is flagged as a standalone application.
    pub application: bool,
    /// Menu ordering weight.
    pub sequence: u32,
}

/// Parse a list of raw field maps into [`FieldSpec`]s.
///
/// # Errors
///
/// Returns [`Error::Config`] when an entry is not a map, lacks a `name`, or
/// names an unknown field kind.
pub fn parse_fields(raw: &[Value]) -> Result<Vec<FieldSpec>> {
    raw.iter().map(parse_field).collect()
}

fn parse_field(raw: &Value) -> Result<FieldSpec> {
    let map = raw
        .as_object()
        .ok_or_else(|| Error::config("field entry must be a map"))?;
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::config("field entry is missing a `name`"))?
        .to_string();
    let kind_raw = map
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::config(format!("field `{name}` is missing a `type`")))?;
    let kind = FieldKind::parse(kind_raw)
        .ok_or_else(|| Error::config(format!("field `{name}` has unknown type `{kind_raw}`")))?;

    let label = map
        .get("label")
        .and_then(Value::as_str)
        .map_or_else(|| naming::humanize(&name), ToString::to_string);
    let required = map.get("required").and_then(Value::as_bool).unwrap_or(false);
    let readonly = map.get("readonly").and_then(Value::as_bool).unwrap_or(false);
    let help = map
        .get("help_text")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    let default = map.get("default").map(DefaultValue::from_config);

    let mut extra = BTreeMap::new();
    for (key, value) in map {
        if !matches!(
            key.as_str(),
            "name" | "type" | "label" | "required" | "readonly" | "help_text" | "default"
        ) {
            extra.insert(key.clone(), value.clone());
        }
    }

    Ok(FieldSpec {
        name,
        kind,
        label,
        required,
        readonly,
        help,
        default,
        extra,
    })
}

/// Parse a list of raw model maps into [`ModelSpec`]s.
///
/// Appends the default `active` field to each model unless a field with that
/// name already exists or the entry sets `add_default_fields: false`.
///
/// # Errors
///
/// Returns [`Error::Config`] on structurally invalid entries; see
/// [`parse_fields`].
pub fn parse_models(raw: &[Value]) -> Result<Vec<ModelSpec>> {
    raw.iter().map(parse_model).collect()
}

fn parse_model(raw: &Value) -> Result<ModelSpec> {
    let map = raw
        .as_object()
        .ok_or_else(|| Error::config("model entry must be a map"))?;
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::config("model entry is missing a `name`"))?
        .to_string();

    let mut fields = match map.get("fields") {
        Some(Value::Array(entries)) => parse_fields(entries)?,
        Some(_) => {
            return Err(Error::config(format!(
                "model `{name}` has a non-list `fields` entry"
            )))
        }
        None => Vec::new(),
    };

    let add_defaults = map
        .get("add_default_fields")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    if add_defaults {
        for default_field in defaults::default_fields() {
            if !fields.iter().any(|f| f.name == default_field.name) {
                fields.push(default_field);
            }
        }
    }

    let description = map
        .get("description")
        .and_then(Value::as_str)
        .map_or_else(|| naming::describe_model(&name), ToString::to_string);
    let table_name = map
        .get("table_name")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    let inherit = string_list(map.get("inherit"));
    let auto_views = map
        .get("auto_create_views")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let auto_menu = map
        .get("auto_create_menu")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let menu_parent = map
        .get("menu_parent")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    let mut security_groups = string_list(map.get("security_groups"));
    if security_groups.is_empty() {
        security_groups.push(defaults::DEFAULT_SECURITY_GROUP.to_string());
    }

    Ok(ModelSpec {
        name,
        description,
        table_name,
        inherit,
        fields,
        auto_views,
        auto_menu,
        menu_parent,
        security_groups,
    })
}

/// Parse the `module` section of a configuration document, merging the
/// caller's data over built-in defaults.
///
/// `fallback_name` (usually the addon directory name) supplies the display
/// name when the section omits one.
///
/// # Errors
///
/// Returns [`Error::Config`] when the section is present but not a map.
pub fn parse_module(raw: Option<&Value>, fallback_name: &str) -> Result<ModuleSpec> {
    let empty = serde_json::Map::new();
    let map = match raw {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => return Err(Error::config("`module` section must be a map")),
    };

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .map_or_else(|| naming::humanize(fallback_name), ToString::to_string);
    let summary = map
        .get("summary")
        .and_then(Value::as_str)
        .map_or_else(|| format!("Module {name}"), ToString::to_string);
    let description = map
        .get("description")
        .and_then(Value::as_str)
        .map_or_else(
            || format!("Automatically generated module: {name}"),
            ToString::to_string,
        );
    let mut depends = string_list(map.get("depends"));
    if depends.is_empty() {
        depends = defaults::DEFAULT_DEPENDS
            .iter()
            .map(ToString::to_string)
            .collect();
    }

    Ok(ModuleSpec {
        name,
        version: string_or(map.get("version"), defaults::DEFAULT_VERSION),
        category: string_or(map.get("category"), defaults::DEFAULT_CATEGORY),
        summary,
        description,
        author: string_or(map.get("author"), defaults::DEFAULT_AUTHOR),
        website: string_or(map.get("website"), defaults::DEFAULT_WEBSITE),
        depends,
        license: string_or(map.get("license"), defaults::DEFAULT_LICENSE),
        application: map
            .get("is_application")
            .or_else(|| map.get("application"))
            .and_then(Value::as_bool)
            .unwrap_or(true),
        sequence: map
            .get("sequence")
            .and_then(Value::as_u64)
            .map_or(defaults::DEFAULT_SEQUENCE, |s| {
                u32::try_from(s).unwrap_or(defaults::DEFAULT_SEQUENCE)
            }),
    })
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_field_fills_defaults() {
        let fields = parse_fields(&[json!({"name": "partner_id", "type": "many2one",
            "comodel_name": "res.partner"})])
        .unwrap();
        let field = &fields[0];
        assert_eq!(field.label, "Partner ID");
        assert!(!field.required);
        assert!(!field.readonly);
        assert_eq!(field.comodel(), Some("res.partner"));
    }

    #[test]
    fn parse_field_rejects_unknown_kind() {
        let err = parse_fields(&[json!({"name": "x", "type": "quantum"})]).unwrap_err();
        assert!(err.to_string().contains("unknown type `quantum`"));
    }

    #[test]
    fn parse_field_keeps_passthrough_keys() {
        let fields = parse_fields(&[json!({"name": "code", "type": "char",
            "size": 32, "index": true, "tracking": true})])
        .unwrap();
        let passthrough: Vec<&String> = fields[0].passthrough().map(|(k, _)| k).collect();
        assert_eq!(passthrough, ["index", "tracking"]);
        assert_eq!(fields[0].size(), 32);
    }

    #[test]
    fn default_value_classification() {
        assert_eq!(
            DefaultValue::from_config(&json!("fields.Date.today")),
            DefaultValue::Computed("fields.Date.today".to_string())
        );
        assert_eq!(
            DefaultValue::from_config(&json!("draft")),
            DefaultValue::Literal(json!("draft"))
        );
        assert_eq!(DefaultValue::from_config(&json!(true)).as_python(), "True");
        assert_eq!(
            DefaultValue::from_config(&json!("it's")).as_python(),
            "'it\\'s'"
        );
    }

    #[test]
    fn parse_model_appends_active_field() {
        let models = parse_models(&[json!({
            "name": "event.custom",
            "fields": [{"name": "name", "type": "char"}]
        })])
        .unwrap();
        let model = &models[0];
        assert_eq!(model.fields.len(), 2);
        assert_eq!(model.fields[1].name, "active");
        assert!(model.has_active_field());
        assert_eq!(model.class_name(), "EventCustom");
        assert_eq!(model.table_suffix(), "event_custom");
    }

    #[test]
    fn parse_model_respects_existing_active() {
        let models = parse_models(&[json!({
            "name": "a.b",
            "fields": [{"name": "active", "type": "boolean"}]
        })])
        .unwrap();
        assert_eq!(models[0].fields.len(), 1);
    }

    #[test]
    fn parse_model_can_skip_default_fields() {
        let models = parse_models(&[json!({
            "name": "a.b",
            "add_default_fields": false,
            "fields": [{"name": "name", "type": "char"}]
        })])
        .unwrap();
        assert_eq!(models[0].fields.len(), 1);
        assert!(!models[0].has_active_field());
    }

    #[test]
    fn parse_module_merges_defaults() {
        let module = parse_module(Some(&json!({"name": "Events"})), "events").unwrap();
        assert_eq!(module.name, "Events");
        assert_eq!(module.version, "17.0.1.0.0");
        assert_eq!(module.depends, ["base", "mail"]);
        assert!(module.application);

        let bare = parse_module(None, "my_module").unwrap();
        assert_eq!(bare.name, "My Module");
    }

    #[test]
    fn parse_module_reads_is_application() {
        let module = parse_module(Some(&json!({"is_application": false})), "m").unwrap();
        assert!(!module.application);

        // legacy spelling still accepted
        let module = parse_module(Some(&json!({"application": false})), "m").unwrap();
        assert!(!module.application);
    }

    #[test]
    fn record_name_field_follows_declaration_order() {
        // the first Char wins even when a `name` field follows it
        let mut model = ModelSpec::new("a.b");
        model.fields.push(FieldSpec::new("code", FieldKind::Char));
        model.fields.push(FieldSpec::new("name", FieldKind::Char));
        assert_eq!(model.record_name_field().unwrap().name, "code");

        let mut titled = ModelSpec::new("a.b");
        titled.fields.push(FieldSpec::new("total", FieldKind::Integer));
        titled.fields.push(FieldSpec::new("title", FieldKind::Text));
        assert_eq!(titled.record_name_field().unwrap().name, "title");

        let mut no_name = ModelSpec::new("a.b");
        no_name.fields.push(FieldSpec::new("total", FieldKind::Integer));
        no_name.fields.push(FieldSpec::new("code", FieldKind::Char));
        assert_eq!(no_name.record_name_field().unwrap().name, "code");
    }
}

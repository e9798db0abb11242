//! Module assembler: builds the complete addon directory tree from validated
//! specifications and reports on its structural completeness.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::render::{GlobalNavConfig, MenuBuilder, ModelBuilder, NavConfig, ViewBuilder};
use crate::spec::{FieldKind, ModelSpec, ModuleSpec};
use crate::templates::{self, xml_escape, Templates};

/// Number of demo records generated per model.
const DEMO_RECORD_COUNT: usize = 3;

/// The standard addon directory layout.
const MODULE_DIRS: &[&str] = &[
    "models",
    "views",
    "security",
    "data",
    "demo",
    "controllers",
    "wizards",
    "reports",
    "static/description",
    "static/src/js",
    "static/src/css",
    "static/src/xml",
    "static/src/img",
];

/// Options applied to one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Navigation options applied to every model's menu file.
    pub nav: NavConfig,
    /// Options for the combined menu tree (multi-model modules only).
    pub global_nav: GlobalNavConfig,
}

/// Post-generation structural check: expected artifact path → present.
///
/// Recomputed by re-scanning the output tree; absences are diagnostics, not
/// errors.
#[derive(Debug, Clone)]
pub struct CompletenessReport {
    entries: Vec<(String, bool)>,
}

impl CompletenessReport {
    /// All expected paths with their presence flag, in layout order.
    #[must_use]
    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    /// Whether every expected artifact exists.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|(_, present)| *present)
    }

    /// The expected paths that are missing.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, present)| !present)
            .map(|(path, _)| path.as_str())
    }
}

/// Builds the addon directory tree.
pub struct ModuleAssembler {
    models: ModelBuilder,
    views: ViewBuilder,
    menus: MenuBuilder,
    templates: Templates,
}

impl ModuleAssembler {
    /// Create an assembler with the default builders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: ModelBuilder::new(),
            views: ViewBuilder::new(),
            menus: MenuBuilder::new(),
            templates: Templates::new(),
        }
    }

    /// Build the full addon under `output_root/module_name`.
    ///
    /// Steps run in a fixed order: directory layout, manifest, package
    /// inits, per-model sources and XML, security CSV, demo data, static
    /// assets, README, then the completeness scan. The scan never fails;
    /// missing paths are logged and returned in the report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resource`] on any filesystem failure (partial output
    /// may remain on disk) and [`Error::Config`] when a renderer trips a
    /// defensive check.
    pub fn assemble(
        &self,
        output_root: &Path,
        module_name: &str,
        models: &[ModelSpec],
        module: &ModuleSpec,
        options: &GenerateOptions,
    ) -> Result<(PathBuf, CompletenessReport)> {
        let module_path = output_root.join(module_name);
        tracing::info!(module = module_name, path = %module_path.display(), "assembling module");

        for dir in MODULE_DIRS {
            let path = module_path.join(dir);
            fs::create_dir_all(&path)
                .map_err(|e| Error::resource("create directory", path.clone(), e))?;
        }

        self.write_manifest(&module_path, models, module)?;
        self.write_init_files(&module_path, models, module)?;

        for model in models {
            let suffix = model.table_suffix();
            tracing::debug!(model = %model.name, "rendering model artifacts");
            write_file(
                &module_path.join("models").join(format!("{suffix}.py")),
                &self.models.render(model)?,
            )?;
            if model.auto_views {
                write_file(
                    &module_path.join("views").join(format!("{suffix}_views.xml")),
                    &self.views.render_all(model)?,
                )?;
            }
            if model.auto_menu {
                write_file(
                    &module_path.join("views").join(format!("{suffix}_menu.xml")),
                    &self.menus.render(model, &options.nav)?,
                )?;
            }
        }
        if models.len() > 1 {
            write_file(
                &module_path.join("views").join("menu_global.xml"),
                &self.menus.render_combined(models, &options.global_nav)?,
            )?;
        }

        write_file(
            &module_path.join("security").join("ir.model.access.csv"),
            &access_table(models),
        )?;

        for model in models {
            let suffix = model.table_suffix();
            write_file(
                &module_path.join("demo").join(format!("{suffix}_demo.xml")),
                &self.demo_document(model)?,
            )?;
        }

        self.write_assets(&module_path, module)?;
        self.write_readme(&module_path, module_name, models, module)?;

        let report = scan(&module_path, models);
        for missing in report.missing() {
            tracing::warn!(path = missing, "expected artifact is missing");
        }
        Ok((module_path, report))
    }

    fn write_manifest(
        &self,
        module_path: &Path,
        models: &[ModelSpec],
        module: &ModuleSpec,
    ) -> Result<()> {
        let data_files: String = data_file_list(models)
            .iter()
            .map(|f| format!("        '{f}',\n"))
            .collect();
        let demo_files: String = models
            .iter()
            .map(|m| format!("        'demo/{}_demo.xml',\n", m.table_suffix()))
            .collect();
        let model_lines: String = models
            .iter()
            .map(|m| format!("- {} ({})\n", m.description, m.name))
            .collect();
        let depends: Vec<String> = module.depends.iter().map(|d| format!("'{d}'")).collect();

        let content = self.templates.render(
            templates::MANIFEST_PY,
            &json!({
                "name": module.name,
                "version": module.version,
                "category": module.category,
                "summary": module.summary,
                "description": module.description,
                "model_lines": model_lines,
                "author": module.author,
                "website": module.website,
                "depends": format!("[{}]", depends.join(", ")),
                "data_files": data_files,
                "demo_files": demo_files,
                "application": if module.application { "True" } else { "False" },
                "sequence": module.sequence,
                "license": module.license,
            }),
        )?;
        write_file(&module_path.join("__manifest__.py"), &content)
    }

    fn write_init_files(
        &self,
        module_path: &Path,
        models: &[ModelSpec],
        module: &ModuleSpec,
    ) -> Result<()> {
        let content = self
            .templates
            .render(templates::MODULE_INIT_PY, &json!({ "name": module.name }))?;
        write_file(&module_path.join("__init__.py"), &content)?;

        let imports: String = models
            .iter()
            .map(|m| format!("from . import {}\n", m.table_suffix()))
            .collect();
        let content = self.templates.render(
            templates::MODELS_INIT_PY,
            &json!({ "name": module.name, "imports": imports }),
        )?;
        write_file(&module_path.join("models").join("__init__.py"), &content)?;

        for dir in ["controllers", "wizards", "reports"] {
            write_file(
                &module_path.join(dir).join("__init__.py"),
                templates::PACKAGE_INIT_PY,
            )?;
        }
        Ok(())
    }

    fn demo_document(&self, model: &ModelSpec) -> Result<String> {
        let suffix = model.table_suffix();
        let mut body = String::new();
        for index in 0..DEMO_RECORD_COUNT {
            let values = demo_values(model, index);
            if values.is_empty() {
                continue;
            }
            body.push_str(&format!(
                "        <record id=\"{suffix}_demo_{}\" model=\"{}\">\n",
                index + 1,
                model.name
            ));
            for (name, value) in values {
                body.push_str(&format!(
                    "            <field name=\"{name}\">{value}</field>\n"
                ));
            }
            body.push_str("        </record>\n");
        }
        self.templates
            .render(templates::DEMO_XML, &json!({ "body": body }))
    }

    fn write_assets(&self, module_path: &Path, module: &ModuleSpec) -> Result<()> {
        let initial = module
            .name
            .chars()
            .next()
            .map_or_else(|| "M".to_string(), |c| c.to_uppercase().to_string());
        let icon = self
            .templates
            .render(templates::ICON_SVG, &json!({ "initial": initial }))?;
        write_file(
            &module_path.join("static/description").join("icon.svg"),
            &icon,
        )?;

        let index = self.templates.render(
            templates::INDEX_HTML,
            &json!({
                "name": xml_escape(&module.name),
                "description": xml_escape(&module.description),
            }),
        )?;
        write_file(
            &module_path.join("static/description").join("index.html"),
            &index,
        )?;

        write_file(
            &module_path.join("static/src/css").join("module.css"),
            templates::MODULE_CSS,
        )?;
        write_file(
            &module_path.join("static/src/js").join("module.js"),
            templates::MODULE_JS,
        )
    }

    fn write_readme(
        &self,
        module_path: &Path,
        module_name: &str,
        models: &[ModelSpec],
        module: &ModuleSpec,
    ) -> Result<()> {
        let mut model_docs = String::new();
        for model in models {
            model_docs.push_str(&format!(
                "### {} (`{}`)\n\nFields:\n\n",
                model.description, model.name
            ));
            for field in &model.fields {
                model_docs.push_str(&format!(
                    "- `{}` ({}): {}\n",
                    field.name,
                    field.kind.as_str(),
                    field.label
                ));
            }
            model_docs.push('\n');
        }
        let content = self.templates.render(
            templates::README_MD,
            &json!({
                "name": module.name,
                "summary": module.summary,
                "description": module.description,
                "model_docs": model_docs,
                "module_dir": module_name,
                "license": module.license,
            }),
        )?;
        write_file(&module_path.join("README.md"), &content)
    }
}

impl Default for ModuleAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// The manifest `data` file list, in load order.
fn data_file_list(models: &[ModelSpec]) -> Vec<String> {
    let mut files = vec!["security/ir.model.access.csv".to_string()];
    for model in models {
        let suffix = model.table_suffix();
        if model.auto_views {
            files.push(format!("views/{suffix}_views.xml"));
        }
        if model.auto_menu {
            files.push(format!("views/{suffix}_menu.xml"));
        }
    }
    if models.len() > 1 {
        files.push("views/menu_global.xml".to_string());
    }
    files
}

/// Render the access-rights CSV: a header plus one row per model × group.
///
/// Groups whose identifier suggests a non-privileged role keep full
/// read/write/create but lose delete.
#[must_use]
pub fn access_table(models: &[ModelSpec]) -> String {
    let mut out =
        String::from("id,name,model_id,group_id,perm_read,perm_write,perm_create,perm_unlink\n");
    for model in models {
        let suffix = model.table_suffix();
        for group in &model.security_groups {
            let group_suffix = group.rsplit('.').next().unwrap_or(group);
            let perms = if group_suffix.to_lowercase().contains("user") {
                "1,1,1,0"
            } else {
                "1,1,1,1"
            };
            out.push_str(&format!(
                "access_{suffix}_{group_suffix},{description} {title},model_{suffix},{group},{perms}\n",
                description = model.description,
                title = capitalize_word(group_suffix),
            ));
        }
    }
    out
}

// Title-cases each underscore-separated word: `group_user` -> `Group_User`.
fn capitalize_word(word: &str) -> String {
    word.split('_')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Deterministic demo values for one record, by field kind.
///
/// Fields with no applicable rule are omitted.
#[must_use]
pub fn demo_values(model: &ModelSpec, index: usize) -> Vec<(String, String)> {
    let mut values = Vec::new();
    for field in &model.fields {
        let value = if field.name == "active" {
            Some("True".to_string())
        } else {
            match field.kind {
                FieldKind::Char => Some(if field.name.contains("name") {
                    format!("{} Demo {}", model.description, index + 1)
                } else if field.name.contains("email") {
                    format!("demo{}@example.com", index + 1)
                } else {
                    format!("Sample value {}", index + 1)
                }),
                FieldKind::Text => Some(format!("Demo description for record {}", index + 1)),
                FieldKind::Integer => Some(((index + 1) * 10).to_string()),
                #[allow(clippy::cast_precision_loss)]
                FieldKind::Float => Some(format!("{:.1}", (index as f64 + 1.0) * 10.5)),
                FieldKind::Boolean => Some(if index % 2 == 0 { "True" } else { "False" }.to_string()),
                FieldKind::Selection => field
                    .choices()
                    .filter(|choices| !choices.is_empty())
                    .map(|choices| choices[index % choices.len()].0.clone()),
                FieldKind::Date
                | FieldKind::Datetime
                | FieldKind::Many2one
                | FieldKind::One2many
                | FieldKind::Many2many
                | FieldKind::Binary
                | FieldKind::Html
                | FieldKind::Monetary => None,
            }
        };
        if let Some(value) = value {
            values.push((field.name.clone(), xml_escape(&value)));
        }
    }
    values
}

/// The artifact paths the manifest implies must exist, relative to the
/// module root.
#[must_use]
pub fn expected_paths(models: &[ModelSpec]) -> Vec<String> {
    let mut paths = vec![
        "__manifest__.py".to_string(),
        "__init__.py".to_string(),
        "models/__init__.py".to_string(),
        "security/ir.model.access.csv".to_string(),
        "README.md".to_string(),
        "static/description/icon.svg".to_string(),
        "static/description/index.html".to_string(),
        "static/src/css/module.css".to_string(),
        "static/src/js/module.js".to_string(),
    ];
    for model in models {
        let suffix = model.table_suffix();
        paths.push(format!("models/{suffix}.py"));
        if model.auto_views {
            paths.push(format!("views/{suffix}_views.xml"));
        }
        if model.auto_menu {
            paths.push(format!("views/{suffix}_menu.xml"));
        }
        paths.push(format!("demo/{suffix}_demo.xml"));
    }
    if models.len() > 1 {
        paths.push("views/menu_global.xml".to_string());
    }
    paths
}

/// Re-scan the output tree and compare it against the expected paths.
fn scan(module_path: &Path, models: &[ModelSpec]) -> CompletenessReport {
    let present: BTreeSet<String> = WalkDir::new(module_path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(module_path)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();
    let entries = expected_paths(models)
        .into_iter()
        .map(|path| {
            let found = present.contains(&path);
            (path, found)
        })
        .collect();
    CompletenessReport { entries }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::resource("write file", path.to_path_buf(), e))
}

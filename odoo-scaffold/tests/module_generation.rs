//! End-to-end generation tests against a temporary output directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use walkdir::WalkDir;

use odoo_scaffold::{GenerateOptions, ModuleGenerator};

fn event_config() -> serde_json::Value {
    json!({
        "module": {
            "name": "Event Management",
            "depends": ["base", "mail"]
        },
        "models": [{
            "name": "event.custom",
            "fields": [
                {"name": "name", "type": "char", "required": true, "size": 200},
                {"name": "status", "type": "selection", "default": "draft",
                 "selection": [["draft", "Draft"], ["open", "Open"], ["done", "Done"]]}
            ]
        }]
    })
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn tree_contents(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

#[test]
fn single_model_module() {
    let output = TempDir::new().unwrap();
    let outcome = ModuleGenerator::new()
        .generate(
            &event_config(),
            output.path(),
            "event_management",
            &GenerateOptions::default(),
        )
        .unwrap();
    assert!(outcome.report.is_complete());

    let module = outcome.path;
    let source = read(&module.join("models/event_custom.py"));
    assert!(source.contains("name = fields.Char(string='Name', required=True, size=200)"));
    assert!(source.contains("status = fields.Selection("));
    assert!(source.contains("active = fields.Boolean("));

    let views = read(&module.join("views/event_custom_views.xml"));
    let tree_section = views.split("view_event_custom_form").next().unwrap();
    assert!(tree_section.contains("<field name=\"name\""));
    assert!(tree_section.contains("<field name=\"status\""));

    // single model: no combined navigation file
    assert!(!module.join("views/menu_global.xml").exists());

    let manifest = read(&module.join("__manifest__.py"));
    assert!(manifest.contains("'name': 'Event Management'"));
    assert!(manifest.contains("'security/ir.model.access.csv'"));
    assert!(manifest.contains("'views/event_custom_views.xml'"));
    assert!(!manifest.contains("menu_global"));
}

#[test]
fn generation_is_deterministic() {
    let generator = ModuleGenerator::new();
    let config = event_config();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    generator
        .generate(&config, first.path(), "event_management", &GenerateOptions::default())
        .unwrap();
    generator
        .generate(&config, second.path(), "event_management", &GenerateOptions::default())
        .unwrap();
    assert_eq!(
        tree_contents(first.path()),
        tree_contents(second.path())
    );
}

#[test]
fn declared_fields_plus_active_in_source() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "models": [{
            "name": "library.book",
            "fields": [
                {"name": "name", "type": "char"},
                {"name": "pages", "type": "integer"},
                {"name": "price", "type": "float"},
                {"name": "published", "type": "date"}
            ]
        }]
    });
    let outcome = ModuleGenerator::new()
        .generate(&config, output.path(), "library", &GenerateOptions::default())
        .unwrap();
    let source = read(&outcome.path.join("models/library_book.py"));
    // 4 declared + auto-appended active
    assert_eq!(source.matches(" = fields.").count(), 5);
}

#[test]
fn demo_records_follow_kind_rules() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "models": [{
            "name": "event.custom",
            "fields": [
                {"name": "name", "type": "char"},
                {"name": "seats", "type": "integer"},
                {"name": "partner_id", "type": "many2one", "comodel_name": "res.partner"}
            ]
        }]
    });
    let outcome = ModuleGenerator::new()
        .generate(&config, output.path(), "events", &GenerateOptions::default())
        .unwrap();
    let demo = read(&outcome.path.join("demo/event_custom_demo.xml"));
    assert_eq!(demo.matches("<record id=\"event_custom_demo_").count(), 3);
    assert!(demo.contains("<field name=\"name\">Event Custom Demo 1</field>"));
    assert!(demo.contains("<field name=\"seats\">20</field>"));
    // no demo rule for many2one: the field is omitted, not an error
    assert!(!demo.contains("partner_id"));
}

#[test]
fn access_table_has_one_row_per_model_group_pair() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "models": [
            {"name": "a.one",
             "security_groups": ["base.group_user", "base.group_system"],
             "fields": [{"name": "name", "type": "char"}]},
            {"name": "a.two",
             "fields": [{"name": "name", "type": "char"}]}
        ]
    });
    let outcome = ModuleGenerator::new()
        .generate(&config, output.path(), "pairs", &GenerateOptions::default())
        .unwrap();
    let table = read(&outcome.path.join("security/ir.model.access.csv"));
    // header + (2 groups + 1 group)
    assert_eq!(table.lines().count(), 4);
    assert!(table
        .lines()
        .next()
        .unwrap()
        .starts_with("id,name,model_id,group_id,"));
}

#[test]
fn combined_menu_sequences_three_models() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "global_menu": {"root_menu_name": "Operations", "root_menu_id": "operations_root"},
        "models": [
            {"name": "ops.job", "fields": [{"name": "name", "type": "char"}]},
            {"name": "ops.crew", "fields": [{"name": "name", "type": "char"}]},
            {"name": "ops.site", "fields": [{"name": "name", "type": "char"}]}
        ]
    });
    let outcome = ModuleGenerator::new()
        .generate(&config, output.path(), "operations", &GenerateOptions::default())
        .unwrap();
    let menu = read(&outcome.path.join("views/menu_global.xml"));
    assert!(menu.contains("id=\"operations_root\""));
    assert!(menu.contains("name=\"Operations\""));

    // root at the fixed sequence, children at (index + 1) * 10
    let root_pos = menu.find("operations_root").unwrap();
    let root_chunk = &menu[root_pos..root_pos + 200];
    assert!(root_chunk.contains("sequence=\"10\""));
    for (suffix, sequence) in [("ops_job", 10), ("ops_crew", 20), ("ops_site", 30)] {
        let pos = menu.find(&format!("<menuitem id=\"menu_{suffix}\"")).unwrap();
        let chunk = &menu[pos..pos + 400];
        assert!(
            chunk.contains(&format!("sequence=\"{sequence}\"")),
            "menu_{suffix} should have sequence {sequence}"
        );
        assert!(chunk.contains("parent=\"operations_root\""));
    }
}

#[test]
fn derived_suffix_names_every_artifact() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "models": [{
            "name": "project.task.custom",
            "fields": [{"name": "name", "type": "char"}]
        }]
    });
    let outcome = ModuleGenerator::new()
        .generate(&config, output.path(), "tasks", &GenerateOptions::default())
        .unwrap();
    for artifact in [
        "models/project_task_custom.py",
        "views/project_task_custom_views.xml",
        "views/project_task_custom_menu.xml",
        "demo/project_task_custom_demo.xml",
    ] {
        assert!(
            outcome.path.join(artifact).exists(),
            "missing {artifact}"
        );
    }
    let menu = read(&outcome.path.join("views/project_task_custom_menu.xml"));
    assert!(menu.contains("ref('view_project_task_custom_tree')"));
}

#[test]
fn invalid_input_writes_nothing() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "models": [{
            "name": "event.custom",
            "fields": [{"name": "2bad", "type": "char"}]
        }]
    });
    let err = ModuleGenerator::new()
        .generate(&config, output.path(), "broken", &GenerateOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("2bad"));
    assert!(!output.path().join("broken").exists());
}

#[test]
fn empty_selection_names_field_and_model() {
    let output = TempDir::new().unwrap();
    let config = json!({
        "models": [{
            "name": "event.custom",
            "fields": [{"name": "status", "type": "selection", "selection": []}]
        }]
    });
    let err = ModuleGenerator::new()
        .generate(&config, output.path(), "events", &GenerateOptions::default())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("status"));
    assert!(message.contains("event.custom"));
}

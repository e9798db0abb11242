//! High-level entry points: parse, validate and assemble in one call.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::assemble::{CompletenessReport, GenerateOptions, ModuleAssembler};
use crate::defaults::{self, StarterKind};
use crate::error::{Error, Result};
use crate::naming;
use crate::render::GlobalNavConfig;
use crate::spec::{self, ModelSpec, ModuleSpec};
use crate::validate;

/// The result of one generation run.
#[derive(Debug)]
pub struct GenerationOutcome {
    /// The generated module directory.
    pub path: PathBuf,
    /// Structural completeness of the output tree.
    pub report: CompletenessReport,
}

/// Orchestrates parsing, validation and assembly.
///
/// Stateless across runs; the library emits `tracing` events scoped to each
/// call and never installs a subscriber.
pub struct ModuleGenerator {
    assembler: ModuleAssembler,
}

impl ModuleGenerator {
    /// Create a generator with the default assembler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assembler: ModuleAssembler::new(),
        }
    }

    /// Generate a module from an already-parsed configuration document.
    ///
    /// The document's top-level keys are `module`, `models` and optionally
    /// `global_menu`; a `global_menu` section overrides
    /// `options.global_nav`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed or invalid input (before any
    /// file is written) and [`Error::Resource`] for filesystem failures.
    pub fn generate(
        &self,
        config: &Value,
        output_root: &Path,
        module_name: &str,
        options: &GenerateOptions,
    ) -> Result<GenerationOutcome> {
        let (models, module) = self.check(config, module_name)?;

        let mut options = options.clone();
        if let Some(global_menu) = config.get("global_menu") {
            options.global_nav = GlobalNavConfig::from_value(Some(global_menu));
        }

        let (path, report) =
            self.assembler
                .assemble(output_root, module_name, &models, &module, &options)?;
        tracing::info!(path = %path.display(), complete = report.is_complete(), "module generated");
        Ok(GenerationOutcome { path, report })
    }

    /// Generate a module from a JSON or YAML configuration file.
    ///
    /// The module directory name falls back to the config's `module.name`
    /// (sanitized), then to the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFileNotFound`] when the file does not exist,
    /// [`Error::UnsupportedFormat`] for an unrecognized extension, and the
    /// errors of [`ModuleGenerator::generate`].
    pub fn generate_from_file(
        &self,
        config_path: &Path,
        output_root: &Path,
        module_name: Option<&str>,
        options: &GenerateOptions,
    ) -> Result<GenerationOutcome> {
        let config = load_config(config_path)?;
        let name = module_name.map_or_else(
            || derive_module_name(&config, config_path),
            ToString::to_string,
        );
        self.generate(&config, output_root, &name, options)
    }

    /// Parse and validate a configuration document without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn check(
        &self,
        config: &Value,
        fallback_name: &str,
    ) -> Result<(Vec<ModelSpec>, ModuleSpec)> {
        let models_raw = match config.get("models") {
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(_) => return Err(Error::config("`models` section must be a list")),
            None => &[],
        };
        let models = spec::parse_models(models_raw)?;
        let module = spec::parse_module(config.get("module"), fallback_name)?;
        validate::validate(&models, &module)?;
        Ok((models, module))
    }
}

impl Default for ModuleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a configuration document from a JSON or YAML file.
///
/// # Errors
///
/// Returns [`Error::ConfigFileNotFound`] when the file is absent,
/// [`Error::UnsupportedFormat`] for an unknown extension and
/// [`Error::Config`] when the document does not parse.
pub fn load_config(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::ConfigFileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|e| Error::resource("read file", path.to_path_buf(), e))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|e| {
            Error::config(format!("failed to parse {}: {e}", path.display()))
        }),
        Some("yaml" | "yml") => serde_yaml::from_str(&text).map_err(|e| {
            Error::config(format!("failed to parse {}: {e}", path.display()))
        }),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Write a starter configuration file for the given template kind, as JSON
/// or YAML depending on the target extension.
///
/// # Errors
///
/// Returns [`Error::Resource`] when the file cannot be written.
pub fn make_starter_config(kind: StarterKind, output_path: &Path) -> Result<PathBuf> {
    let config = defaults::starter_config(kind);
    let is_json = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let content = if is_json {
        serde_json::to_string_pretty(&config)
            .map_err(|e| Error::config(format!("failed to serialize starter config: {e}")))?
    } else {
        serde_yaml::to_string(&config)
            .map_err(|e| Error::config(format!("failed to serialize starter config: {e}")))?
    };
    fs::write(output_path, content)
        .map_err(|e| Error::resource("write file", output_path.to_path_buf(), e))?;
    tracing::info!(kind = %kind, path = %output_path.display(), "starter config written");
    Ok(output_path.to_path_buf())
}

fn derive_module_name(config: &Value, config_path: &Path) -> String {
    config
        .get("module")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .map(naming::sanitize_module_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            config_path
                .file_stem()
                .map_or_else(|| "generated_module".to_string(), |stem| {
                    naming::sanitize_module_name(&stem.to_string_lossy())
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_rejects_invalid_documents() {
        let generator = ModuleGenerator::new();
        let err = generator
            .check(&json!({"models": "not a list"}), "m")
            .unwrap_err();
        assert!(err.to_string().contains("must be a list"));

        let err = generator.check(&json!({}), "m").unwrap_err();
        assert!(err.to_string().contains("at least one model"));
    }

    #[test]
    fn check_accepts_starter_configs() {
        let generator = ModuleGenerator::new();
        for kind in StarterKind::ALL {
            let config = defaults::starter_config(kind);
            generator.check(&config, "starter").unwrap();
        }
    }

    #[test]
    fn derive_module_name_prefers_config() {
        let config = json!({"module": {"name": "My Module!"}});
        assert_eq!(
            derive_module_name(&config, Path::new("unused.yaml")),
            "my_module"
        );
        assert_eq!(
            derive_module_name(&json!({}), Path::new("dir/event-config.yaml")),
            "event_config"
        );
    }
}

//! Name-derivation helpers shared by every renderer.
//!
//! All derived identifiers (Python class names, file names, XML ids, display
//! labels) funnel through this module so that cross-file references always
//! agree. Renderers must never re-derive a name with their own string logic.

use convert_case::{Case, Casing};

/// Acronyms restored after title-casing a label.
const ACRONYMS: &[(&str, &str)] = &[
    ("Id", "ID"),
    ("Url", "URL"),
    ("Html", "HTML"),
    ("Xml", "XML"),
    ("Api", "API"),
    ("Ui", "UI"),
];

/// Sanitize arbitrary text into a legal field identifier.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single underscore, trims leading/trailing underscores, and prefixes
/// `field_` when the result would start with a digit.
#[must_use]
pub fn sanitize_identifier(raw: &str) -> String {
    let cleaned = collapse_to_snake(raw);
    if cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("field_{cleaned}")
    } else {
        cleaned
    }
}

/// Sanitize arbitrary text into a legal addon directory name.
///
/// Same collapsing policy as [`sanitize_identifier`] but without the
/// digit-prefix rule; a module directory may start with a digit.
#[must_use]
pub fn sanitize_module_name(raw: &str) -> String {
    collapse_to_snake(raw)
}

fn collapse_to_snake(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_was_separator = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            previous_was_separator = false;
        } else if !previous_was_separator {
            out.push('_');
            previous_was_separator = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Turn a snake_case identifier into a human-readable label.
///
/// Underscores become spaces, words are title-cased, and a fixed acronym
/// dictionary restores casing for common abbreviations: `user_id` → `User ID`.
#[must_use]
pub fn humanize(identifier: &str) -> String {
    identifier
        .to_case(Case::Title)
        .split(' ')
        .map(|word| {
            ACRONYMS
                .iter()
                .find(|(from, _)| *from == word)
                .map_or(word, |(_, to)| *to)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the Python class name from a dotted model name.
///
/// Splits on `.`, capitalizes each segment, concatenates:
/// `event.custom` → `EventCustom`.
#[must_use]
pub fn class_name(model_name: &str) -> String {
    model_name
        .split('.')
        .map(capitalize)
        .collect::<String>()
}

/// Derive a human-readable model description from a dotted model name.
///
/// `event.registration` → `Event Registration`.
#[must_use]
pub fn describe_model(model_name: &str) -> String {
    model_name
        .split('.')
        .flat_map(|segment| segment.split('_'))
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the snake token used in file names and XML ids.
///
/// Replaces each `.` with `_`: `event.custom` → `event_custom`. Every
/// per-model artifact (source file, view/menu/demo files, record ids) embeds
/// this token verbatim.
#[must_use]
pub fn table_suffix(model_name: &str) -> String {
    model_name.replace('.', "_")
}

/// snake_case conversion for arbitrary input.
#[must_use]
pub fn to_snake_case(raw: &str) -> String {
    raw.to_case(Case::Snake)
}

/// PascalCase conversion for arbitrary input.
#[must_use]
pub fn to_pascal_case(raw: &str) -> String {
    raw.to_case(Case::Pascal)
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

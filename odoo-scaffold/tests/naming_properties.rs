//! Property tests for the naming module.

use proptest::prelude::*;

use odoo_scaffold::naming;

proptest! {
    #[test]
    fn sanitize_identifier_is_idempotent(input in ".{0,40}") {
        let once = naming::sanitize_identifier(&input);
        prop_assert_eq!(naming::sanitize_identifier(&once), once);
    }

    #[test]
    fn sanitize_identifier_yields_valid_python_name(input in ".{1,40}") {
        let name = naming::sanitize_identifier(&input);
        if !name.is_empty() {
            let mut chars = name.chars();
            let first = chars.next().unwrap();
            prop_assert!(first.is_ascii_lowercase() || first == '_');
            prop_assert!(chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }

    #[test]
    fn sanitize_module_name_is_idempotent(input in ".{0,40}") {
        let once = naming::sanitize_module_name(&input);
        prop_assert_eq!(naming::sanitize_module_name(&once), once);
    }

    #[test]
    fn table_suffix_has_no_dots(segments in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..4)) {
        let model_name = segments.join(".");
        prop_assert!(!naming::table_suffix(&model_name).contains('.'));
    }

    #[test]
    fn class_name_starts_uppercase(segments in prop::collection::vec("[a-z][a-z0-9]{0,8}", 1..4)) {
        let model_name = segments.join(".");
        let class = naming::class_name(&model_name);
        prop_assert!(class.chars().next().unwrap().is_ascii_uppercase());
        prop_assert!(class.chars().all(char::is_alphanumeric));
    }
}

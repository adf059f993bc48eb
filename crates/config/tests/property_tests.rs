mod common;

use bnovo_config::{
    Breakpoints, DelaySequence, Metric, SettingsDocument, SettingsError, WindowPlacement,
};
use common::{builtin_json, set_path};
use proptest::prelude::*;

proptest! {
    #[test]
    fn breakpoint_selects_by_low_threshold(
        low in 0u32..5_000,
        gap in 0u32..5_000,
        low_value in 0u32..500,
        high_value in 0u32..500,
        size in 0u32..20_000,
    ) {
        let raw = format!("{low}, {low_value}, {}, {high_value}", low + gap);
        let breakpoints = Breakpoints::parse("theme.GridBodyRowHeight", &raw).unwrap();
        let expected = if size < low { low_value } else { high_value };
        prop_assert_eq!(breakpoints.value_at(size), expected);
        prop_assert_eq!(breakpoints.to_string(), raw);
    }

    #[test]
    fn delay_sequence_keeps_order(delays in prop::collection::vec(0u64..60_000, 1..12)) {
        let raw = delays.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(",");
        let sequence = DelaySequence::parse("dataSelectorInputDelayMillis", &raw).unwrap();
        prop_assert_eq!(sequence.as_millis(), delays.as_slice());

        let reparsed =
            DelaySequence::parse("dataSelectorInputDelayMillis", &sequence.to_string()).unwrap();
        prop_assert_eq!(reparsed, sequence);
    }

    #[test]
    fn metric_arity_other_than_one_or_four_is_rejected(
        parts in prop::collection::vec(0u32..2_000, 0..10),
    ) {
        prop_assume!(parts.len() != 1 && parts.len() != 4);
        let raw = parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
        let is_format_error = matches!(
            Metric::parse("theme.ViewHeaderHeight", &raw),
            Err(SettingsError::Format { .. })
        );
        prop_assert!(is_format_error);
    }

    #[test]
    fn placement_outside_closed_set_is_rejected(name in "[a-z-]{0,12}") {
        prop_assume!(name.parse::<WindowPlacement>().is_err());
        let mut json = builtin_json();
        set_path(&mut json, "relationEditWindow", serde_json::json!(name));
        let is_schema_error = matches!(
            SettingsDocument::from_value(json),
            Err(SettingsError::Schema(_))
        );
        prop_assert!(is_schema_error);
    }

    #[test]
    fn unknown_keys_never_resolve(key in "[a-zA-Z.]{0,24}") {
        let settings = SettingsDocument::builtin().unwrap();
        prop_assume!(!SettingsDocument::keys().any(|k| k == key));
        let records = ["userPanel", "onStartup", "onEmptyWorkspace", "theme"];
        prop_assume!(!records.contains(&key.as_str()));
        let is_unknown = matches!(settings.get(&key), Err(SettingsError::UnknownKey(_)));
        prop_assert!(is_unknown);
    }
}

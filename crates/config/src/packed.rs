// Packed multi-value settings
//
// The source format stores small tuples and lists as comma-separated
// strings ("600, 30, 1200, 52"). They are parsed once, at load time, into
// the typed values below and re-emitted in the same canonical form.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Literal form of a packed field: a bare number or a packed string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackedValue {
    Number(u64),
    Text(String),
}

impl PackedValue {
    fn to_text(&self) -> String {
        match self {
            PackedValue::Number(n) => n.to_string(),
            PackedValue::Text(s) => s.clone(),
        }
    }
}

/// Split a packed string into trimmed numeric parts.
fn split_numbers<T: FromStr>(key: &str, raw: &str) -> Result<Vec<T>> {
    if raw.trim().is_empty() {
        return Err(SettingsError::format(key, raw, "empty value"));
    }

    raw.split(',')
        .map(str::trim)
        .map(|part| {
            if part.is_empty() {
                return Err(SettingsError::format(key, raw, "empty component"));
            }
            part.parse::<T>().map_err(|_| {
                SettingsError::format(
                    key,
                    raw,
                    format!("'{part}' is not a non-negative integer"),
                )
            })
        })
        .collect()
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ============================================================================
// Breakpoint table
// ============================================================================

/// Two (threshold, value) pairs packed as `lowThreshold, lowValue, highThreshold, highValue`.
///
/// A size below `low_threshold` selects `low_value`; anything at or above it
/// selects `high_value`. `high_threshold` is the size the high value was
/// designed for and must not be below `low_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Breakpoints {
    pub low_threshold: u32,
    pub low_value: u32,
    pub high_threshold: u32,
    pub high_value: u32,
}

impl Breakpoints {
    pub const ARITY: usize = 4;

    pub fn parse(key: &str, raw: &str) -> Result<Self> {
        let parts: Vec<u32> = split_numbers(key, raw)?;
        if parts.len() != Self::ARITY {
            return Err(SettingsError::format(
                key,
                raw,
                format!(
                    "expected {} comma-separated numbers, found {}",
                    Self::ARITY,
                    parts.len()
                ),
            ));
        }
        Self::from_parts(key, raw, [parts[0], parts[1], parts[2], parts[3]])
    }

    fn from_parts(key: &str, raw: &str, parts: [u32; 4]) -> Result<Self> {
        let [low_threshold, low_value, high_threshold, high_value] = parts;
        if low_threshold > high_threshold {
            return Err(SettingsError::format(
                key,
                raw,
                format!("low threshold {low_threshold} exceeds high threshold {high_threshold}"),
            ));
        }
        Ok(Self {
            low_threshold,
            low_value,
            high_threshold,
            high_value,
        })
    }

    /// Pick the value for a measured size (viewport width, in pixels).
    pub fn value_at(&self, size: u32) -> u32 {
        if size < self.low_threshold {
            self.low_value
        } else {
            self.high_value
        }
    }
}

impl fmt::Display for Breakpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(
            f,
            &[
                self.low_threshold,
                self.low_value,
                self.high_threshold,
                self.high_value,
            ],
        )
    }
}

// ============================================================================
// Metric
// ============================================================================

/// A theme pixel metric: either one fixed value or a breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Fixed(u32),
    Scaled(Breakpoints),
}

impl Metric {
    /// Parse the string form: `"30"` or `"600, 30, 1200, 52"`.
    pub fn parse(key: &str, raw: &str) -> Result<Self> {
        let parts: Vec<u32> = split_numbers(key, raw)?;
        match parts.as_slice() {
            [value] => Ok(Metric::Fixed(*value)),
            [a, b, c, d] => Breakpoints::from_parts(key, raw, [*a, *b, *c, *d]).map(Metric::Scaled),
            _ => Err(SettingsError::format(
                key,
                raw,
                format!(
                    "expected 1 or {} comma-separated numbers, found {}",
                    Breakpoints::ARITY,
                    parts.len()
                ),
            )),
        }
    }

    pub fn from_packed(key: &str, packed: &PackedValue) -> Result<Self> {
        match packed {
            PackedValue::Number(n) => u32::try_from(*n)
                .map(Metric::Fixed)
                .map_err(|_| SettingsError::format(key, &n.to_string(), "value out of range")),
            PackedValue::Text(raw) => Self::parse(key, raw),
        }
    }

    pub fn to_packed(&self) -> PackedValue {
        match self {
            Metric::Fixed(value) => PackedValue::Number(u64::from(*value)),
            Metric::Scaled(breakpoints) => PackedValue::Text(breakpoints.to_string()),
        }
    }

    pub fn resolve(&self, size: u32) -> u32 {
        match self {
            Metric::Fixed(value) => *value,
            Metric::Scaled(breakpoints) => breakpoints.value_at(size),
        }
    }

    pub fn breakpoints(&self) -> Option<&Breakpoints> {
        match self {
            Metric::Fixed(_) => None,
            Metric::Scaled(breakpoints) => Some(breakpoints),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Fixed(value) => write!(f, "{value}"),
            Metric::Scaled(breakpoints) => breakpoints.fmt(f),
        }
    }
}

// ============================================================================
// Delay sequence
// ============================================================================

/// Ordered millisecond delays, e.g. the input delays of the data selector
/// as the typed prefix grows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelaySequence(Vec<u64>);

impl DelaySequence {
    pub fn parse(key: &str, raw: &str) -> Result<Self> {
        split_numbers(key, raw).map(DelaySequence)
    }

    pub fn from_packed(key: &str, packed: &PackedValue) -> Result<Self> {
        Self::parse(key, &packed.to_text())
    }

    pub fn to_packed(&self) -> PackedValue {
        PackedValue::Text(self.to_string())
    }

    pub fn as_millis(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the delays from the start. Each call starts over.
    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.0.iter().map(|ms| Duration::from_millis(*ms))
    }

    /// Delay for the given step; steps past the end repeat the last delay.
    pub fn delay_for(&self, step: usize) -> Duration {
        let ms = self.0.get(step).or_else(|| self.0.last()).copied().unwrap_or(0);
        Duration::from_millis(ms)
    }
}

impl fmt::Display for DelaySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(f, &self.0)
    }
}

// ============================================================================
// Command list
// ============================================================================

/// Comma-separated identifiers of the commands shown in the workspace.
/// An empty string means no commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommandList(Vec<String>);

impl CommandList {
    pub fn parse(key: &str, raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut commands: Vec<String> = Vec::new();
        for part in raw.split(',').map(str::trim) {
            if part.is_empty() {
                return Err(SettingsError::format(key, raw, "empty command"));
            }
            if commands.iter().any(|c| c == part) {
                return Err(SettingsError::format(
                    key,
                    raw,
                    format!("duplicate command '{part}'"),
                ));
            }
            commands.push(part.to_string());
        }
        Ok(Self(commands))
    }

    pub fn contains(&self, command: &str) -> bool {
        self.0.iter().any(|c| c == command)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(f, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints_parse() {
        let bp = Breakpoints::parse("theme.ViewHeaderHeight", "600, 30, 1200, 52").unwrap();
        assert_eq!(bp.low_threshold, 600);
        assert_eq!(bp.low_value, 30);
        assert_eq!(bp.high_threshold, 1200);
        assert_eq!(bp.high_value, 52);
    }

    #[test]
    fn test_breakpoints_value_at() {
        let bp = Breakpoints::parse("k", "600, 30, 1200, 52").unwrap();
        assert_eq!(bp.value_at(0), 30);
        assert_eq!(bp.value_at(599), 30);
        assert_eq!(bp.value_at(600), 52);
        assert_eq!(bp.value_at(1199), 52);
        assert_eq!(bp.value_at(4000), 52);
    }

    #[test]
    fn test_breakpoints_wrong_arity() {
        let err = Breakpoints::parse("k", "600, 30, 1200").unwrap_err();
        assert!(matches!(err, SettingsError::Format { .. }));
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn test_breakpoints_reversed_thresholds() {
        let err = Breakpoints::parse("k", "1200, 30, 600, 52").unwrap_err();
        assert!(matches!(err, SettingsError::Format { .. }));
    }

    #[test]
    fn test_breakpoints_display_is_canonical() {
        let bp = Breakpoints::parse("k", "600,30 ,1200,  52").unwrap();
        assert_eq!(bp.to_string(), "600, 30, 1200, 52");
    }

    #[test]
    fn test_metric_forms() {
        assert_eq!(Metric::parse("k", "30").unwrap(), Metric::Fixed(30));
        let scaled = Metric::parse("k", "600, 24, 1200, 34").unwrap();
        assert_eq!(scaled.resolve(100), 24);
        assert_eq!(scaled.resolve(800), 34);
        assert!(scaled.breakpoints().is_some());
        assert_eq!(Metric::Fixed(30).resolve(9999), 30);
    }

    #[test]
    fn test_metric_bad_arity() {
        for raw in ["30, 40", "1, 2, 3", "1, 2, 3, 4, 5", "", " , "] {
            let err = Metric::parse("k", raw).unwrap_err();
            assert!(matches!(err, SettingsError::Format { .. }), "{raw}");
        }
    }

    #[test]
    fn test_metric_rejects_negative_and_text() {
        assert!(Metric::parse("k", "-30").is_err());
        assert!(Metric::parse("k", "30px").is_err());
    }

    #[test]
    fn test_metric_from_packed() {
        assert_eq!(Metric::from_packed("k", &PackedValue::Number(25)).unwrap(), Metric::Fixed(25));
        let text = PackedValue::Text("600, 21, 1200, 43".into());
        let metric = Metric::from_packed("k", &text).unwrap();
        assert_eq!(metric.to_packed(), text);
        assert!(Metric::from_packed("k", &PackedValue::Number(u64::MAX)).is_err());
    }

    #[test]
    fn test_packed_value_literal_forms() {
        let number: PackedValue = serde_json::from_str("30").unwrap();
        assert_eq!(number, PackedValue::Number(30));
        let text: PackedValue = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(text, PackedValue::Text("30".into()));
        assert!(serde_json::from_str::<PackedValue>("true").is_err());
        assert!(serde_json::from_str::<PackedValue>("-5").is_err());
    }

    #[test]
    fn test_delay_sequence() {
        let seq = DelaySequence::parse("k", "500, 500, 400, 300, 200").unwrap();
        assert_eq!(seq.as_millis(), &[500, 500, 400, 300, 200]);
        assert_eq!(seq.len(), 5);

        // Restartable: iterating twice yields the same sequence
        let first: Vec<_> = seq.iter().collect();
        let second: Vec<_> = seq.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first[2], Duration::from_millis(400));
    }

    #[test]
    fn test_delay_for_clamps_to_last() {
        let seq = DelaySequence::parse("k", "500, 400, 300").unwrap();
        assert_eq!(seq.delay_for(0), Duration::from_millis(500));
        assert_eq!(seq.delay_for(2), Duration::from_millis(300));
        assert_eq!(seq.delay_for(50), Duration::from_millis(300));
    }

    #[test]
    fn test_delay_sequence_rejects_empty() {
        assert!(DelaySequence::parse("k", "").is_err());
        assert!(DelaySequence::parse("k", "500,,200").is_err());
    }

    #[test]
    fn test_command_list() {
        let commands =
            CommandList::parse("showCommands", "mail, users, chat, company_structure").unwrap();
        assert!(commands.contains("chat"));
        assert!(!commands.contains("news"));
        assert_eq!(commands.iter().count(), 4);
        assert_eq!(commands.to_string(), "mail, users, chat, company_structure");
    }

    #[test]
    fn test_command_list_empty_and_invalid() {
        assert!(CommandList::parse("k", "  ").unwrap().is_empty());
        assert!(CommandList::parse("k", "mail,,users").is_err());
        assert!(CommandList::parse("k", "mail, mail").is_err());
    }
}

// Settings definition
// The literal form of the settings, exactly as written by hand: JSON, the
// browser script `var BeeSettings = { ... };`, or TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SettingsError};
use crate::packed::PackedValue;
use crate::settings::{StartupAction, UserPanel};
use crate::theme::ThemeConfig;
use crate::window::WindowPlacement;

/// Top-level definition. Every key must appear exactly once; keys the schema
/// does not declare are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsDefinition {
    // Metadata
    pub app_name: String,
    pub version: String,
    pub licence: String,
    pub build: String,
    pub release_date: String,
    pub logo_image: String,
    pub logo_open: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_title: Option<String>,

    // Data provider
    pub provider_sensitivity_millis: u64,
    pub provider_repeat_millis: u64,
    pub provider_min_prefetch_steps: u64,
    pub provider_max_prefetch_steps: u64,
    pub loading_state_delay_millis: u64,
    pub log_capacity: u64,
    pub minimize_number_of_concurrent_requests: bool,

    // Workspace
    pub show_commands: String,
    pub user_panel: UserPanel,
    pub on_startup: StartupAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_empty_workspace: Option<StartupAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_sheets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<String>>,

    // Interaction
    pub click_sensitivity_millis: u64,
    pub click_sensitivity_distance: u32,
    pub action_sensitivity_millis: u64,
    pub news_refresh_interval_seconds: u64,
    pub dialog_resizer_width: u32,
    pub reduced_interaction_status_minutes: u64,

    // Chat
    pub incoming_chat_message_sound: String,
    pub incoming_chat_message_volume: f64,

    // Export
    pub exporter_input_step_rows: u64,
    pub exporter_output_step_rows: u64,
    pub exporter_split_rows_threshold: u64,

    // Data selector
    pub data_selector_input_delay_millis: PackedValue,
    pub data_selector_instant_search_max_rows: u64,
    pub data_selector_caching_max_rows: u64,

    // Grids and windows
    pub show_grid_filter_command: bool,
    pub grid_edit_window: WindowPlacement,
    pub grid_new_row_window: WindowPlacement,
    pub child_edit_window: WindowPlacement,
    pub child_new_row_window: WindowPlacement,
    pub relation_edit_window: WindowPlacement,
    pub relation_new_row_window: WindowPlacement,
    pub other_edit_windows: WindowPlacement,
    pub other_new_row_windows: WindowPlacement,
    pub new_mail_message_window: WindowPlacement,

    pub theme: ThemeConfig,
}

impl SettingsDefinition {
    pub fn from_json(input: &str) -> Result<Self> {
        let cleaned = strip_comments(input);
        serde_json::from_str(&cleaned).map_err(|e| SettingsError::Schema(e.to_string()))
    }

    /// Parse the browser script form: `var BeeSettings = { ... };`
    pub fn from_script(input: &str) -> Result<Self> {
        let cleaned = strip_comments(input);
        let body = script_body(&cleaned)?;
        serde_json::from_str(body).map_err(|e| SettingsError::Schema(e.to_string()))
    }

    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| SettingsError::Schema(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| SettingsError::Schema(e.to_string()))
    }

    /// Read a definition file, choosing the format from its extension
    pub fn read(path: &Path) -> Result<Self> {
        let parse: fn(&str) -> Result<Self> = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json,
            Some("js") => Self::from_script,
            Some("toml") => Self::from_toml,
            _ => return Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
        };

        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&contents)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| SettingsError::Schema(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Schema(e.to_string()))
    }
}

/// Drop whole-line `//` comments
fn strip_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract the object literal from `var <name> = { ... };`. A bare object is
/// accepted as is.
fn script_body(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    let body = match trimmed.split_once('=') {
        Some((decl, rest)) if is_declaration(decl) => rest,
        _ if trimmed.starts_with('{') => trimmed,
        _ => {
            return Err(SettingsError::Schema(
                "expected `var <name> = { ... };`".into(),
            ))
        }
    };
    Ok(body.trim().trim_end_matches(';').trim_end())
}

fn is_declaration(decl: &str) -> bool {
    let mut words = decl.split_whitespace();
    let keyword = words.next();
    let name = words.next();
    matches!(keyword, Some("var" | "let" | "const"))
        && name.is_some_and(|n| n.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$'))
        && words.next().is_none()
}

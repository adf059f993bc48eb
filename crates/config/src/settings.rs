// Application settings
// Built once from the literal definition (bundled assets/settings.js, or
// ~/.config/bnovo/settings.json), read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::definition::SettingsDefinition;
use crate::error::{Result, SettingsError};
use crate::packed::{CommandList, DelaySequence, Metric};
use crate::theme::{FontWeight, Padding, Theme};
use crate::window::{WindowPlacement, WindowPolicy};

/// Definition shipped with the crate
const BUILTIN_DEFINITION: &str = include_str!("../assets/settings.js");

// ============================================================================
// Values
// ============================================================================

/// A setting value, as returned by [`SettingsDocument::get`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(u64),
    Float(f64),
    Bool(bool),
    Placement(WindowPlacement),
    Panel(UserPanelKind),
    Font(FontWeight),
    Padding(Padding),
    Metric(Metric),
    Delays(DelaySequence),
    List(Vec<String>),
    Record(BTreeMap<String, Value>),
    /// Optional key the definition leaves out
    Unset,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_placement(&self) -> Option<WindowPlacement> {
        match self {
            Value::Placement(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(u64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<WindowPlacement> for Value {
    fn from(p: WindowPlacement) -> Self {
        Value::Placement(p)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Panel shown in the user area of the screen header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserPanelKind {
    /// User info with the notification center
    #[serde(rename = "NotificationUserPanel")]
    Notification,
    /// Plain user info
    #[serde(rename = "UserPanel")]
    Basic,
}

impl UserPanelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserPanelKind::Notification => "NotificationUserPanel",
            UserPanelKind::Basic => "UserPanel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPanel {
    #[serde(rename = "default")]
    pub default_panel: UserPanelKind,
    pub show_user_photo: bool,
    pub show_user_presence: bool,
    pub show_logout: bool,
}

impl UserPanel {
    pub const KEYS: [&'static str; 4] =
        ["default", "showUserPhoto", "showUserPresence", "showLogout"];

    fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "default" => Value::Panel(self.default_panel),
            "showUserPhoto" => Value::Bool(self.show_user_photo),
            "showUserPresence" => Value::Bool(self.show_user_presence),
            "showLogout" => Value::Bool(self.show_logout),
            _ => return None,
        };
        Some(value)
    }
}

/// What to open in the workspace: a form/grid/view name, and which users it
/// is forced on (`*` = everyone)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupAction {
    pub content: String,
    pub force: String,
}

impl StartupAction {
    pub const KEYS: [&'static str; 2] = ["content", "force"];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "content" => Some(Value::from(self.content.as_str())),
            "force" => Some(Value::from(self.force.as_str())),
            _ => None,
        }
    }

    pub fn forced_on_everyone(&self) -> bool {
        self.force.trim() == "*"
    }
}

/// Application identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    pub app_name: String,
    pub version: String,
    pub licence: String,
    pub build: String,
    pub release_date: String,
    pub logo_image: String,
    pub logo_open: String,
    pub logo_title: Option<String>,
}

/// Row provider paging and request throttling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSettings {
    pub sensitivity_millis: u64,
    pub repeat_millis: u64,
    pub min_prefetch_steps: u64,
    pub max_prefetch_steps: u64,
}

impl ProviderSettings {
    pub fn sensitivity(&self) -> Duration {
        Duration::from_millis(self.sensitivity_millis)
    }

    pub fn repeat(&self) -> Duration {
        Duration::from_millis(self.repeat_millis)
    }

    /// Clamp a requested prefetch step count into the configured bounds
    pub fn clamp_prefetch(&self, steps: u64) -> u64 {
        steps.clamp(self.min_prefetch_steps, self.max_prefetch_steps)
    }
}

/// Pointer and user-activity sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionSettings {
    pub click_sensitivity_millis: u64,
    pub click_sensitivity_distance: u32,
    pub action_sensitivity_millis: u64,
    pub news_refresh_interval_seconds: u64,
    pub dialog_resizer_width: u32,
    pub reduced_interaction_status_minutes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExporterSettings {
    pub input_step_rows: u64,
    pub output_step_rows: u64,
    pub split_rows_threshold: u64,
}

/// Incremental search in relation (data selector) inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSelectorSettings {
    pub input_delays: DelaySequence,
    pub instant_search_max_rows: u64,
    pub caching_max_rows: u64,
}

// ============================================================================
// Document
// ============================================================================

/// Required top-level keys, in definition order. Every field of the
/// `userPanel`, `onStartup` and `theme` records is required as well.
pub const REQUIRED_KEYS: [&str; 42] = [
    "appName",
    "version",
    "licence",
    "build",
    "releaseDate",
    "logoImage",
    "logoOpen",
    "providerSensitivityMillis",
    "providerRepeatMillis",
    "providerMinPrefetchSteps",
    "providerMaxPrefetchSteps",
    "loadingStateDelayMillis",
    "logCapacity",
    "minimizeNumberOfConcurrentRequests",
    "showCommands",
    "userPanel",
    "onStartup",
    "clickSensitivityMillis",
    "clickSensitivityDistance",
    "actionSensitivityMillis",
    "newsRefreshIntervalSeconds",
    "dialogResizerWidth",
    "reducedInteractionStatusMinutes",
    "incomingChatMessageSound",
    "incomingChatMessageVolume",
    "exporterInputStepRows",
    "exporterOutputStepRows",
    "exporterSplitRowsThreshold",
    "dataSelectorInputDelayMillis",
    "dataSelectorInstantSearchMaxRows",
    "dataSelectorCachingMaxRows",
    "showGridFilterCommand",
    "gridEditWindow",
    "gridNewRowWindow",
    "childEditWindow",
    "childNewRowWindow",
    "relationEditWindow",
    "relationNewRowWindow",
    "otherEditWindows",
    "otherNewRowWindows",
    "newMailMessageWindow",
    "theme",
];

/// Optional top-level keys
pub const OPTIONAL_KEYS: [&str; 5] = [
    "logoTitle",
    "onEmptyWorkspace",
    "northHeight",
    "styleSheets",
    "scripts",
];

/// Keys holding a window placement
pub const WINDOW_KEYS: [&str; 9] = [
    "gridEditWindow",
    "gridNewRowWindow",
    "childEditWindow",
    "childNewRowWindow",
    "relationEditWindow",
    "relationNewRowWindow",
    "otherEditWindows",
    "otherNewRowWindows",
    "newMailMessageWindow",
];

/// Validated, immutable settings
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDocument {
    metadata: AppMetadata,
    provider: ProviderSettings,
    loading_state_delay_millis: u64,
    log_capacity: u64,
    minimize_concurrent_requests: bool,
    show_commands: CommandList,
    user_panel: UserPanel,
    on_startup: StartupAction,
    on_empty_workspace: Option<StartupAction>,
    north_height: Option<u32>,
    style_sheets: Option<Vec<String>>,
    scripts: Option<Vec<String>>,
    interaction: InteractionSettings,
    chat_message_sound: String,
    chat_message_volume: f64,
    exporter: ExporterSettings,
    data_selector: DataSelectorSettings,
    show_grid_filter_command: bool,
    windows: WindowPolicy,
    theme: Theme,
}

impl SettingsDocument {
    /// Validate a definition and build the document. Fails on the first
    /// problem; nothing partially valid is returned.
    pub fn load(definition: SettingsDefinition) -> Result<Self> {
        let d = definition;

        let metadata = AppMetadata {
            app_name: non_empty("appName", d.app_name)?,
            version: non_empty("version", d.version)?,
            licence: d.licence,
            build: non_empty("build", d.build)?,
            release_date: non_empty("releaseDate", d.release_date)?,
            logo_image: d.logo_image,
            logo_open: d.logo_open,
            logo_title: d.logo_title,
        };

        if d.provider_min_prefetch_steps > d.provider_max_prefetch_steps {
            return Err(SettingsError::Schema(format!(
                "providerMinPrefetchSteps ({}) exceeds providerMaxPrefetchSteps ({})",
                d.provider_min_prefetch_steps, d.provider_max_prefetch_steps
            )));
        }

        let volume = d.incoming_chat_message_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(SettingsError::Schema(format!(
                "incomingChatMessageVolume must be within 0.0..=1.0, got {volume}"
            )));
        }

        let on_empty_workspace = match d.on_empty_workspace {
            Some(action) => Some(startup_action("onEmptyWorkspace", action)?),
            None => None,
        };

        let document = SettingsDocument {
            metadata,
            provider: ProviderSettings {
                sensitivity_millis: d.provider_sensitivity_millis,
                repeat_millis: d.provider_repeat_millis,
                min_prefetch_steps: d.provider_min_prefetch_steps,
                max_prefetch_steps: d.provider_max_prefetch_steps,
            },
            loading_state_delay_millis: d.loading_state_delay_millis,
            log_capacity: d.log_capacity,
            minimize_concurrent_requests: d.minimize_number_of_concurrent_requests,
            show_commands: CommandList::parse("showCommands", &d.show_commands)?,
            user_panel: d.user_panel,
            on_startup: startup_action("onStartup", d.on_startup)?,
            on_empty_workspace,
            north_height: d.north_height,
            style_sheets: list_items("styleSheets", d.style_sheets)?,
            scripts: list_items("scripts", d.scripts)?,
            interaction: InteractionSettings {
                click_sensitivity_millis: d.click_sensitivity_millis,
                click_sensitivity_distance: d.click_sensitivity_distance,
                action_sensitivity_millis: d.action_sensitivity_millis,
                news_refresh_interval_seconds: d.news_refresh_interval_seconds,
                dialog_resizer_width: d.dialog_resizer_width,
                reduced_interaction_status_minutes: d.reduced_interaction_status_minutes,
            },
            chat_message_sound: non_empty(
                "incomingChatMessageSound",
                d.incoming_chat_message_sound,
            )?,
            chat_message_volume: volume,
            exporter: ExporterSettings {
                input_step_rows: d.exporter_input_step_rows,
                output_step_rows: d.exporter_output_step_rows,
                split_rows_threshold: d.exporter_split_rows_threshold,
            },
            data_selector: DataSelectorSettings {
                input_delays: DelaySequence::from_packed(
                    "dataSelectorInputDelayMillis",
                    &d.data_selector_input_delay_millis,
                )?,
                instant_search_max_rows: d.data_selector_instant_search_max_rows,
                caching_max_rows: d.data_selector_caching_max_rows,
            },
            show_grid_filter_command: d.show_grid_filter_command,
            windows: WindowPolicy {
                grid_edit: d.grid_edit_window,
                grid_new_row: d.grid_new_row_window,
                child_edit: d.child_edit_window,
                child_new_row: d.child_new_row_window,
                relation_edit: d.relation_edit_window,
                relation_new_row: d.relation_new_row_window,
                other_edit: d.other_edit_windows,
                other_new_row: d.other_new_row_windows,
                new_mail_message: d.new_mail_message_window,
            },
            theme: Theme::from_config(&d.theme)?,
        };

        log::debug!(
            "Loaded settings for {} {} (build {})",
            document.metadata.app_name,
            document.metadata.version,
            document.metadata.build
        );
        Ok(document)
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Self::load(SettingsDefinition::from_json(input)?)
    }

    pub fn from_script(input: &str) -> Result<Self> {
        Self::load(SettingsDefinition::from_script(input)?)
    }

    pub fn from_toml(input: &str) -> Result<Self> {
        Self::load(SettingsDefinition::from_toml(input)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::load(SettingsDefinition::from_value(value)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::load(SettingsDefinition::read(path)?)
    }

    /// The definition bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_script(BUILTIN_DEFINITION)
    }

    /// Get the user settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bnovo");
        config_dir.join("settings.json")
    }

    /// Load the user settings file if there is one, otherwise the bundled
    /// definition. A user file that fails validation is an error.
    pub fn load_default() -> Result<Self> {
        Self::load_default_from(&Self::config_path())
    }

    /// Same as [`load_default`](Self::load_default), with the user file at `path`
    pub fn load_default_from(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_path(path);
        }

        log::warn!("No settings at {}, using bundled definition", path.display());
        Self::builtin()
    }

    /// Rebuild the literal definition, packed fields in canonical form
    pub fn to_definition(&self) -> SettingsDefinition {
        let m = &self.metadata;
        let w = &self.windows;
        let i = &self.interaction;

        SettingsDefinition {
            app_name: m.app_name.clone(),
            version: m.version.clone(),
            licence: m.licence.clone(),
            build: m.build.clone(),
            release_date: m.release_date.clone(),
            logo_image: m.logo_image.clone(),
            logo_open: m.logo_open.clone(),
            logo_title: m.logo_title.clone(),
            provider_sensitivity_millis: self.provider.sensitivity_millis,
            provider_repeat_millis: self.provider.repeat_millis,
            provider_min_prefetch_steps: self.provider.min_prefetch_steps,
            provider_max_prefetch_steps: self.provider.max_prefetch_steps,
            loading_state_delay_millis: self.loading_state_delay_millis,
            log_capacity: self.log_capacity,
            minimize_number_of_concurrent_requests: self.minimize_concurrent_requests,
            show_commands: self.show_commands.to_string(),
            user_panel: self.user_panel.clone(),
            on_startup: self.on_startup.clone(),
            on_empty_workspace: self.on_empty_workspace.clone(),
            north_height: self.north_height,
            style_sheets: self.style_sheets.clone(),
            scripts: self.scripts.clone(),
            click_sensitivity_millis: i.click_sensitivity_millis,
            click_sensitivity_distance: i.click_sensitivity_distance,
            action_sensitivity_millis: i.action_sensitivity_millis,
            news_refresh_interval_seconds: i.news_refresh_interval_seconds,
            dialog_resizer_width: i.dialog_resizer_width,
            reduced_interaction_status_minutes: i.reduced_interaction_status_minutes,
            incoming_chat_message_sound: self.chat_message_sound.clone(),
            incoming_chat_message_volume: self.chat_message_volume,
            exporter_input_step_rows: self.exporter.input_step_rows,
            exporter_output_step_rows: self.exporter.output_step_rows,
            exporter_split_rows_threshold: self.exporter.split_rows_threshold,
            data_selector_input_delay_millis: self.data_selector.input_delays.to_packed(),
            data_selector_instant_search_max_rows: self.data_selector.instant_search_max_rows,
            data_selector_caching_max_rows: self.data_selector.caching_max_rows,
            show_grid_filter_command: self.show_grid_filter_command,
            grid_edit_window: w.grid_edit,
            grid_new_row_window: w.grid_new_row,
            child_edit_window: w.child_edit,
            child_new_row_window: w.child_new_row,
            relation_edit_window: w.relation_edit,
            relation_new_row_window: w.relation_new_row,
            other_edit_windows: w.other_edit,
            other_new_row_windows: w.other_new_row,
            new_mail_message_window: w.new_mail_message,
            theme: self.theme.to_config(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        self.to_definition().to_json()
    }

    // ------------------------------------------------------------------------
    // Lookup by key
    // ------------------------------------------------------------------------

    /// Value of a declared key. Nested fields use dotted paths
    /// (`theme.ViewHeaderHeight`, `userPanel.default`).
    ///
    /// [`Value::Unset`] is returned only for declared optional keys the
    /// definition leaves out. It marks absence; it is not a default value.
    pub fn get(&self, key: &str) -> Result<Value> {
        let value = match key.split_once('.') {
            None => self.top_level(key),
            Some(("userPanel", field)) => self.user_panel.field(field),
            Some(("onStartup", field)) => self.on_startup.field(field),
            Some(("onEmptyWorkspace", field)) => match &self.on_empty_workspace {
                Some(action) => action.field(field),
                None => StartupAction::KEYS.contains(&field).then_some(Value::Unset),
            },
            Some(("theme", field)) => self.theme.field(field),
            Some(_) => None,
        };
        value.ok_or_else(|| SettingsError::UnknownKey(key.to_string()))
    }

    /// Every declared leaf key, dotted for nested records
    pub fn keys() -> impl Iterator<Item = String> {
        const RECORDS: [&str; 4] = ["userPanel", "onStartup", "onEmptyWorkspace", "theme"];

        let top = REQUIRED_KEYS
            .into_iter()
            .chain(OPTIONAL_KEYS)
            .filter(|key| !RECORDS.contains(key))
            .map(str::to_string);
        let panel = UserPanel::KEYS.into_iter().map(|f| format!("userPanel.{f}"));
        let startup = StartupAction::KEYS.into_iter().map(|f| format!("onStartup.{f}"));
        let empty = StartupAction::KEYS.into_iter().map(|f| format!("onEmptyWorkspace.{f}"));
        let theme = Theme::KEYS.into_iter().map(|f| format!("theme.{f}"));

        top.chain(panel).chain(startup).chain(empty).chain(theme)
    }

    fn top_level(&self, key: &str) -> Option<Value> {
        let m = &self.metadata;
        let i = &self.interaction;
        let list = |items: &Option<Vec<String>>| match items {
            Some(items) => Value::List(items.clone()),
            None => Value::Unset,
        };

        let value = match key {
            "appName" => Value::from(m.app_name.as_str()),
            "version" => Value::from(m.version.as_str()),
            "licence" => Value::from(m.licence.as_str()),
            "build" => Value::from(m.build.as_str()),
            "releaseDate" => Value::from(m.release_date.as_str()),
            "logoImage" => Value::from(m.logo_image.as_str()),
            "logoOpen" => Value::from(m.logo_open.as_str()),
            "logoTitle" => m.logo_title.as_deref().map(Value::from).unwrap_or(Value::Unset),
            "providerSensitivityMillis" => Value::from(self.provider.sensitivity_millis),
            "providerRepeatMillis" => Value::from(self.provider.repeat_millis),
            "providerMinPrefetchSteps" => Value::from(self.provider.min_prefetch_steps),
            "providerMaxPrefetchSteps" => Value::from(self.provider.max_prefetch_steps),
            "loadingStateDelayMillis" => Value::from(self.loading_state_delay_millis),
            "logCapacity" => Value::from(self.log_capacity),
            "minimizeNumberOfConcurrentRequests" => Value::from(self.minimize_concurrent_requests),
            "showCommands" => Value::List(self.show_commands.as_slice().to_vec()),
            "userPanel" => record(&UserPanel::KEYS, |f| self.user_panel.field(f)),
            "onStartup" => record(&StartupAction::KEYS, |f| self.on_startup.field(f)),
            "onEmptyWorkspace" => match &self.on_empty_workspace {
                Some(action) => record(&StartupAction::KEYS, |f| action.field(f)),
                None => Value::Unset,
            },
            "northHeight" => self.north_height.map(Value::from).unwrap_or(Value::Unset),
            "styleSheets" => list(&self.style_sheets),
            "scripts" => list(&self.scripts),
            "clickSensitivityMillis" => Value::from(i.click_sensitivity_millis),
            "clickSensitivityDistance" => Value::from(i.click_sensitivity_distance),
            "actionSensitivityMillis" => Value::from(i.action_sensitivity_millis),
            "newsRefreshIntervalSeconds" => Value::from(i.news_refresh_interval_seconds),
            "dialogResizerWidth" => Value::from(i.dialog_resizer_width),
            "reducedInteractionStatusMinutes" => Value::from(i.reduced_interaction_status_minutes),
            "incomingChatMessageSound" => Value::from(self.chat_message_sound.as_str()),
            "incomingChatMessageVolume" => Value::Float(self.chat_message_volume),
            "exporterInputStepRows" => Value::from(self.exporter.input_step_rows),
            "exporterOutputStepRows" => Value::from(self.exporter.output_step_rows),
            "exporterSplitRowsThreshold" => Value::from(self.exporter.split_rows_threshold),
            "dataSelectorInputDelayMillis" => {
                Value::Delays(self.data_selector.input_delays.clone())
            }
            "dataSelectorInstantSearchMaxRows" => {
                Value::from(self.data_selector.instant_search_max_rows)
            }
            "dataSelectorCachingMaxRows" => Value::from(self.data_selector.caching_max_rows),
            "showGridFilterCommand" => Value::from(self.show_grid_filter_command),
            "theme" => self.theme.to_record(),
            window => return self.window_placement(window).map(Value::from),
        };
        Some(value)
    }

    fn window_placement(&self, key: &str) -> Option<WindowPlacement> {
        let w = &self.windows;
        let placement = match key {
            "gridEditWindow" => w.grid_edit,
            "gridNewRowWindow" => w.grid_new_row,
            "childEditWindow" => w.child_edit,
            "childNewRowWindow" => w.child_new_row,
            "relationEditWindow" => w.relation_edit,
            "relationNewRowWindow" => w.relation_new_row,
            "otherEditWindows" => w.other_edit,
            "otherNewRowWindows" => w.other_new_row,
            "newMailMessageWindow" => w.new_mail_message,
            _ => return None,
        };
        Some(placement)
    }

    /// Metric behind a `theme.*` key
    pub fn metric(&self, key: &str) -> Result<&Metric> {
        if let Some(metric) = key.strip_prefix("theme.").and_then(|f| self.theme.metric(f)) {
            return Ok(metric);
        }
        // Unknown keys report as such; known keys of another kind do not
        self.get(key)?;
        Err(SettingsError::wrong_kind(key, "breakpoint metric"))
    }

    /// Resolve a breakpoint metric for the current viewport size
    pub fn breakpoint_value(&self, key: &str, current_size: u32) -> Result<u32> {
        self.metric(key).map(|metric| metric.resolve(current_size))
    }

    pub fn delay_sequence(&self, key: &str) -> Result<&DelaySequence> {
        match key {
            "dataSelectorInputDelayMillis" => Ok(&self.data_selector.input_delays),
            _ => {
                self.get(key)?;
                Err(SettingsError::wrong_kind(key, "delay sequence"))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------------

    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    pub fn app_name(&self) -> &str {
        &self.metadata.app_name
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    pub fn build(&self) -> &str {
        &self.metadata.build
    }

    pub fn release_date(&self) -> &str {
        &self.metadata.release_date
    }

    pub fn provider(&self) -> &ProviderSettings {
        &self.provider
    }

    pub fn loading_state_delay(&self) -> Duration {
        Duration::from_millis(self.loading_state_delay_millis)
    }

    pub fn log_capacity(&self) -> u64 {
        self.log_capacity
    }

    pub fn minimize_concurrent_requests(&self) -> bool {
        self.minimize_concurrent_requests
    }

    pub fn show_commands(&self) -> &CommandList {
        &self.show_commands
    }

    pub fn user_panel(&self) -> &UserPanel {
        &self.user_panel
    }

    pub fn startup_action(&self) -> &StartupAction {
        &self.on_startup
    }

    /// What to open when the restored workspace is empty. Nothing is opened
    /// when the definition has no `onEmptyWorkspace`.
    pub fn empty_workspace_action(&self) -> Option<&StartupAction> {
        self.on_empty_workspace.as_ref()
    }

    /// Header height if configured and positive, else `default`
    pub fn north_height_or(&self, default: u32) -> u32 {
        self.north_height.filter(|h| *h > 0).unwrap_or(default)
    }

    pub fn style_sheets(&self) -> &[String] {
        self.style_sheets.as_deref().unwrap_or_default()
    }

    pub fn scripts(&self) -> &[String] {
        self.scripts.as_deref().unwrap_or_default()
    }

    pub fn interaction(&self) -> &InteractionSettings {
        &self.interaction
    }

    pub fn chat_message_sound(&self) -> &str {
        &self.chat_message_sound
    }

    pub fn chat_message_volume(&self) -> f64 {
        self.chat_message_volume
    }

    pub fn exporter(&self) -> &ExporterSettings {
        &self.exporter
    }

    pub fn data_selector(&self) -> &DataSelectorSettings {
        &self.data_selector
    }

    pub fn show_grid_filter_command(&self) -> bool {
        self.show_grid_filter_command
    }

    pub fn window_policy(&self) -> &WindowPolicy {
        &self.windows
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

fn non_empty(key: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(SettingsError::Schema(format!("'{key}' must not be empty")));
    }
    Ok(value)
}

fn startup_action(key: &str, action: StartupAction) -> Result<StartupAction> {
    if action.content.trim().is_empty() {
        return Err(SettingsError::Schema(format!("'{key}.content' must not be empty")));
    }
    Ok(action)
}

fn list_items(key: &str, items: Option<Vec<String>>) -> Result<Option<Vec<String>>> {
    if let Some(items) = &items {
        if items.iter().any(|item| item.trim().is_empty()) {
            return Err(SettingsError::Schema(format!("'{key}' contains an empty entry")));
        }
    }
    Ok(items)
}

fn record(keys: &[&str], field: impl Fn(&str) -> Option<Value>) -> Value {
    let fields = keys
        .iter()
        .filter_map(|key| field(key).map(|value| (key.to_string(), value)))
        .collect();
    Value::Record(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Surface, WindowAction};

    fn builtin() -> SettingsDocument {
        SettingsDocument::builtin().unwrap()
    }

    #[test]
    fn test_builtin_loads() {
        let settings = builtin();
        assert_eq!(settings.app_name(), "B-NOVO");
        assert_eq!(settings.version(), "2.156");
        assert_eq!(settings.build(), "4892");
        assert_eq!(settings.release_date(), "2017.09.29");
        assert_eq!(settings.provider().max_prefetch_steps, 100);
        assert_eq!(settings.user_panel().default_panel, UserPanelKind::Notification);
        assert_eq!(settings.startup_action().content, "form_AnnouncementsBoard");
        assert!(settings.startup_action().forced_on_everyone());
    }

    #[test]
    fn test_get_known_keys() {
        let settings = builtin();
        assert_eq!(settings.get("appName").unwrap(), Value::Text("B-NOVO".into()));
        assert_eq!(settings.get("logCapacity").unwrap(), Value::Integer(10000));
        assert_eq!(settings.get("incomingChatMessageVolume").unwrap(), Value::Float(0.5));
        assert_eq!(
            settings.get("childEditWindow").unwrap(),
            Value::Placement(WindowPlacement::Modal)
        );
        assert_eq!(
            settings.get("userPanel.default").unwrap(),
            Value::Panel(UserPanelKind::Notification)
        );
        assert_eq!(settings.get("theme.GridMarginLeft").unwrap(), Value::Integer(10));
        assert_eq!(
            settings.get("showCommands").unwrap(),
            Value::List(vec![
                "mail".into(),
                "users".into(),
                "chat".into(),
                "company_structure".into()
            ])
        );
    }

    #[test]
    fn test_get_records() {
        let settings = builtin();
        match settings.get("onStartup").unwrap() {
            Value::Record(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields["force"], Value::Text("*".into()));
            }
            other => panic!("expected record, got {other:?}"),
        }
        match settings.get("theme").unwrap() {
            Value::Record(fields) => assert_eq!(fields.len(), Theme::KEYS.len()),
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn test_get_unknown_key() {
        let settings = builtin();
        for key in ["views", "theme.Nope", "userPanel.defaults", "bogus.key", "", "theme."] {
            match settings.get(key) {
                Err(SettingsError::UnknownKey(k)) => assert_eq!(k, key),
                other => panic!("{key}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_optional_keys_unset() {
        let settings = builtin();
        for key in OPTIONAL_KEYS {
            assert!(settings.get(key).unwrap().is_unset(), "{key}");
        }
        assert!(settings.get("onEmptyWorkspace.content").unwrap().is_unset());
        assert!(settings.get("onEmptyWorkspace.other").is_err());
    }

    #[test]
    fn test_every_key_resolves() {
        let settings = builtin();
        for key in SettingsDocument::keys() {
            assert!(settings.get(&key).is_ok(), "{key}");
        }
    }

    #[test]
    fn test_breakpoint_value() {
        let settings = builtin();
        assert_eq!(settings.breakpoint_value("theme.ViewHeaderHeight", 599).unwrap(), 30);
        assert_eq!(settings.breakpoint_value("theme.ViewHeaderHeight", 600).unwrap(), 52);
        assert_eq!(settings.breakpoint_value("theme.ViewHeaderHeight", 1199).unwrap(), 52);
        assert_eq!(settings.breakpoint_value("theme.ChildViewHeaderHeight", 100).unwrap(), 30);
    }

    #[test]
    fn test_breakpoint_value_errors() {
        let settings = builtin();
        assert!(matches!(
            settings.breakpoint_value("theme.Missing", 10),
            Err(SettingsError::UnknownKey(_))
        ));
        assert!(matches!(
            settings.breakpoint_value("theme.GridMarginLeft", 10),
            Err(SettingsError::WrongKind { .. })
        ));
        assert!(matches!(
            settings.breakpoint_value("appName", 10),
            Err(SettingsError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_delay_sequence() {
        let settings = builtin();
        let delays = settings.delay_sequence("dataSelectorInputDelayMillis").unwrap();
        assert_eq!(delays.as_millis(), &[500, 500, 400, 300, 200]);
        // Reading again gives the same, untouched sequence
        let again = settings.delay_sequence("dataSelectorInputDelayMillis").unwrap();
        assert_eq!(delays.iter().collect::<Vec<_>>(), again.iter().collect::<Vec<_>>());

        assert!(matches!(
            settings.delay_sequence("logCapacity"),
            Err(SettingsError::WrongKind { .. })
        ));
        assert!(matches!(
            settings.delay_sequence("searchDelays"),
            Err(SettingsError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_window_policy() {
        let settings = builtin();
        let policy = settings.window_policy();
        assert_eq!(policy.for_surface(Surface::Grid, WindowAction::Edit), WindowPlacement::OnTop);
        assert_eq!(policy.for_surface(Surface::Other, WindowAction::Edit), WindowPlacement::NewTab);
        assert_eq!(policy.new_mail_message, WindowPlacement::Detached);
    }

    #[test]
    fn test_round_trip() {
        let settings = builtin();
        let again = SettingsDocument::load(settings.to_definition()).unwrap();
        assert_eq!(settings, again);

        let json = settings.to_json().unwrap();
        assert_eq!(SettingsDocument::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_empty_workspace_opens_nothing_by_default() {
        let settings = builtin();
        assert!(settings.on_empty_workspace.is_none());
        assert_eq!(settings.empty_workspace_action(), None);
        // onStartup is only used on a fresh start
        assert_eq!(settings.startup_action().content, "form_AnnouncementsBoard");
    }

    #[test]
    fn test_fallbacks() {
        let settings = builtin();
        assert_eq!(settings.north_height_or(40), 40);
        assert!(settings.style_sheets().is_empty());
        assert!(settings.scripts().is_empty());
        assert_eq!(settings.provider().clamp_prefetch(0), 1);
        assert_eq!(settings.provider().clamp_prefetch(500), 100);
    }
}

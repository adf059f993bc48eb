//! `bnovo-config` — front-end settings for the B-NOVO web client.
//!
//! A typed, validated view of the settings definition: application metadata,
//! timing thresholds, window placement policy and theme metrics. Loaded once,
//! read-only afterwards.

pub mod definition;
pub mod error;
pub mod packed;
pub mod settings;
pub mod shared;
pub mod theme;
pub mod window;

pub use definition::SettingsDefinition;
pub use error::{Result, SettingsError};
pub use packed::{Breakpoints, CommandList, DelaySequence, Metric, PackedValue};
pub use settings::{SettingsDocument, StartupAction, UserPanel, UserPanelKind, Value};
pub use theme::{FontWeight, Padding, Theme};
pub use window::{Surface, WindowAction, WindowPlacement, WindowPolicy};

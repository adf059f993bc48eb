// Theme configuration
// Layout metrics for views, grids and inputs. Row and header heights may
// scale with the viewport through a packed breakpoint table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SettingsError};
use crate::packed::{Metric, PackedValue};
use crate::settings::Value;

/// Footer font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// CSS padding shorthand in pixels ("1px 10px")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub fn parse(key: &str, raw: &str) -> Result<Self> {
        let lengths = raw
            .split_whitespace()
            .map(|part| {
                Self::parse_length(part).ok_or_else(|| {
                    SettingsError::format(key, raw, format!("'{part}' is not a pixel length"))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        // Same expansion rules as CSS: 1 to 4 values, clockwise from top
        match lengths.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(SettingsError::format(
                key,
                raw,
                format!("expected 1 to 4 lengths, found {}", lengths.len()),
            )),
        }
    }

    pub const fn uniform(px: u32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    fn parse_length(part: &str) -> Option<u32> {
        // Unitless zero is valid CSS
        if part == "0" {
            return Some(0);
        }
        part.strip_suffix("px")?.parse().ok()
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Padding {
            top,
            right,
            bottom,
            left,
        } = *self;
        if right != left {
            write!(f, "{top}px {right}px {bottom}px {left}px")
        } else if top != bottom {
            write!(f, "{top}px {right}px {bottom}px")
        } else if top != right {
            write!(f, "{top}px {right}px")
        } else {
            write!(f, "{top}px")
        }
    }
}

/// Literal theme record, as written in the settings definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ThemeConfig {
    pub workspace_margin_right: u32,
    pub view_header_height: PackedValue,
    pub child_view_header_height: PackedValue,
    pub view_action_create_new: bool,
    pub grid_action_create_new: bool,
    pub child_action_create_new: bool,
    pub action_save_large: bool,
    pub grid_header_row_height: PackedValue,
    pub grid_body_row_height: PackedValue,
    pub grid_margin_left: u32,
    pub grid_footer_font: FontWeight,
    pub child_grid_header_row_height: PackedValue,
    pub child_grid_body_row_height: PackedValue,
    pub child_grid_margin_left: u32,
    pub child_grid_footer_font: FontWeight,
    pub appliance_header_height: u32,
    pub sub_menu_line_height: u32,
    pub workspace_tab_height: u32,
    pub input_line_height: u32,
    pub input_padding: String,
    pub list_size1_padding: String,
}

/// Runtime theme metrics, packed fields already parsed
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub workspace_margin_right: u32,
    pub view_header_height: Metric,
    pub child_view_header_height: Metric,
    pub view_action_create_new: bool,
    pub grid_action_create_new: bool,
    pub child_action_create_new: bool,
    pub action_save_large: bool,
    pub grid_header_row_height: Metric,
    pub grid_body_row_height: Metric,
    pub grid_margin_left: u32,
    pub grid_footer_font: FontWeight,
    pub child_grid_header_row_height: Metric,
    pub child_grid_body_row_height: Metric,
    pub child_grid_margin_left: u32,
    pub child_grid_footer_font: FontWeight,
    pub appliance_header_height: u32,
    pub sub_menu_line_height: u32,
    pub workspace_tab_height: u32,
    pub input_line_height: u32,
    pub input_padding: Padding,
    pub list_size1_padding: Padding,
}

impl Theme {
    /// Field names as they appear in the definition, in definition order.
    pub const KEYS: [&'static str; 21] = [
        "WorkspaceMarginRight",
        "ViewHeaderHeight",
        "ChildViewHeaderHeight",
        "ViewActionCreateNew",
        "GridActionCreateNew",
        "ChildActionCreateNew",
        "ActionSaveLarge",
        "GridHeaderRowHeight",
        "GridBodyRowHeight",
        "GridMarginLeft",
        "GridFooterFont",
        "ChildGridHeaderRowHeight",
        "ChildGridBodyRowHeight",
        "ChildGridMarginLeft",
        "ChildGridFooterFont",
        "ApplianceHeaderHeight",
        "SubMenuLineHeight",
        "WorkspaceTabHeight",
        "InputLineHeight",
        "InputPadding",
        "ListSize1Padding",
    ];

    /// Create a Theme from a ThemeConfig, parsing every packed field
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let metric = |name: &str, packed: &PackedValue| {
            Metric::from_packed(&format!("theme.{name}"), packed)
        };
        let padding = |name: &str, raw: &str| Padding::parse(&format!("theme.{name}"), raw);

        Ok(Theme {
            workspace_margin_right: config.workspace_margin_right,
            view_header_height: metric("ViewHeaderHeight", &config.view_header_height)?,
            child_view_header_height: metric(
                "ChildViewHeaderHeight",
                &config.child_view_header_height,
            )?,
            view_action_create_new: config.view_action_create_new,
            grid_action_create_new: config.grid_action_create_new,
            child_action_create_new: config.child_action_create_new,
            action_save_large: config.action_save_large,
            grid_header_row_height: metric("GridHeaderRowHeight", &config.grid_header_row_height)?,
            grid_body_row_height: metric("GridBodyRowHeight", &config.grid_body_row_height)?,
            grid_margin_left: config.grid_margin_left,
            grid_footer_font: config.grid_footer_font,
            child_grid_header_row_height: metric(
                "ChildGridHeaderRowHeight",
                &config.child_grid_header_row_height,
            )?,
            child_grid_body_row_height: metric(
                "ChildGridBodyRowHeight",
                &config.child_grid_body_row_height,
            )?,
            child_grid_margin_left: config.child_grid_margin_left,
            child_grid_footer_font: config.child_grid_footer_font,
            appliance_header_height: config.appliance_header_height,
            sub_menu_line_height: config.sub_menu_line_height,
            workspace_tab_height: config.workspace_tab_height,
            input_line_height: config.input_line_height,
            input_padding: padding("InputPadding", &config.input_padding)?,
            list_size1_padding: padding("ListSize1Padding", &config.list_size1_padding)?,
        })
    }

    /// Back to the literal form (canonical packed strings)
    pub fn to_config(&self) -> ThemeConfig {
        ThemeConfig {
            workspace_margin_right: self.workspace_margin_right,
            view_header_height: self.view_header_height.to_packed(),
            child_view_header_height: self.child_view_header_height.to_packed(),
            view_action_create_new: self.view_action_create_new,
            grid_action_create_new: self.grid_action_create_new,
            child_action_create_new: self.child_action_create_new,
            action_save_large: self.action_save_large,
            grid_header_row_height: self.grid_header_row_height.to_packed(),
            grid_body_row_height: self.grid_body_row_height.to_packed(),
            grid_margin_left: self.grid_margin_left,
            grid_footer_font: self.grid_footer_font,
            child_grid_header_row_height: self.child_grid_header_row_height.to_packed(),
            child_grid_body_row_height: self.child_grid_body_row_height.to_packed(),
            child_grid_margin_left: self.child_grid_margin_left,
            child_grid_footer_font: self.child_grid_footer_font,
            appliance_header_height: self.appliance_header_height,
            sub_menu_line_height: self.sub_menu_line_height,
            workspace_tab_height: self.workspace_tab_height,
            input_line_height: self.input_line_height,
            input_padding: self.input_padding.to_string(),
            list_size1_padding: self.list_size1_padding.to_string(),
        }
    }

    /// Look up a metric field by its definition name
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        match name {
            "ViewHeaderHeight" => Some(&self.view_header_height),
            "ChildViewHeaderHeight" => Some(&self.child_view_header_height),
            "GridHeaderRowHeight" => Some(&self.grid_header_row_height),
            "GridBodyRowHeight" => Some(&self.grid_body_row_height),
            "ChildGridHeaderRowHeight" => Some(&self.child_grid_header_row_height),
            "ChildGridBodyRowHeight" => Some(&self.child_grid_body_row_height),
            _ => None,
        }
    }

    /// Look up any field by its definition name
    pub fn field(&self, name: &str) -> Option<Value> {
        if let Some(metric) = self.metric(name) {
            return Some(Value::Metric(*metric));
        }

        let value = match name {
            "WorkspaceMarginRight" => Value::from(self.workspace_margin_right),
            "GridMarginLeft" => Value::from(self.grid_margin_left),
            "ChildGridMarginLeft" => Value::from(self.child_grid_margin_left),
            "ApplianceHeaderHeight" => Value::from(self.appliance_header_height),
            "SubMenuLineHeight" => Value::from(self.sub_menu_line_height),
            "WorkspaceTabHeight" => Value::from(self.workspace_tab_height),
            "InputLineHeight" => Value::from(self.input_line_height),
            "ViewActionCreateNew" => Value::Bool(self.view_action_create_new),
            "GridActionCreateNew" => Value::Bool(self.grid_action_create_new),
            "ChildActionCreateNew" => Value::Bool(self.child_action_create_new),
            "ActionSaveLarge" => Value::Bool(self.action_save_large),
            "GridFooterFont" => Value::Font(self.grid_footer_font),
            "ChildGridFooterFont" => Value::Font(self.child_grid_footer_font),
            "InputPadding" => Value::Padding(self.input_padding),
            "ListSize1Padding" => Value::Padding(self.list_size1_padding),
            _ => return None,
        };
        Some(value)
    }

    /// Every field as a record value
    pub fn to_record(&self) -> Value {
        let record: BTreeMap<String, Value> = Self::KEYS
            .iter()
            .filter_map(|key| self.field(key).map(|value| (key.to_string(), value)))
            .collect();
        Value::Record(record)
    }
}

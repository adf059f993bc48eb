// Window placement policy
// How each kind of editing surface is presented to the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation of a UI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowPlacement {
    /// Overlay above the current view
    OnTop,
    /// Modal dialog
    Modal,
    /// New workspace tab
    NewTab,
    /// Separate, detached window
    Detached,
}

impl WindowPlacement {
    pub const ALL: [WindowPlacement; 4] = [
        WindowPlacement::OnTop,
        WindowPlacement::Modal,
        WindowPlacement::NewTab,
        WindowPlacement::Detached,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPlacement::OnTop => "on-top",
            WindowPlacement::Modal => "modal",
            WindowPlacement::NewTab => "new-tab",
            WindowPlacement::Detached => "detached",
        }
    }

    /// Returns true if the surface blocks interaction with the view below it.
    pub fn is_blocking(&self) -> bool {
        matches!(self, WindowPlacement::Modal)
    }
}

impl fmt::Display for WindowPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown window placement '{s}'"))
    }
}

/// Kind of surface a row is opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Top-level data grid
    Grid,
    /// Grid embedded in a parent form
    Child,
    /// Row reached through a relation (lookup) field
    Relation,
    /// Anything else
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAction {
    Edit,
    NewRow,
}

/// Placement for every (surface, action) pair, plus the mail composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    pub grid_edit: WindowPlacement,
    pub grid_new_row: WindowPlacement,
    pub child_edit: WindowPlacement,
    pub child_new_row: WindowPlacement,
    pub relation_edit: WindowPlacement,
    pub relation_new_row: WindowPlacement,
    pub other_edit: WindowPlacement,
    pub other_new_row: WindowPlacement,
    pub new_mail_message: WindowPlacement,
}

impl WindowPolicy {
    pub fn for_surface(&self, surface: Surface, action: WindowAction) -> WindowPlacement {
        match (surface, action) {
            (Surface::Grid, WindowAction::Edit) => self.grid_edit,
            (Surface::Grid, WindowAction::NewRow) => self.grid_new_row,
            (Surface::Child, WindowAction::Edit) => self.child_edit,
            (Surface::Child, WindowAction::NewRow) => self.child_new_row,
            (Surface::Relation, WindowAction::Edit) => self.relation_edit,
            (Surface::Relation, WindowAction::NewRow) => self.relation_new_row,
            (Surface::Other, WindowAction::Edit) => self.other_edit,
            (Surface::Other, WindowAction::NewRow) => self.other_new_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_names() {
        for placement in WindowPlacement::ALL {
            assert_eq!(placement.as_str().parse::<WindowPlacement>().unwrap(), placement);
            let json = serde_json::to_string(&placement).unwrap();
            assert_eq!(json, format!("\"{}\"", placement.as_str()));
        }
    }

    #[test]
    fn test_placement_closed_set() {
        assert!("popup".parse::<WindowPlacement>().is_err());
        assert!("On-Top".parse::<WindowPlacement>().is_err());
        assert!(serde_json::from_str::<WindowPlacement>("\"new_tab\"").is_err());
    }

    #[test]
    fn test_for_surface() {
        let policy = WindowPolicy {
            grid_edit: WindowPlacement::OnTop,
            grid_new_row: WindowPlacement::OnTop,
            child_edit: WindowPlacement::Modal,
            child_new_row: WindowPlacement::Modal,
            relation_edit: WindowPlacement::NewTab,
            relation_new_row: WindowPlacement::Modal,
            other_edit: WindowPlacement::NewTab,
            other_new_row: WindowPlacement::Modal,
            new_mail_message: WindowPlacement::Detached,
        };
        assert_eq!(
            policy.for_surface(Surface::Relation, WindowAction::Edit),
            WindowPlacement::NewTab
        );
        assert_eq!(
            policy.for_surface(Surface::Relation, WindowAction::NewRow),
            WindowPlacement::Modal
        );
        assert!(policy.for_surface(Surface::Child, WindowAction::Edit).is_blocking());
    }
}

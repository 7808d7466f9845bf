// file: src/models/calendar.rs
use serde::{Deserialize, Serialize};

/// A calendar as reported by the provider. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub primary: bool,
}

impl Calendar {
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            description: None,
            primary: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn as_primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

pub const DEFAULT_ICON: &str = "✅";
pub const CALENDAR_ICON: &str = "📅";
pub const PRIMARY_LABEL: &str = "Primary";
pub const CURRENT_DEFAULT_LABEL: &str = "Current Default";

/// One row of the selectable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub is_default: bool,
    pub is_primary: bool,
}

impl CalendarEntry {
    pub fn from_calendar(calendar: &Calendar, default_calendar: &str) -> Self {
        Self {
            id: calendar.id.clone(),
            title: calendar.summary.clone(),
            subtitle: calendar.description.clone().unwrap_or_default(),
            is_default: calendar.id == default_calendar,
            is_primary: calendar.primary,
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.is_default {
            DEFAULT_ICON
        } else {
            CALENDAR_ICON
        }
    }

    /// Accessory texts in display order; empty when the marker does not apply.
    pub fn accessories(&self) -> [&'static str; 2] {
        [
            if self.is_primary { PRIMARY_LABEL } else { "" },
            if self.is_default { CURRENT_DEFAULT_LABEL } else { "" },
        ]
    }

    /// Case-insensitive substring match over every rendered field.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let [primary, default] = self.accessories();
        [self.title.as_str(), self.subtitle.as_str(), primary, default]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_markers() {
        let calendar = Calendar::new("cal_A", "Work").with_description("Team stuff").as_primary();
        let entry = CalendarEntry::from_calendar(&calendar, "cal_A");

        assert!(entry.is_default);
        assert!(entry.is_primary);
        assert_eq!(entry.icon(), DEFAULT_ICON);
        assert_eq!(entry.accessories(), [PRIMARY_LABEL, CURRENT_DEFAULT_LABEL]);
        assert_eq!(entry.subtitle, "Team stuff");
    }

    #[test]
    fn test_entry_without_markers() {
        let entry = CalendarEntry::from_calendar(&Calendar::new("cal_B", "Home"), "primary");

        assert!(!entry.is_default);
        assert_eq!(entry.icon(), CALENDAR_ICON);
        assert_eq!(entry.accessories(), ["", ""]);
        assert_eq!(entry.subtitle, "");
    }

    #[test]
    fn test_matches_rendered_fields() {
        let calendar = Calendar::new("cal_A", "Work").with_description("Team Standups");
        let entry = CalendarEntry::from_calendar(&calendar, "cal_A");

        assert!(entry.matches(""));
        assert!(entry.matches("  "));
        assert!(entry.matches("work"));
        assert!(entry.matches("STANDUP"));
        assert!(entry.matches("current default"));
        assert!(!entry.matches("primary"));
        // ids are not rendered, so they are not searched
        assert!(!entry.matches("cal_a"));
    }
}

// file: src/models/preferences.rs
use serde::{Deserialize, Serialize};

/// Storage key holding the default calendar id.
pub const DEFAULT_CALENDAR_KEY: &str = "defaultCalendar";
/// Storage key holding the JSON array of hidden calendar ids.
pub const HIDDEN_CALENDARS_KEY: &str = "hiddenCalendars";
/// Sentinel default meaning "the provider's primary calendar".
pub const PRIMARY_CALENDAR: &str = "primary";

/// Insertion-ordered set of hidden calendar ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenCalendars(Vec<String>);

impl HiddenCalendars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored value. Anything that is not a JSON array of strings yields an empty set.
    pub fn from_stored(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                log::debug!("Ignoring malformed hidden calendar list: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Returns false when the id was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|hidden| hidden == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for HiddenCalendars {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut hidden = Self::default();
        for id in iter {
            hidden.insert(id);
        }
        hidden
    }
}

//! Preference store abstraction
//!
//! A durable string-keyed map. The selector only ever touches the two keys
//! in [`crate::models::preferences`], through the typed helpers below.

use crate::error::AppResult;
use crate::models::{HiddenCalendars, DEFAULT_CALENDAR_KEY, HIDDEN_CALENDARS_KEY, PRIMARY_CALENDAR};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Stored default calendar, or the `"primary"` sentinel when absent.
pub async fn load_default_calendar(store: &dyn PreferenceStore) -> AppResult<String> {
    Ok(store
        .get(DEFAULT_CALENDAR_KEY)
        .await?
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| PRIMARY_CALENDAR.to_string()))
}

/// Stored hidden set. Only a failing read is an error; absent or malformed data is empty.
pub async fn load_hidden_calendars(store: &dyn PreferenceStore) -> AppResult<HiddenCalendars> {
    Ok(store
        .get(HIDDEN_CALENDARS_KEY)
        .await?
        .map(|raw| HiddenCalendars::from_stored(&raw))
        .unwrap_or_default())
}

pub async fn save_default_calendar(store: &dyn PreferenceStore, calendar_id: &str) -> AppResult<()> {
    store.set(DEFAULT_CALENDAR_KEY, calendar_id).await
}

pub async fn save_hidden_calendars(store: &dyn PreferenceStore, hidden: &HiddenCalendars) -> AppResult<()> {
    let value = hidden.to_stored()?;
    store.set(HIDDEN_CALENDARS_KEY, &value).await
}

//! Default-calendar selector
//!
//! Owns the view state of the "Select Default Calendar" screen and the
//! three user actions on it. All collaborators are trait objects so the
//! same selector runs under the iced shell and in tests.
//!
//! Every action reports its own outcome through the [`Notifier`]; the
//! returned `AppResult` is informational for the caller and has already
//! been surfaced to the user when it is an error.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::RwLock;

use crate::auth::Authorizer;
use crate::calendar::CalendarLister;
use crate::error::{AppError, AppResult};
use crate::models::{Calendar, CalendarEntry, HiddenCalendars, Toast, PRIMARY_CALENDAR};
use crate::preferences::{self, PreferenceStore};
use crate::surfaces::{Clipboard, Navigator, Notifier};
use crate::utils::logging;

pub const SECTION_TITLE: &str = "Select Default Calendar";
pub const SEARCH_PLACEHOLDER: &str = "Search calendars...";

pub const FETCH_FAILED: &str = "Failed to fetch calendars";
pub const SELECT_FAILED: &str = "Failed to update default calendar";
pub const HIDE_FAILED: &str = "Failed to hide calendar";
pub const COPY_FAILED: &str = "Failed to copy calendar ID";

pub const DEFAULT_UPDATED: &str = "Default Calendar Updated";
pub const CALENDAR_HIDDEN: &str = "Calendar Hidden";
pub const ID_COPIED: &str = "Copied to Clipboard";

/// Transient state of one selector activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub calendars: Vec<Calendar>,
    pub default_calendar: String,
    pub hidden: HiddenCalendars,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            calendars: Vec::new(),
            default_calendar: PRIMARY_CALENDAR.to_string(),
            hidden: HiddenCalendars::new(),
        }
    }
}

impl ViewState {
    pub fn is_visible(&self, calendar_id: &str) -> bool {
        !self.hidden.contains(calendar_id) && self.calendars.iter().any(|c| c.id == calendar_id)
    }

    pub fn visible_calendars(&self) -> impl Iterator<Item = &Calendar> {
        self.calendars.iter().filter(|c| !self.hidden.contains(&c.id))
    }

    /// Rows for every calendar that is not hidden, in provider order.
    pub fn entries(&self) -> Vec<CalendarEntry> {
        self.visible_calendars()
            .map(|c| CalendarEntry::from_calendar(c, &self.default_calendar))
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<CalendarEntry> {
        self.entries().into_iter().filter(|e| e.matches(query)).collect()
    }
}

/// Everything the selector talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub authorizer: Arc<dyn Authorizer>,
    pub lister: Arc<dyn CalendarLister>,
    pub store: Arc<dyn PreferenceStore>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub clipboard: Arc<dyn Clipboard>,
}

#[derive(Clone)]
pub struct DefaultCalendarSelector {
    deps: Collaborators,
    state: Arc<RwLock<ViewState>>,
}

impl DefaultCalendarSelector {
    pub fn new(deps: Collaborators) -> Self {
        Self {
            deps,
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Reads preferences, authorizes and fetches the calendar list, in that order.
    /// Loading always ends, and any failure becomes one notification.
    pub async fn load(&self) -> AppResult<()> {
        info!("Loading default calendar selector");
        self.state.write().await.loading = true;

        let result = self.initialize().await;
        if let Err(e) = &result {
            logging::log_error_with_context(e, FETCH_FAILED);
            self.deps.notifier.notify(Toast::failure(FETCH_FAILED, e)).await;
        }

        self.state.write().await.loading = false;
        result
    }

    async fn initialize(&self) -> AppResult<()> {
        let store = self.deps.store.as_ref();

        let default_calendar = preferences::load_default_calendar(store).await?;
        info!("Current default calendar: {}", default_calendar);
        self.state.write().await.default_calendar = default_calendar;

        let hidden = preferences::load_hidden_calendars(store).await?;
        info!("{} calendars hidden", hidden.len());
        self.state.write().await.hidden = hidden;

        let token = self.deps.authorizer.authorize().await?;
        let calendars = self.deps.lister.list_calendars(&token).await?;
        self.state.write().await.calendars = calendars;

        Ok(())
    }

    /// Persists `calendar_id` as the default and closes the screen.
    pub async fn select_default(&self, calendar_id: &str, calendar_name: &str) -> AppResult<()> {
        info!("Setting default calendar to {}", calendar_id);

        let result = self.try_select_default(calendar_id, calendar_name).await;
        if let Err(e) = &result {
            logging::log_error_with_context(e, SELECT_FAILED);
            self.deps.notifier.notify(Toast::failure(SELECT_FAILED, e)).await;
        }
        result
    }

    async fn try_select_default(&self, calendar_id: &str, calendar_name: &str) -> AppResult<()> {
        if !self.state.read().await.is_visible(calendar_id) {
            return Err(AppError::invalid_input(format!(
                "Calendar '{}' is not in the list",
                calendar_id
            )));
        }

        preferences::save_default_calendar(self.deps.store.as_ref(), calendar_id).await?;
        self.state.write().await.default_calendar = calendar_id.to_string();

        self.deps
            .notifier
            .notify(Toast::success(
                DEFAULT_UPDATED,
                format!("New events will be created in \"{}\"", calendar_name),
            ))
            .await;

        self.deps.navigator.pop_to_root().await
    }

    /// Hides `calendar_id` from the list. Hiding the current default resets it to `"primary"`.
    ///
    /// The in-memory hidden set is updated before anything is written and is not
    /// rolled back if a write fails.
    pub async fn hide_calendar(&self, calendar_id: &str, calendar_name: &str) -> AppResult<()> {
        info!("Hiding calendar {}", calendar_id);

        let result = self.try_hide_calendar(calendar_id, calendar_name).await;
        if let Err(e) = &result {
            logging::log_error_with_context(e, HIDE_FAILED);
            self.deps.notifier.notify(Toast::failure(HIDE_FAILED, e)).await;
        }
        result
    }

    async fn try_hide_calendar(&self, calendar_id: &str, calendar_name: &str) -> AppResult<()> {
        let store = self.deps.store.as_ref();

        let hidden = {
            let mut state = self.state.write().await;
            if !state.hidden.insert(calendar_id) {
                warn!("Calendar {} was already hidden", calendar_id);
            }
            state.hidden.clone()
        };
        preferences::save_hidden_calendars(store, &hidden).await?;

        let was_default = self.state.read().await.default_calendar == calendar_id;
        if was_default {
            info!("Hidden calendar was the default, resetting to {}", PRIMARY_CALENDAR);
            preferences::save_default_calendar(store, PRIMARY_CALENDAR).await?;
            self.state.write().await.default_calendar = PRIMARY_CALENDAR.to_string();
        }

        self.deps
            .notifier
            .notify(Toast::success(
                CALENDAR_HIDDEN,
                format!("\"{}\" has been hidden from the list", calendar_name),
            ))
            .await;
        Ok(())
    }

    /// Puts the calendar id on the clipboard. No state changes.
    pub async fn copy_calendar_id(&self, calendar_id: &str) -> AppResult<()> {
        match self.deps.clipboard.write_text(calendar_id).await {
            Ok(()) => {
                self.deps
                    .notifier
                    .notify(Toast::success(ID_COPIED, calendar_id))
                    .await;
                Ok(())
            }
            Err(e) => {
                logging::log_error_with_context(&e, COPY_FAILED);
                self.deps.notifier.notify(Toast::failure(COPY_FAILED, &e)).await;
                Err(e)
            }
        }
    }
}

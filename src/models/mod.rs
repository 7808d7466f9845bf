// Declare modules
pub mod calendar;
pub mod preferences;
pub mod toast;

// Re-export so callers can use `crate::models::Calendar` directly.
pub use calendar::{Calendar, CalendarEntry};
pub use preferences::{HiddenCalendars, DEFAULT_CALENDAR_KEY, HIDDEN_CALENDARS_KEY, PRIMARY_CALENDAR};
pub use toast::{Toast, ToastStyle};

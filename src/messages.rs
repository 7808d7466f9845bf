use crate::selector::ViewState;
use crate::surfaces::SurfaceEvent;

/// Unified application message type
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Form Input Messages =====
    /// Update the search bar
    SearchChanged(String),

    // ===== Calendar Actions =====
    /// Make the calendar the default for new events
    SetDefault { id: String, name: String },
    /// Hide the calendar from the list
    HideCalendar { id: String, name: String },
    /// Copy the calendar id to the clipboard
    CopyCalendarId(String),
    /// Close the toast bar
    DismissToast,

    // ===== Async Operation Results =====
    /// A selector operation finished; carries the state it left behind
    StateChanged(ViewState),

    // ===== Surface Messages =====
    /// Notification, navigation or clipboard request from the selector
    Surface(SurfaceEvent),
}

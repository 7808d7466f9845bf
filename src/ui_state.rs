//! UI state management module
//!
//! Shell-only state that the selector core does not care about.

use crate::models::Toast;

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Search bar contents
    pub search_query: String,

    /// Most recent notification, until dismissed or replaced
    pub toast: Option<Toast>,

    /// Number of selector operations still running
    pub pending_operations: usize,

    /// Set once the screen has been asked to close
    pub closing: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending_operations > 0 || self.closing
    }

    pub fn begin_operation(&mut self) {
        self.pending_operations += 1;
    }

    pub fn end_operation(&mut self) {
        self.pending_operations = self.pending_operations.saturating_sub(1);
    }
}

// file: src/models/toast.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.into(),
            message: Some(message.into()),
        }
    }

    /// Failure toasts carry the underlying error as their body.
    pub fn failure(title: impl Into<String>, error: &dyn std::error::Error) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.into(),
            message: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.style == ToastStyle::Failure
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.title, message),
            None => write!(f, "{}", self.title),
        }
    }
}

// Calendar integration module
// Lists the calendars visible to the authorized user

use crate::error::AppResult;
use crate::models::Calendar;
use async_trait::async_trait;

pub mod google;

pub use google::GoogleCalendarLister;

/// Returns the user's calendars, in provider order, for a bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarLister: Send + Sync {
    async fn list_calendars(&self, access_token: &str) -> AppResult<Vec<Calendar>>;
}

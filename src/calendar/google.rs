// Google Calendar integration
// Reads the user's calendar list from the Calendar v3 API

use super::CalendarLister;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::Calendar;
use crate::utils::logging;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleCalendarListEntry {
    id: String,
    summary: Option<String>,
    summary_override: Option<String>,
    description: Option<String>,
    primary: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct GoogleCalendarListResponse {
    #[serde(default)]
    items: Vec<GoogleCalendarListEntry>,
}

pub struct GoogleCalendarLister {
    client: Client,
    api_base: String,
}

impl GoogleCalendarLister {
    pub fn new(api_base: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client: HttpConfig::calendar_api().build_client()?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn calendar_list_url(&self) -> String {
        format!("{}/users/me/calendarList", self.api_base)
    }
}

#[async_trait]
impl CalendarLister for GoogleCalendarLister {
    async fn list_calendars(&self, access_token: &str) -> AppResult<Vec<Calendar>> {
        let started = Instant::now();

        let response = self
            .client
            .get(self.calendar_list_url())
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::calendar(format!(
                "Calendar list request failed: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let calendars = parse_calendar_list(&body)?;

        logging::log_calendar_fetch(calendars.len(), started.elapsed().as_millis() as u64);
        Ok(calendars)
    }
}

fn parse_calendar_list(body: &str) -> AppResult<Vec<Calendar>> {
    let list: GoogleCalendarListResponse = serde_json::from_str(body)
        .map_err(|e| AppError::calendar(format!("Failed to parse calendar list: {}", e)))?;

    Ok(list.items.into_iter().map(convert_google_calendar).collect())
}

fn convert_google_calendar(entry: GoogleCalendarListEntry) -> Calendar {
    // The user's own rename wins over the owner's title
    let summary = entry
        .summary_override
        .or(entry.summary)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| entry.id.clone());

    Calendar {
        id: entry.id,
        summary,
        description: entry.description.filter(|d| !d.is_empty()),
        primary: entry.primary.unwrap_or(false),
    }
}

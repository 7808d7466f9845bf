use std::sync::Arc;

use async_trait::async_trait;
use calpicker::auth::Authorizer;
use calpicker::calendar::CalendarLister;
use calpicker::preferences::{load_default_calendar, load_hidden_calendars, save_default_calendar, PreferenceStore};
use calpicker::selector::{CALENDAR_HIDDEN, DEFAULT_UPDATED, FETCH_FAILED, ID_COPIED};
use calpicker::surfaces::{SurfaceEvent, UiSurface};
use calpicker::{
    AppError, AppResult, Calendar, Collaborators, Database, DefaultCalendarSelector, ToastStyle,
    PRIMARY_CALENDAR,
};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

struct FixedToken;

#[async_trait]
impl Authorizer for FixedToken {
    async fn authorize(&self) -> AppResult<String> {
        Ok("token-123".to_string())
    }
}

struct StaticCalendars {
    calendars: Vec<Calendar>,
    fail: bool,
}

impl StaticCalendars {
    fn new(calendars: Vec<Calendar>) -> Self {
        Self {
            calendars,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calendars: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl CalendarLister for StaticCalendars {
    async fn list_calendars(&self, access_token: &str) -> AppResult<Vec<Calendar>> {
        assert_eq!(access_token, "token-123");
        if self.fail {
            return Err(AppError::calendar("HTTP 500"));
        }
        Ok(self.calendars.clone())
    }
}

struct Harness {
    selector: DefaultCalendarSelector,
    db: Arc<Database>,
    events: UnboundedReceiver<SurfaceEvent>,
    _dir: TempDir,
}

impl Harness {
    fn drain(&mut self) -> Vec<SurfaceEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

fn sample_calendars() -> Vec<Calendar> {
    vec![
        Calendar::new("cal_P", "Me").as_primary(),
        Calendar::new("cal_A", "Work").with_description("Team events"),
        Calendar::new("cal_B", "Family"),
    ]
}

async fn create_harness(lister: StaticCalendars) -> Harness {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(Database::new(&dir.path().join("preferences.db")).await.unwrap());
    let (surface, events) = UiSurface::channel();
    let surface = Arc::new(surface);

    let selector = DefaultCalendarSelector::new(Collaborators {
        authorizer: Arc::new(FixedToken),
        lister: Arc::new(lister),
        store: db.clone(),
        notifier: surface.clone(),
        navigator: surface.clone(),
        clipboard: surface,
    });

    Harness {
        selector,
        db,
        events,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_select_default_end_to_end() {
    let mut harness = create_harness(StaticCalendars::new(sample_calendars())).await;

    harness.selector.load().await.unwrap();
    let state = harness.selector.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.entries().len(), 3);
    assert!(harness.drain().is_empty());

    harness.selector.select_default("cal_A", "Work").await.unwrap();

    assert_eq!(load_default_calendar(harness.db.as_ref()).await.unwrap(), "cal_A");
    let events = harness.drain();
    assert_eq!(events.len(), 2);
    match &events[0] {
        SurfaceEvent::Notify(toast) => {
            assert_eq!(toast.style, ToastStyle::Success);
            assert_eq!(toast.title, DEFAULT_UPDATED);
            assert_eq!(toast.message.as_deref(), Some("New events will be created in \"Work\""));
        }
        other => panic!("expected a toast, got {:?}", other),
    }
    assert_eq!(events[1], SurfaceEvent::PopToRoot);
}

#[tokio::test]
async fn test_hiding_the_default_resets_to_primary() {
    let mut harness = create_harness(StaticCalendars::new(sample_calendars())).await;
    save_default_calendar(harness.db.as_ref(), "cal_A").await.unwrap();

    harness.selector.load().await.unwrap();
    let entries = harness.selector.snapshot().await.entries();
    assert!(entries.iter().any(|e| e.id == "cal_A" && e.is_default));

    harness.selector.hide_calendar("cal_A", "Work").await.unwrap();

    let hidden = load_hidden_calendars(harness.db.as_ref()).await.unwrap();
    assert!(hidden.contains("cal_A"));
    assert_eq!(load_default_calendar(harness.db.as_ref()).await.unwrap(), PRIMARY_CALENDAR);

    let state = harness.selector.snapshot().await;
    assert_eq!(state.default_calendar, PRIMARY_CALENDAR);
    assert!(state.entries().iter().all(|e| e.id != "cal_A"));

    let events = harness.drain();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], SurfaceEvent::Notify(t) if t.title == CALENDAR_HIDDEN));
}

#[tokio::test]
async fn test_hidden_calendars_stay_hidden_on_next_activation() {
    let mut first = create_harness(StaticCalendars::new(sample_calendars())).await;
    first.selector.load().await.unwrap();
    first.selector.hide_calendar("cal_B", "Family").await.unwrap();
    first.drain();

    // Fresh selector over the same store
    let (surface, _events) = UiSurface::channel();
    let surface = Arc::new(surface);
    let second = DefaultCalendarSelector::new(Collaborators {
        authorizer: Arc::new(FixedToken),
        lister: Arc::new(StaticCalendars::new(sample_calendars())),
        store: first.db.clone(),
        notifier: surface.clone(),
        navigator: surface.clone(),
        clipboard: surface,
    });
    second.load().await.unwrap();

    let ids: Vec<String> = second.snapshot().await.entries().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["cal_P", "cal_A"]);
}

#[tokio::test]
async fn test_fetch_failure_leaves_empty_list_and_one_toast() {
    let mut harness = create_harness(StaticCalendars::failing()).await;

    assert!(harness.selector.load().await.is_err());

    let state = harness.selector.snapshot().await;
    assert!(!state.loading);
    assert!(state.calendars.is_empty());

    let events = harness.drain();
    assert_eq!(events.len(), 1);
    match &events[0] {
        SurfaceEvent::Notify(toast) => {
            assert!(toast.is_failure());
            assert_eq!(toast.title, FETCH_FAILED);
        }
        other => panic!("expected a failure toast, got {:?}", other),
    }
}

#[tokio::test]
async fn test_copy_goes_through_the_surface_without_touching_preferences() {
    let mut harness = create_harness(StaticCalendars::new(sample_calendars())).await;
    harness.selector.load().await.unwrap();
    let before = harness.selector.snapshot().await;

    harness.selector.copy_calendar_id("cal_B").await.unwrap();

    let events = harness.drain();
    assert_eq!(events[0], SurfaceEvent::CopyToClipboard("cal_B".to_string()));
    assert!(matches!(&events[1], SurfaceEvent::Notify(t) if t.title == ID_COPIED));
    assert_eq!(harness.selector.snapshot().await, before);
    assert_eq!(harness.db.get(calpicker::DEFAULT_CALENDAR_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_search_over_loaded_calendars() {
    let harness = create_harness(StaticCalendars::new(sample_calendars())).await;
    harness.selector.load().await.unwrap();
    let state = harness.selector.snapshot().await;

    let hits: Vec<String> = state.search("primary").into_iter().map(|e| e.id).collect();
    assert_eq!(hits, vec!["cal_P"]);

    let hits: Vec<String> = state.search("team").into_iter().map(|e| e.id).collect();
    assert_eq!(hits, vec!["cal_A"]);

    assert_eq!(state.search("").len(), 3);
}

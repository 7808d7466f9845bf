use std::sync::Arc;

use iced::{Application, Settings as IcedSettings};
use log::{error, info, warn};

use calpicker::app::{Flags, SelectorApp};
use calpicker::auth::GoogleAuthorizer;
use calpicker::calendar::GoogleCalendarLister;
use calpicker::config::{validate_config, AppConfig};
use calpicker::surfaces::UiSurface;
use calpicker::utils::logging;
use calpicker::{Collaborators, Database, DefaultCalendarSelector};

fn exit_with(context: &str, e: &dyn std::fmt::Display) -> ! {
    error!("{}: {}", context, e);
    eprintln!("{}: {}", context, e);
    eprintln!("Please check your configuration and try again.");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> iced::Result {
    if let Err(e) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting calpicker");

    let config = AppConfig::from_env();
    if let Err(e) = validate_config(&config) {
        // Still open: the failed fetch is reported in the window
        warn!("{}", e);
    }

    let db = match Database::new(&config.db_path).await {
        Ok(database) => Arc::new(database),
        Err(e) => exit_with("Failed to initialize database", &e),
    };

    let authorizer = match GoogleAuthorizer::from_credentials(&config.credentials) {
        Ok(authorizer) => Arc::new(authorizer),
        Err(e) => exit_with("Failed to set up Google authorization", &e),
    };

    let lister = match GoogleCalendarLister::new(config.api_base.clone()) {
        Ok(lister) => Arc::new(lister),
        Err(e) => exit_with("Failed to set up calendar client", &e),
    };

    let (surface, surface_events) = UiSurface::channel();
    let surface = Arc::new(surface);

    let selector = DefaultCalendarSelector::new(Collaborators {
        authorizer,
        lister,
        store: db,
        notifier: surface.clone(),
        navigator: surface.clone(),
        clipboard: surface,
    });

    SelectorApp::run(IcedSettings {
        flags: Flags {
            selector,
            surface_events,
        },
        window: iced::window::Settings {
            size: iced::Size::new(760.0, 620.0),
            resizable: true,
            ..Default::default()
        },
        id: None,
        fonts: vec![],
        default_font: Default::default(),
        default_text_size: iced::Pixels(16.0),
        antialiasing: false,
    })
}

//! iced shell around the default-calendar selector
//!
//! Renders [`ViewState`] snapshots and turns user input into selector
//! operations. Surface requests from the selector (toasts, closing the
//! window, clipboard writes) arrive through a subscription.

use std::sync::Arc;

use iced::futures::channel::mpsc::Sender;
use iced::futures::SinkExt;
use iced::widget::container;
use iced::{Application, Command, Element, Length, Subscription, Theme};
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

use crate::messages::Message;
use crate::selector::{DefaultCalendarSelector, ViewState, SECTION_TITLE};
use crate::surfaces::SurfaceEvent;
use crate::ui::{self, styles::BackgroundStyle};
use crate::ui_state::UiState;

pub struct Flags {
    pub selector: DefaultCalendarSelector,
    pub surface_events: UnboundedReceiver<SurfaceEvent>,
}

pub struct SelectorApp {
    selector: DefaultCalendarSelector,
    // Taken once by the subscription
    surface_events: Arc<Mutex<Option<UnboundedReceiver<SurfaceEvent>>>>,
    view_state: ViewState,
    ui_state: UiState,
}

impl SelectorApp {
    fn run_operation<F, Fut>(&mut self, operation: F) -> Command<Message>
    where
        F: FnOnce(DefaultCalendarSelector) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.ui_state.begin_operation();
        let selector = self.selector.clone();
        Command::perform(
            async move {
                operation(selector.clone()).await;
                selector.snapshot().await
            },
            Message::StateChanged,
        )
    }

    fn handle_surface_event(&mut self, event: SurfaceEvent) -> Command<Message> {
        match event {
            SurfaceEvent::Notify(toast) => {
                info!("{}", toast);
                self.ui_state.toast = Some(toast);
                Command::none()
            }
            SurfaceEvent::PopToRoot => {
                info!("Closing selector");
                self.ui_state.closing = true;
                iced::window::close(iced::window::Id::MAIN)
            }
            SurfaceEvent::CopyToClipboard(contents) => iced::clipboard::write(contents),
        }
    }
}

/// Returns false when iced no longer accepts messages.
async fn forward_surface_event(output: &mut Sender<Message>, event: SurfaceEvent) -> bool {
    match output.send(Message::Surface(event)).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Dropped surface event, UI channel rejected it: {}", e);
            false
        }
    }
}

impl Application for SelectorApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Flags) -> (Self, Command<Message>) {
        let mut app = SelectorApp {
            selector: flags.selector,
            surface_events: Arc::new(Mutex::new(Some(flags.surface_events))),
            view_state: ViewState::default(),
            ui_state: UiState::new(),
        };

        let load = app.run_operation(|selector| async move {
            if let Err(e) = selector.load().await {
                warn!("Selector opened without calendars: {}", e);
            }
        });

        (app, load)
    }

    fn title(&self) -> String {
        SECTION_TITLE.to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SearchChanged(query) => {
                self.ui_state.search_query = query;
                Command::none()
            }
            Message::SetDefault { id, name } => self.run_operation(move |selector| async move {
                if let Err(e) = selector.select_default(&id, &name).await {
                    debug!("Set default for {} failed: {}", id, e);
                }
            }),
            Message::HideCalendar { id, name } => self.run_operation(move |selector| async move {
                if let Err(e) = selector.hide_calendar(&id, &name).await {
                    debug!("Hide for {} failed: {}", id, e);
                }
            }),
            Message::CopyCalendarId(id) => self.run_operation(move |selector| async move {
                if let Err(e) = selector.copy_calendar_id(&id).await {
                    debug!("Copy of {} failed: {}", id, e);
                }
            }),
            Message::DismissToast => {
                self.ui_state.toast = None;
                Command::none()
            }
            Message::StateChanged(state) => {
                self.view_state = state;
                self.ui_state.end_operation();
                Command::none()
            }
            Message::Surface(event) => self.handle_surface_event(event),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        struct SurfaceListener;

        let receiver = self.surface_events.clone();

        iced::subscription::channel(
            std::any::TypeId::of::<SurfaceListener>(),
            100,
            move |mut output| async move {
                let mut receiver = receiver.lock().await.take();

                // Forward surface events until the selector side goes away
                loop {
                    match receiver.as_mut() {
                        Some(events) => match events.recv().await {
                            Some(event) => {
                                forward_surface_event(&mut output, event).await;
                            }
                            None => {
                                warn!("UI surface channel closed");
                                receiver = None;
                            }
                        },
                        None => std::future::pending::<()>().await,
                    }
                }
            },
        )
    }

    fn view(&self) -> Element<'_, Message> {
        container(ui::view_selector(&self.view_state, &self.ui_state))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(30)
            .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

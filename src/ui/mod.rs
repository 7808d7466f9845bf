// src/ui/mod.rs

use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use crate::messages::Message;
use crate::models::{CalendarEntry, Toast, ToastStyle};
use crate::selector::{ViewState, SEARCH_PLACEHOLDER, SECTION_TITLE};
use crate::ui_state::UiState;

pub mod styles;

use styles::{
    BadgeStyle, CardStyle, DestructiveButtonStyle, PrimaryButtonStyle, SearchInputStyle,
    SubtleButtonStyle, ToastBarStyle, ZEN_ACCENT, ZEN_FAILURE, ZEN_SUBTEXT, ZEN_TEXT,
};

// --- COMPONENT VIEWS ---

pub fn view_selector<'a>(state: &ViewState, ui: &UiState) -> Element<'a, Message> {
    let search = text_input(SEARCH_PLACEHOLDER, &ui.search_query)
        .on_input(Message::SearchChanged)
        .padding(10)
        .style(iced::theme::TextInput::Custom(Box::new(SearchInputStyle)));

    let mut content: Vec<Element<'a, Message>> = vec![
        section_header(SECTION_TITLE),
        search.into(),
    ];

    if let Some(toast) = &ui.toast {
        content.push(view_toast(toast));
    }

    content.push(view_calendar_list(state, ui));

    column(content).spacing(16).into()
}

fn view_calendar_list<'a>(state: &ViewState, ui: &UiState) -> Element<'a, Message> {
    if state.loading {
        return centered_note("Loading calendars...");
    }

    let entries = state.search(&ui.search_query);
    if entries.is_empty() {
        return if state.entries().is_empty() {
            centered_note("No calendars to show")
        } else {
            centered_note("No calendars match your search")
        };
    }

    let busy = ui.is_busy();
    let rows: Vec<Element<'a, Message>> = entries
        .iter()
        .map(|entry| view_entry(entry, busy))
        .collect();

    scrollable(column(rows).spacing(10))
        .height(Length::Fill)
        .into()
}

pub fn view_entry<'a>(entry: &CalendarEntry, busy: bool) -> Element<'a, Message> {
    let badges: Vec<Element<'a, Message>> = entry
        .accessories()
        .into_iter()
        .filter(|label| !label.is_empty())
        .map(status_badge)
        .collect();

    let details = column![
        row![
            text(entry.icon()).size(16),
            text(&entry.title)
                .size(16)
                .style(iced::theme::Text::Color(ZEN_TEXT)),
        ]
        .spacing(8)
        .align_items(Alignment::Center),
        text(&entry.subtitle)
            .size(12)
            .style(iced::theme::Text::Color(ZEN_SUBTEXT)),
    ]
    .spacing(4);

    let set_default = button(text("Set as Default").size(13))
        .on_press_maybe(set_default_action(entry, busy))
        .padding([6, 12])
        .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)));

    let hide = button(text("Hide").size(13))
        .on_press_maybe((!busy).then(|| Message::HideCalendar {
            id: entry.id.clone(),
            name: entry.title.clone(),
        }))
        .padding([6, 12])
        .style(iced::theme::Button::Custom(Box::new(DestructiveButtonStyle)));

    let copy = button(text("Copy ID").size(13))
        .on_press(Message::CopyCalendarId(entry.id.clone()))
        .padding([6, 12])
        .style(iced::theme::Button::Custom(Box::new(SubtleButtonStyle)));

    container(
        row![
            details,
            horizontal_space(),
            row(badges).spacing(6),
            set_default,
            hide,
            copy,
        ]
        .spacing(10)
        .align_items(Alignment::Center),
    )
    .padding(15)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(CardStyle {
        highlighted: entry.is_default,
    })))
    .into()
}

/// Re-selecting the current default is allowed and runs the full select path.
fn set_default_action(entry: &CalendarEntry, busy: bool) -> Option<Message> {
    (!busy).then(|| Message::SetDefault {
        id: entry.id.clone(),
        name: entry.title.clone(),
    })
}

pub fn view_toast<'a>(toast: &Toast) -> Element<'a, Message> {
    let title_color = match toast.style {
        ToastStyle::Success => ZEN_ACCENT,
        ToastStyle::Failure => ZEN_FAILURE,
    };

    container(
        row![
            column![
                text(&toast.title)
                    .size(14)
                    .style(iced::theme::Text::Color(title_color)),
                text(toast.message.as_deref().unwrap_or(""))
                    .size(12)
                    .style(iced::theme::Text::Color(ZEN_SUBTEXT)),
            ]
            .spacing(2),
            horizontal_space(),
            button(text("×").size(16))
                .on_press(Message::DismissToast)
                .padding([2, 8])
                .style(iced::theme::Button::Custom(Box::new(SubtleButtonStyle))),
        ]
        .align_items(Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(ToastBarStyle(toast.style))))
    .into()
}

pub fn status_badge<'a>(label: &str) -> Element<'a, Message> {
    container(text(label).size(10))
        .padding([4, 8])
        .style(iced::theme::Container::Custom(Box::new(BadgeStyle)))
        .into()
}

// Helper for section headers
pub fn section_header<'a>(label: &str) -> Element<'a, Message> {
    text(label)
        .size(24)
        .style(iced::theme::Text::Color(ZEN_TEXT))
        .into()
}

fn centered_note<'a>(label: &str) -> Element<'a, Message> {
    container(
        text(label)
            .size(16)
            .style(iced::theme::Text::Color(ZEN_SUBTEXT)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x()
    .center_y()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Calendar;

    #[test]
    fn test_current_default_can_be_selected_again() {
        let entry = CalendarEntry::from_calendar(&Calendar::new("cal_A", "Work"), "cal_A");
        assert!(entry.is_default);

        match set_default_action(&entry, false) {
            Some(Message::SetDefault { id, name }) => {
                assert_eq!(id, "cal_A");
                assert_eq!(name, "Work");
            }
            other => panic!("expected SetDefault, got {:?}", other),
        }
    }

    #[test]
    fn test_set_default_disabled_while_busy() {
        let entry = CalendarEntry::from_calendar(&Calendar::new("cal_B", "Home"), "cal_A");
        assert!(set_default_action(&entry, true).is_none());
        assert!(set_default_action(&entry, false).is_some());
    }
}

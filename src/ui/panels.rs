/// Main editor screen
///
/// Mirrors the two-pane layout: input image on the left, tools and the
/// generated result on the right.

use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::modes::{AgeDirection, EditMode};
use crate::state::session::{GenerationState, Session};
use crate::Message;

pub fn view<'a>(session: &'a Session, status: &'a str) -> Element<'a, Message> {
    let content = row![
        container(input_pane(session))
            .width(Length::FillPortion(2))
            .height(Length::Fill)
            .padding(10),
        container(tools_pane(session, status))
            .width(Length::FillPortion(3))
            .height(Length::Fill)
            .padding(10),
    ]
    .spacing(10);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
        .into()
}

/// Left pane: drop target, upload/camera buttons, or the loaded preview.
fn input_pane(session: &Session) -> Element<'_, Message> {
    let inner: Element<'_, Message> = match session.asset() {
        None => column![
            text("Upload Photo").size(28),
            text("Drag & drop an image anywhere, or pick a source below").size(14),
            button(text("Choose from Device"))
                .on_press(Message::PickFile)
                .padding(12),
            button(text("Open Camera"))
                .on_press(Message::OpenCamera)
                .padding(12),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into(),
        Some(asset) => column![
            text("ORIGINAL").size(12),
            iced::widget::image(asset.preview.clone())
                .width(Length::Fill)
                .height(Length::Fill),
            button(text("Remove Photo"))
                .on_press(Message::Reset)
                .padding(8),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into(),
    };

    container(inner)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Right pane: tool grid, mode options, trigger, banner, result.
fn tools_pane<'a>(session: &'a Session, status: &'a str) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = vec![
        text("AI Tools").size(14).into(),
        tool_grid(session.mode),
        options_panel(session),
        generate_button(session).into(),
    ];

    if let Some(message) = session.generation().error() {
        items.push(error_banner(message));
    }

    if let GenerationState::Succeeded(result) = session.generation() {
        items.push(text("Generated Result").size(14).into());
        items.push(
            iced::widget::image(result.preview.clone())
                .width(Length::Fill)
                .into(),
        );
        items.push(
            button(text("Download HD"))
                .on_press(Message::Download)
                .padding(10)
                .into(),
        );
    }

    items.push(text(status).size(12).into());

    scrollable(Column::with_children(items).spacing(16).padding(4))
        .height(Length::Fill)
        .into()
}

/// One button per edit mode, wrapped into a grid.
fn tool_grid<'a>(active: EditMode) -> Element<'a, Message> {
    let mut grid = Wrap::new().spacing(8.0).line_spacing(8.0);
    for mode in EditMode::ALL {
        let style = if mode == active {
            button::primary
        } else {
            button::secondary
        };
        grid = grid.push(
            button(text(mode.label()).size(13))
                .style(style)
                .on_press(Message::ModeSelected(mode))
                .padding(10),
        );
    }
    grid.into()
}

/// Mode-dependent options: age buckets, a free-text input, or a ready hint.
fn options_panel(session: &Session) -> Element<'_, Message> {
    if session.mode == EditMode::AgeChange {
        let mut buttons = Row::new().spacing(8);
        for age in AgeDirection::ALL {
            let style = if age == session.age {
                button::primary
            } else {
                button::secondary
            };
            buttons = buttons.push(
                button(text(age.label()).size(13))
                    .style(style)
                    .on_press(Message::AgeSelected(age))
                    .padding(8),
            );
        }
        return column![text("Target Age").size(12), buttons]
            .spacing(8)
            .into();
    }

    if session.mode.takes_custom_text() {
        return column![
            text("Custom Instructions").size(12),
            text_input(session.mode.placeholder(), &session.custom_text)
                .on_input(Message::CustomTextChanged)
                .padding(10),
        ]
        .spacing(8)
        .into();
    }

    text(format!(
        "Ready to apply the {} filter",
        session.mode.label()
    ))
    .size(13)
    .into()
}

fn generate_button(session: &Session) -> iced::widget::Button<'_, Message> {
    let label = if session.generation().is_submitting() {
        "Processing Image..."
    } else {
        "Generate Result"
    };

    let mut trigger = button(text(label).size(16)).padding(14).width(Length::Fill);
    if session.can_generate() {
        trigger = trigger.on_press(Message::Generate);
    }
    trigger
}

fn error_banner(message: &str) -> Element<'_, Message> {
    container(text(message).size(13))
        .width(Length::Fill)
        .padding(12)
        .style(container::bordered_box)
        .into()
}

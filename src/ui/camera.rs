/// Fullscreen camera capture overlay
///
/// Shown instead of the editor while a stream is open: live preview, a
/// shutter button, and a close button. Both exits release the stream.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::Message;

pub fn view(preview: Option<&Handle>) -> Element<'static, Message> {
    let viewfinder: Element<'static, Message> = match preview {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        // First frames can take a moment to arrive.
        None => text("Starting camera...").size(18).into(),
    };

    let controls = row![
        button(text("Capture").size(16))
            .on_press(Message::CapturePressed)
            .padding(14),
        button(text("Close").size(16))
            .on_press(Message::CloseCamera)
            .padding(14),
    ]
    .spacing(20);

    container(
        column![
            container(viewfinder)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            controls,
        ]
        .spacing(20)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(20)
    .into()
}

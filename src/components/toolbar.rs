use crate::message::Message;
use crate::model::AttachmentView;
use crate::utils::scale_label;
use iced::widget::text::Wrapping;
use iced::widget::{button, container, row, text, Container, Space};
use iced::{Alignment, Background, Color, Length, Shadow, Theme};

pub fn attachment_toolbar(index: usize, item: &AttachmentView) -> Container<'static, Message> {
    let zoom_row = row![
        segment(
            "−",
            item.zoom.can_zoom_out().then_some(Message::ZoomOut(index)),
            SegmentPosition::Left
        ),
        segment_label(scale_label(item.zoom.percent())),
        segment(
            "+",
            item.zoom.can_zoom_in().then_some(Message::ZoomIn(index)),
            SegmentPosition::Right
        ),
    ]
    .spacing(0)
    .align_y(Alignment::Center);

    let zoom = container(zoom_row)
        .padding(3)
        .style(segmented_container_style);

    let download = button(text("Tải xuống").size(14))
        .on_press_maybe(item.download_payload().is_ok().then_some(Message::Download(index)));
    let print = button(text("In").size(14))
        .on_press_maybe(item.is_printable().then_some(Message::Print(index)));

    container(
        row![
            zoom,
            Space::with_width(Length::Fill),
            download,
            print
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentPosition {
    Left,
    Right,
}

fn segment(
    label: &'static str,
    on_press: Option<Message>,
    position: SegmentPosition,
) -> iced::widget::Button<'static, Message> {
    let content = container(text(label).size(16).wrapping(Wrapping::None))
        .width(Length::Fixed(36.0))
        .height(Length::Fixed(28.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center);

    button(content)
        .padding(0)
        .on_press_maybe(on_press)
        .style(move |theme, status| segment_button_style(theme, status, position))
}

fn segment_label(label: String) -> Container<'static, Message> {
    container(text(label).size(14).wrapping(Wrapping::None))
        .width(Length::Fixed(64.0))
        .height(Length::Fixed(28.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
}

fn segmented_container_style(theme: &Theme) -> iced::widget::container::Style {
    let palette = theme.extended_palette();

    iced::widget::container::Style {
        background: Some(Background::Color(palette.background.strong.color)),
        border: iced::border::Border {
            color: palette.background.strong.color.scale_alpha(0.6),
            width: 1.0,
            radius: iced::border::Radius::new(999.0),
        },
        ..Default::default()
    }
}

fn segment_button_style(
    theme: &Theme,
    status: iced::widget::button::Status,
    position: SegmentPosition,
) -> iced::widget::button::Style {
    let palette = theme.extended_palette();

    let background_color = match status {
        iced::widget::button::Status::Active => palette.primary.strong.color,
        iced::widget::button::Status::Hovered => palette.primary.base.color,
        iced::widget::button::Status::Pressed => palette.primary.base.color.scale_alpha(0.9),
        iced::widget::button::Status::Disabled => {
            palette.background.strong.color.scale_alpha(0.5)
        }
    };

    let text_color = match status {
        iced::widget::button::Status::Disabled => palette.background.base.text.scale_alpha(0.5),
        _ => palette.primary.strong.text,
    };

    let radius = match position {
        SegmentPosition::Left => iced::border::Radius {
            top_left: 999.0,
            top_right: 0.0,
            bottom_right: 0.0,
            bottom_left: 999.0,
        },
        SegmentPosition::Right => iced::border::Radius {
            top_left: 0.0,
            top_right: 999.0,
            bottom_right: 999.0,
            bottom_left: 0.0,
        },
    };

    iced::widget::button::Style {
        background: Some(Background::Color(background_color)),
        text_color,
        border: iced::border::Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius,
        },
        shadow: Shadow::default(),
    }
}

use crate::components::attachment_toolbar;
use crate::message::Message;
use crate::model::{AttachmentView, ItemDisplay};
use iced::widget::text::Wrapping;
use iced::widget::{column, container, scrollable, text, Column, Image};
use iced::{Alignment, Element, Length};

const VIEWER_HEIGHT: f32 = 600.0;

pub fn attachment_list(items: &[AttachmentView]) -> Column<'_, Message> {
    if items.is_empty() {
        return column![text("Không có kết quả")];
    }

    items
        .iter()
        .enumerate()
        .fold(column![].spacing(32), |list, (index, item)| {
            list.push(attachment_viewer(index, item))
        })
}

fn attachment_viewer(index: usize, item: &AttachmentView) -> Element<'_, Message> {
    let heading = text(format!("{}. {}", index + 1, item.name))
        .size(18)
        .wrapping(Wrapping::Word);

    column![
        heading,
        attachment_toolbar(index, item),
        container(attachment_content(item))
            .width(Length::Fill)
            .height(Length::Fixed(VIEWER_HEIGHT))
            .padding(8),
    ]
    .spacing(8)
    .into()
}

fn attachment_content(item: &AttachmentView) -> Element<'_, Message> {
    let scale = item.zoom.scale();

    match &item.display {
        ItemDisplay::Loading => centered_text("Đang tải..."),
        ItemDisplay::Failed(reason) => centered_text(reason),
        ItemDisplay::Image(image) => {
            let (width, height) = image.display_size(scale);
            scrollable(
                Image::new(image.handle.clone())
                    .width(Length::Fixed(width))
                    .height(Length::Fixed(height)),
            )
            .direction(both_directions())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
        }
        ItemDisplay::Pages(pages) => {
            let pages = pages.iter().fold(
                column![].spacing(12).align_x(Alignment::Center),
                |column, page| {
                    column.push(
                        Image::new(page.handle.clone())
                            .width(Length::Fixed(page.display_width))
                            .height(Length::Fixed(page.display_height)),
                    )
                },
            );
            scrollable(pages)
                .direction(both_directions())
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}

fn both_directions() -> scrollable::Direction {
    scrollable::Direction::Both {
        vertical: scrollable::Scrollbar::default(),
        horizontal: scrollable::Scrollbar::default(),
    }
}

fn centered_text(message: &str) -> Element<'_, Message> {
    container(text(message).wrapping(Wrapping::Word))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .into()
}

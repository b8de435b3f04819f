use crate::message::Message;
use crate::model::ResultRecord;
use iced::widget::text::Wrapping;
use iced::widget::{column, row, text};
use iced::{Element, Font, Length};

pub fn patient_panel(record: &ResultRecord) -> Element<'_, Message> {
    column![
        row![
            field("Họ tên", &record.patient_name),
            field("Mã BN", &record.patient_code),
        ]
        .spacing(12),
        row![
            field("Giới tính", &record.gender),
            field("Ngày sinh", &record.birth_date),
        ]
        .spacing(12),
        field("Khoa chỉ định", &record.department),
        field("Ngày thực hiện", &record.visit_date),
    ]
    .spacing(8)
    .width(Length::Fill)
    .into()
}

fn field<'a>(label: &'a str, value: &'a str) -> Element<'a, Message> {
    row![
        text(format!("{label}:")).font(Font {
            weight: iced::font::Weight::Bold,
            ..Font::DEFAULT
        }),
        text(value).wrapping(Wrapping::Word),
    ]
    .spacing(6)
    .width(Length::Fill)
    .into()
}

pub mod attachment_viewer;
pub mod patient_panel;

pub use attachment_viewer::attachment_list;
pub use patient_panel::patient_panel;

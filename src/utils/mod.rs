pub mod formatting;

pub use formatting::{download_file_name, scale_label};

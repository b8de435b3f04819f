pub mod toolbar;

pub use toolbar::attachment_toolbar;

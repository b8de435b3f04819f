pub mod attachment;
pub mod record;

pub use attachment::{AttachmentView, ItemDisplay, PageView};
pub use record::{AttachmentKind, ContentRef, ResultItem, ResultRecord};

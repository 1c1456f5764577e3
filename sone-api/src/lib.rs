mod error;
pub use error::Error;

mod request;
pub use request::{Request, AJAX_PREFIX};

mod response;
pub use response::{DeleteResponse, LikesResponse, Translation};

mod sone;
pub use sone::{SoneId, SoneStatus, Status};

mod target;
pub use target::{FormPassword, Kind, PostId, ReplyId, Target};

/// Translation key of the confirm button shown when deleting a post
pub const KEY_CONFIRM_DELETE_POST: &str = "WebInterface.Confirmation.DeletePostButton";

/// Translation key of the confirm button shown when deleting a reply
pub const KEY_CONFIRM_DELETE_REPLY: &str = "WebInterface.Confirmation.DeleteReplyButton";

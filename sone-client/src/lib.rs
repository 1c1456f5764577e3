mod backend;
pub use backend::{Backend, Sleeper};

mod controller;
pub use controller::Controller;

mod http;
pub use http::HttpBackend;

mod page;
pub use page::{Page, StatusView};

mod poll;
pub use poll::{poll_interval, PollConfig, Poller};

mod registry;
pub use registry::WatchRegistry;

mod swap;
pub use swap::{SwapConfig, SwapId, SwapState, SwapView};

mod view;
pub use view::{DeletePhase, DeleteView, Dismissal, LikeView, ReplyFormView, SoneView};

pub mod api {
    pub use sone_api::*;
}

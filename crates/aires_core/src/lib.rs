//! AIRES core: pure state machine, markdown rendering and view-model helpers.
mod effect;
pub mod markdown;
mod msg;
mod state;
pub mod tabs;
mod update;
mod view_model;

pub use effect::{Effect, Notice, NoticeLevel};
pub use msg::Msg;
pub use state::{
    AppState, CallFailure, RequestId, ResumeId, SelectedFile, UploadedResume, ValidationOutcome,
    TAB_ORIGINAL, TAB_REWRITTEN, TAB_SIDE_BY_SIDE,
};
pub use update::update;
pub use view_model::{AppViewModel, PreviewPanel, RewriteView, UploadView, ValidationBanner};

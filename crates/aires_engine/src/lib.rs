//! Resume engine: HTTP calls to the enhancement service, PDF persistence and
//! the toast queue.
mod api;
mod engine;
mod persist;
mod toast;
mod types;

pub use api::{ApiSettings, ReqwestResumeApi, ResumeApi, UploadFile, DEFAULT_BASE_URL};
pub use engine::{
    ChannelEventSink, EngineCommand, EngineError, EngineHandle, EventSink, PDF_FILE_NAME,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use toast::{Toast, ToastId, ToastOptions, ToastQueue, ToastStatus, DEFAULT_DURATION};
pub use types::{
    ApiError, EngineEvent, FailureKind, RequestId, ResumeId, StoredResume, ValidationReport,
};

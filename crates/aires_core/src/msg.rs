use std::path::PathBuf;

use crate::{CallFailure, RequestId, SelectedFile, UploadedResume, ValidationOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file; `None` when the picker returned nothing.
    FileSelected(Option<SelectedFile>),
    /// Remote classification of the selected file.
    ValidationFinished {
        request_id: RequestId,
        result: Result<ValidationOutcome, CallFailure>,
    },
    /// Remote upload of a file that passed validation.
    UploadFinished {
        request_id: RequestId,
        result: Result<UploadedResume, CallFailure>,
    },
    /// Open an already uploaded resume directly in the rewrite flow.
    ResumeOpened(UploadedResume),
    /// User clicked "Rewrite Resume with AI".
    RewriteRequested,
    RewriteFinished {
        request_id: RequestId,
        result: Result<String, CallFailure>,
    },
    /// User edited the revision feedback box.
    FeedbackChanged(String),
    /// User clicked "Request Revision".
    RevisionRequested,
    RevisionFinished {
        request_id: RequestId,
        result: Result<String, CallFailure>,
    },
    /// User clicked "Download PDF".
    DownloadRequested,
    /// PDF bytes were fetched and written; carries the saved path.
    DownloadFinished {
        request_id: RequestId,
        result: Result<PathBuf, CallFailure>,
    },
    /// User picked a preview tab.
    PreviewTabSelected(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

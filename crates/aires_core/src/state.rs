use std::path::PathBuf;

use crate::markdown::render_markdown;
use crate::tabs::Tabs;
use crate::view_model::{AppViewModel, PreviewPanel, RewriteView, UploadView, ValidationBanner};

pub type RequestId = u64;
pub type ResumeId = i64;

pub const TAB_SIDE_BY_SIDE: &str = "side-by-side";
pub const TAB_ORIGINAL: &str = "original";
pub const TAB_REWRITTEN: &str = "rewritten";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Server classification of an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub is_resume: bool,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub top_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedResume {
    pub id: ResumeId,
    pub original_text: String,
}

/// Why a remote call produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    /// No response arrived (connection refused, timeout).
    Network,
    /// A response arrived but rejected the request.
    Server { message: Option<String> },
}

impl CallFailure {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: Some(message.into()),
        }
    }

    pub(crate) fn server_message(&self) -> Option<&str> {
        match self {
            CallFailure::Network => None,
            CallFailure::Server { message } => message.as_deref().filter(|m| !m.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct UploadState {
    pub(crate) file: Option<SelectedFile>,
    /// Outstanding validate or upload call.
    pub(crate) pending: Option<RequestId>,
    pub(crate) validation: Option<ValidationOutcome>,
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResumeSession {
    pub(crate) resume_id: ResumeId,
    pub(crate) original: String,
    pub(crate) rewritten: Option<String>,
    pub(crate) feedback: String,
    /// Outstanding rewrite or revision call.
    pub(crate) pending: Option<RequestId>,
    pub(crate) download_pending: Option<RequestId>,
    pub(crate) last_download: Option<PathBuf>,
    pub(crate) error: Option<String>,
    /// Owner of the preview tab value; `preview` mirrors it.
    pub(crate) preview_mode: String,
    pub(crate) preview: Tabs,
}

impl ResumeSession {
    fn new(resume: UploadedResume) -> Self {
        Self {
            resume_id: resume.id,
            original: resume.original_text,
            rewritten: None,
            feedback: String::new(),
            pending: None,
            download_pending: None,
            last_download: None,
            error: None,
            preview_mode: TAB_SIDE_BY_SIDE.to_string(),
            preview: preview_tabs(TAB_SIDE_BY_SIDE),
        }
    }
}

fn preview_tabs(value: &str) -> Tabs {
    Tabs::controlled(value)
        .with_trigger(TAB_SIDE_BY_SIDE, "Side by Side")
        .with_trigger(TAB_ORIGINAL, "Original")
        .with_trigger(TAB_REWRITTEN, "Rewritten")
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    next_request_id: RequestId,
    pub(crate) upload: UploadState,
    pub(crate) session: Option<ResumeSession>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start directly in the rewrite flow for a resume the server already holds.
    pub fn with_resume(resume: UploadedResume) -> Self {
        let mut state = Self::new();
        state.open_resume(resume);
        state
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            upload: self.upload_view(),
            rewrite: self.session.as_ref().map(rewrite_view),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_busy(&self) -> bool {
        self.upload.pending.is_some()
            || self
                .session
                .as_ref()
                .is_some_and(|s| s.pending.is_some() || s.download_pending.is_some())
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn issue_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn open_resume(&mut self, resume: UploadedResume) {
        self.session = Some(ResumeSession::new(resume));
        self.mark_dirty();
    }

    fn upload_view(&self) -> UploadView {
        let upload = &self.upload;
        let prompt = if upload.file.is_some() {
            "Use `open <path>` to pick another file"
        } else {
            "Use `open <path>` to upload your resume"
        };
        UploadView {
            prompt: prompt.to_string(),
            file_name: upload.file.as_ref().map(SelectedFile::display_name),
            validating: upload.pending.is_some(),
            banner: upload.validation.as_ref().map(validation_banner),
            error: upload.error.clone(),
        }
    }
}

fn validation_banner(outcome: &ValidationOutcome) -> ValidationBanner {
    if outcome.is_resume {
        ValidationBanner {
            positive: true,
            text: format!(
                "This appears to be a valid resume! (Confidence: {:.2}%)",
                outcome.confidence * 100.0
            ),
            top_label: outcome.top_label.clone().filter(|label| !label.is_empty()),
        }
    } else {
        ValidationBanner {
            positive: false,
            text: "This doesn't appear to be a resume. Please upload a valid resume.".to_string(),
            top_label: outcome.top_label.clone().filter(|label| !label.is_empty()),
        }
    }
}

fn rewrite_view(session: &ResumeSession) -> RewriteView {
    let loading = session.pending.is_some();
    let downloading = session.download_pending.is_some();
    let rendered = session.rewritten.as_deref().and_then(render_markdown);

    let panels = |key: &str| -> Vec<PreviewPanel> {
        match key {
            TAB_SIDE_BY_SIDE => vec![PreviewPanel::Original, PreviewPanel::Rewritten],
            TAB_ORIGINAL => vec![PreviewPanel::Original],
            TAB_REWRITTEN => vec![PreviewPanel::Rewritten],
            _ => Vec::new(),
        }
    };
    let visible_panels = [TAB_SIDE_BY_SIDE, TAB_ORIGINAL, TAB_REWRITTEN]
        .into_iter()
        .find(|key| session.preview.is_content_visible(key))
        .map(panels)
        .unwrap_or_default();

    RewriteView {
        resume_id: session.resume_id,
        has_rewrite: session.rewritten.is_some(),
        rewrite_label: if loading {
            "Rewriting...".to_string()
        } else {
            "Rewrite Resume with AI".to_string()
        },
        rewrite_enabled: !loading && session.rewritten.is_none(),
        tabs: session.preview.triggers(),
        visible_panels,
        original: session.original.clone(),
        rendered,
        feedback: session.feedback.clone(),
        revision_label: if loading {
            "Processing...".to_string()
        } else {
            "Request Revision".to_string()
        },
        revision_enabled: !loading && !session.feedback.trim().is_empty(),
        download_label: if downloading {
            "Downloading...".to_string()
        } else {
            "Download PDF".to_string()
        },
        download_enabled: !downloading && session.rewritten.is_some(),
        last_download: session.last_download.clone(),
        error: session.error.clone(),
    }
}

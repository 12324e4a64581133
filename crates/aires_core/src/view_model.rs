use std::path::PathBuf;

use crate::markdown::Node;
use crate::tabs::TriggerView;
use crate::ResumeId;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub upload: UploadView,
    /// Present once a resume is uploaded or opened.
    pub rewrite: Option<RewriteView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadView {
    pub prompt: String,
    pub file_name: Option<String>,
    pub validating: bool,
    pub banner: Option<ValidationBanner>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationBanner {
    pub positive: bool,
    pub text: String,
    pub top_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewPanel {
    Original,
    Rewritten,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteView {
    pub resume_id: ResumeId,
    /// False until the first successful rewrite. The rewrite trigger is shown
    /// only while this is false; afterwards the content changes through revisions.
    pub has_rewrite: bool,
    pub rewrite_label: String,
    pub rewrite_enabled: bool,
    pub tabs: Vec<TriggerView>,
    pub visible_panels: Vec<PreviewPanel>,
    pub original: String,
    pub rendered: Option<Vec<Node>>,
    pub feedback: String,
    pub revision_label: String,
    pub revision_enabled: bool,
    pub download_label: String,
    pub download_enabled: bool,
    pub last_download: Option<PathBuf>,
    pub error: Option<String>,
}

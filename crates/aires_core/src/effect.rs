use crate::{RequestId, ResumeId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ValidateResume {
        request_id: RequestId,
        file: SelectedFile,
    },
    UploadResume {
        request_id: RequestId,
        file: SelectedFile,
    },
    RewriteResume {
        request_id: RequestId,
        resume_id: ResumeId,
    },
    ReviseResume {
        request_id: RequestId,
        resume_id: ResumeId,
        feedback: String,
        current_version: String,
    },
    GeneratePdf {
        request_id: RequestId,
        resume_id: ResumeId,
        content: String,
    },
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeLevel {
    #[default]
    Default,
    Success,
    Error,
    Warning,
}

/// A transient notification requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
        }
    }
}

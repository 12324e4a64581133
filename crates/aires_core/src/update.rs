use aires_logging::{aires_debug, aires_warn};

use crate::state::ResumeSession;
use crate::{AppState, CallFailure, Effect, Msg, Notice, NoticeLevel, RequestId};

const VALIDATION_NETWORK_ERROR: &str =
    "Cannot connect to server. Please make sure the backend service is running.";
const VALIDATION_ERROR: &str = "Error validating resume";
const UPLOAD_ERROR: &str = "File upload failed";
const REWRITE_ERROR: &str = "Failed to rewrite resume. Please try again later.";
const REVISE_ERROR: &str = "Failed to revise resume. Please try again later.";
const PDF_ERROR: &str = "Failed to generate PDF. Please try again later.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(None) => {
            aires_warn!("file picker returned no file");
            Vec::new()
        }
        Msg::FileSelected(Some(file)) => {
            if state.upload.pending.is_some() {
                aires_debug!("ignoring file selection while validation is in flight");
                return (state, Vec::new());
            }
            let request_id = state.issue_request_id();
            state.upload.file = Some(file.clone());
            state.upload.pending = Some(request_id);
            state.upload.error = None;
            state.mark_dirty();
            vec![Effect::ValidateResume { request_id, file }]
        }
        Msg::ValidationFinished { request_id, result } => {
            if state.upload.pending != Some(request_id) {
                return stale(state, request_id);
            }
            state.upload.pending = None;
            state.mark_dirty();
            match result {
                Ok(outcome) => {
                    let accepted = outcome.is_resume;
                    state.upload.validation = Some(outcome);
                    match state.upload.file.clone() {
                        Some(file) if accepted => {
                            let request_id = state.issue_request_id();
                            state.upload.pending = Some(request_id);
                            vec![Effect::UploadResume { request_id, file }]
                        }
                        _ => Vec::new(),
                    }
                }
                Err(failure) => {
                    state.upload.validation = None;
                    let message = match &failure {
                        CallFailure::Network => VALIDATION_NETWORK_ERROR.to_string(),
                        CallFailure::Server { .. } => failure
                            .server_message()
                            .unwrap_or(VALIDATION_ERROR)
                            .to_string(),
                    };
                    state.upload.error = Some(message.clone());
                    vec![error_notice(message)]
                }
            }
        }
        Msg::UploadFinished { request_id, result } => {
            if state.upload.pending != Some(request_id) {
                return stale(state, request_id);
            }
            state.upload.pending = None;
            state.mark_dirty();
            match result {
                Ok(resume) => {
                    aires_debug!("resume {} uploaded", resume.id);
                    state.open_resume(resume);
                    Vec::new()
                }
                Err(failure) => {
                    let message = failure.server_message().unwrap_or(UPLOAD_ERROR).to_string();
                    state.upload.error = Some(message.clone());
                    vec![error_notice(message)]
                }
            }
        }
        Msg::ResumeOpened(resume) => {
            state.open_resume(resume);
            Vec::new()
        }
        Msg::RewriteRequested => {
            let has_rewrite = state
                .session
                .as_ref()
                .is_some_and(|s| s.rewritten.is_some());
            if has_rewrite {
                aires_debug!("rewrite already done; further changes go through revisions");
                return (state, Vec::new());
            }
            let Some((request_id, session)) = begin_content_call(&mut state) else {
                return (state, Vec::new());
            };
            let resume_id = session.resume_id;
            state.mark_dirty();
            vec![Effect::RewriteResume {
                request_id,
                resume_id,
            }]
        }
        Msg::RewriteFinished { request_id, result } => {
            finish_content_call(&mut state, request_id, result, ContentCall::Rewrite)
        }
        Msg::FeedbackChanged(text) => {
            if let Some(session) = state.session.as_mut() {
                session.feedback = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RevisionRequested => {
            let has_rewrite = state
                .session
                .as_ref()
                .is_some_and(|s| s.rewritten.is_some());
            if !has_rewrite {
                aires_debug!("revision requested before any rewrite");
                return (state, Vec::new());
            }
            let blank = state
                .session
                .as_ref()
                .is_some_and(|s| s.feedback.trim().is_empty());
            if blank {
                return (
                    state,
                    vec![Effect::Notify(Notice::new(
                        NoticeLevel::Warning,
                        "Feedback required",
                        "Please provide specific feedback for the revision",
                    ))],
                );
            }
            let Some((request_id, session)) = begin_content_call(&mut state) else {
                return (state, Vec::new());
            };
            let effect = Effect::ReviseResume {
                request_id,
                resume_id: session.resume_id,
                feedback: session.feedback.clone(),
                current_version: session.rewritten.clone().unwrap_or_default(),
            };
            state.mark_dirty();
            vec![effect]
        }
        Msg::RevisionFinished { request_id, result } => {
            finish_content_call(&mut state, request_id, result, ContentCall::Revise)
        }
        Msg::DownloadRequested => {
            let Some(session) = state.session.as_ref() else {
                return (state, Vec::new());
            };
            if session.download_pending.is_some() {
                aires_debug!("download already in flight");
                return (state, Vec::new());
            }
            let Some(content) = session.rewritten.clone() else {
                return (state, Vec::new());
            };
            let resume_id = session.resume_id;
            let request_id = state.issue_request_id();
            if let Some(session) = state.session.as_mut() {
                session.download_pending = Some(request_id);
            }
            state.mark_dirty();
            vec![Effect::GeneratePdf {
                request_id,
                resume_id,
                content,
            }]
        }
        Msg::DownloadFinished { request_id, result } => {
            let Some(session) = state.session.as_mut() else {
                return (state, Vec::new());
            };
            if session.download_pending != Some(request_id) {
                return stale(state, request_id);
            }
            session.download_pending = None;
            let effects = match result {
                Ok(path) => {
                    session.last_download = Some(path);
                    vec![Effect::Notify(Notice::new(
                        NoticeLevel::Success,
                        "Download complete",
                        "Your improved resume has been downloaded",
                    ))]
                }
                Err(failure) => {
                    let message = failure.server_message().unwrap_or(PDF_ERROR).to_string();
                    session.error = Some(message.clone());
                    vec![error_notice(message)]
                }
            };
            state.mark_dirty();
            effects
        }
        Msg::PreviewTabSelected(key) => {
            if let Some(session) = state.session.as_mut() {
                session.preview.select_tab(&key);
                session.preview_mode = key;
                session.preview.sync_value(&session.preview_mode);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

#[derive(Debug, Clone, Copy)]
enum ContentCall {
    Rewrite,
    Revise,
}

impl ContentCall {
    fn generic_error(self) -> &'static str {
        match self {
            ContentCall::Rewrite => REWRITE_ERROR,
            ContentCall::Revise => REVISE_ERROR,
        }
    }

    fn success_notice(self) -> Notice {
        match self {
            ContentCall::Rewrite => Notice::new(
                NoticeLevel::Success,
                "Resume rewritten successfully",
                "Your resume has been enhanced with AI",
            ),
            ContentCall::Revise => Notice::new(
                NoticeLevel::Success,
                "Resume revised successfully",
                "Your feedback has been incorporated",
            ),
        }
    }
}

fn finish_content_call(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<String, CallFailure>,
    call: ContentCall,
) -> Vec<Effect> {
    let Some(session) = state.session.as_mut() else {
        return Vec::new();
    };
    if session.pending != Some(request_id) {
        aires_debug!("dropping stale {call:?} completion for request {request_id}");
        return Vec::new();
    }
    session.pending = None;
    let effects = match result {
        Ok(content) => {
            session.rewritten = Some(content);
            if matches!(call, ContentCall::Revise) {
                session.feedback.clear();
            }
            vec![Effect::Notify(call.success_notice())]
        }
        Err(failure) => {
            let message = failure
                .server_message()
                .unwrap_or(call.generic_error())
                .to_string();
            session.error = Some(message.clone());
            vec![error_notice(message)]
        }
    };
    state.mark_dirty();
    effects
}

/// Claim the open session for a rewrite or revision. Returns `None` when there
/// is no session or a call is already in flight.
fn begin_content_call(state: &mut AppState) -> Option<(RequestId, &mut ResumeSession)> {
    let idle = state.session.as_ref()?.pending.is_none();
    if !idle {
        aires_debug!("ignoring request while a call is in flight");
        return None;
    }
    let request_id = state.issue_request_id();
    let session = state.session.as_mut()?;
    session.pending = Some(request_id);
    session.error = None;
    Some((request_id, session))
}

fn stale(state: AppState, request_id: RequestId) -> (AppState, Vec<Effect>) {
    aires_debug!("dropping stale completion for request {request_id}");
    (state, Vec::new())
}

fn error_notice(description: String) -> Effect {
    Effect::Notify(Notice::new(NoticeLevel::Error, "Error", description))
}

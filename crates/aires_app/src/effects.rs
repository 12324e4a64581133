use std::sync::{mpsc, Arc};

use aires_core::{CallFailure, Effect, Msg, NoticeLevel, UploadedResume, ValidationOutcome};
use aires_engine::{
    ApiError, EngineCommand, EngineError, EngineEvent, EngineHandle, EventSink, FailureKind,
    ToastOptions, ToastQueue, ToastStatus,
};
use aires_logging::{aires_info, aires_warn};

use crate::app::AppEvent;
use crate::config::Settings;

/// Forwards engine completions into the app's message loop.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(event_to_msg(event)));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    toasts: ToastQueue,
}

impl EffectRunner {
    pub fn new(settings: &Settings, tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { tx: tx.clone() });
        let engine = EngineHandle::new(settings.api.clone(), settings.download_dir.clone(), sink)?;
        let toasts = ToastQueue::new(engine.runtime_handle());
        let runner = Self { engine, toasts };
        runner.watch_toasts(tx);
        Ok(runner)
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ValidateResume { request_id, file } => {
                    aires_info!(
                        "ValidateResume request_id={} file={}",
                        request_id,
                        file.display_name()
                    );
                    self.engine.submit(EngineCommand::Validate {
                        request_id,
                        path: file.path,
                    });
                }
                Effect::UploadResume { request_id, file } => {
                    aires_info!(
                        "UploadResume request_id={} file={}",
                        request_id,
                        file.display_name()
                    );
                    self.engine.submit(EngineCommand::Upload {
                        request_id,
                        path: file.path,
                    });
                }
                Effect::RewriteResume {
                    request_id,
                    resume_id,
                } => {
                    self.engine.submit(EngineCommand::Rewrite {
                        request_id,
                        resume_id,
                    });
                }
                Effect::ReviseResume {
                    request_id,
                    resume_id,
                    feedback,
                    current_version,
                } => {
                    self.engine.submit(EngineCommand::Revise {
                        request_id,
                        resume_id,
                        feedback,
                        current_version,
                    });
                }
                Effect::GeneratePdf {
                    request_id,
                    resume_id,
                    content,
                } => {
                    self.engine.submit(EngineCommand::GeneratePdf {
                        request_id,
                        resume_id,
                        content,
                    });
                }
                Effect::Notify(notice) => {
                    self.toasts.notify(
                        notice.title,
                        notice.description,
                        ToastOptions::status(map_level(notice.level)),
                    );
                }
            }
        }
    }

    /// Wakes the message loop whenever a toast appears or expires.
    fn watch_toasts(&self, tx: mpsc::Sender<AppEvent>) {
        let mut rx = self.toasts.subscribe();
        self.engine.runtime_handle().spawn(async move {
            while rx.changed().await.is_ok() {
                if tx.send(AppEvent::ToastsChanged).is_err() {
                    break;
                }
            }
        });
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Validated { request_id, result } => Msg::ValidationFinished {
            request_id,
            result: result
                .map(|report| ValidationOutcome {
                    is_resume: report.is_resume,
                    confidence: report.confidence,
                    top_label: report.top_label,
                })
                .map_err(map_failure),
        },
        EngineEvent::Uploaded { request_id, result } => Msg::UploadFinished {
            request_id,
            result: result
                .map(|stored| UploadedResume {
                    id: stored.id,
                    original_text: stored.text,
                })
                .map_err(map_failure),
        },
        EngineEvent::Rewritten { request_id, result } => Msg::RewriteFinished {
            request_id,
            result: result.map_err(map_failure),
        },
        EngineEvent::Revised { request_id, result } => Msg::RevisionFinished {
            request_id,
            result: result.map_err(map_failure),
        },
        EngineEvent::PdfSaved { request_id, result } => Msg::DownloadFinished {
            request_id,
            result: result.map_err(map_failure),
        },
    }
}

/// Local file problems carry their own message; everything the server sent
/// back keeps only the server's `error` text.
fn map_failure(err: ApiError) -> CallFailure {
    aires_warn!("call failed: {err}");
    if err.is_network() {
        return CallFailure::Network;
    }
    match err.kind {
        FailureKind::Io => CallFailure::server(err.message),
        _ => CallFailure::Server {
            message: err.server_message,
        },
    }
}

fn map_level(level: NoticeLevel) -> ToastStatus {
    match level {
        NoticeLevel::Default => ToastStatus::Default,
        NoticeLevel::Success => ToastStatus::Success,
        NoticeLevel::Error => ToastStatus::Error,
        NoticeLevel::Warning => ToastStatus::Warning,
    }
}

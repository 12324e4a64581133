use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use aires_logging::{aires_debug, aires_info, aires_warn};

use crate::api::{ApiSettings, ReqwestResumeApi, ResumeApi, UploadFile};
use crate::persist::AtomicFileWriter;
use crate::{ApiError, EngineEvent, FailureKind, RequestId, ResumeId};

/// Name of the generated document inside the download directory.
pub const PDF_FILE_NAME: &str = "improved_resume.pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Validate {
        request_id: RequestId,
        path: PathBuf,
    },
    Upload {
        request_id: RequestId,
        path: PathBuf,
    },
    Rewrite {
        request_id: RequestId,
        resume_id: ResumeId,
    },
    Revise {
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
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
}

/// Owns the async runtime and runs every command on it. Each command ends in
/// exactly one [`EngineEvent`] delivered to the sink.
pub struct EngineHandle {
    runtime: tokio::runtime::Runtime,
    api: Arc<dyn ResumeApi>,
    writer: Arc<AtomicFileWriter>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(
        settings: ApiSettings,
        download_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let api = Arc::new(ReqwestResumeApi::new(settings)?);
        Ok(Self::with_api(api, download_dir, sink)?)
    }

    pub fn with_api(
        api: Arc<dyn ResumeApi>,
        download_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("aires-engine")
            .build()?;
        Ok(Self {
            runtime,
            api,
            writer: Arc::new(AtomicFileWriter::new(download_dir)),
            sink,
        })
    }

    /// Handle for spawning timers (toasts) on the engine runtime.
    pub fn runtime_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn download_dir(&self) -> PathBuf {
        self.writer.dir().to_path_buf()
    }

    pub fn submit(&self, command: EngineCommand) {
        aires_debug!("engine command: {command:?}");
        let api = self.api.clone();
        let writer = self.writer.clone();
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            let event = handle_command(api.as_ref(), writer.as_ref(), command).await;
            sink.emit(event);
        });
    }
}

async fn handle_command(
    api: &dyn ResumeApi,
    writer: &AtomicFileWriter,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Validate { request_id, path } => {
            let result = match UploadFile::read(&path).await {
                Ok(file) => api.validate(&file).await,
                Err(err) => Err(err),
            };
            log_outcome("validate", request_id, &result);
            EngineEvent::Validated { request_id, result }
        }
        EngineCommand::Upload { request_id, path } => {
            let result = match UploadFile::read(&path).await {
                Ok(file) => api.upload(&file).await,
                Err(err) => Err(err),
            };
            log_outcome("upload", request_id, &result);
            EngineEvent::Uploaded { request_id, result }
        }
        EngineCommand::Rewrite {
            request_id,
            resume_id,
        } => {
            let result = api.rewrite(resume_id).await;
            log_outcome("rewrite", request_id, &result);
            EngineEvent::Rewritten { request_id, result }
        }
        EngineCommand::Revise {
            request_id,
            resume_id,
            feedback,
            current_version,
        } => {
            let result = api.revise(resume_id, &feedback, &current_version).await;
            log_outcome("revise", request_id, &result);
            EngineEvent::Revised { request_id, result }
        }
        EngineCommand::GeneratePdf {
            request_id,
            resume_id,
            content,
        } => {
            let result = match api.generate_pdf(resume_id, &content).await {
                Ok(bytes) => writer
                    .write(PDF_FILE_NAME, &bytes)
                    .map_err(|err| ApiError::new(FailureKind::Io, err.to_string())),
                Err(err) => Err(err),
            };
            if let Ok(path) = &result {
                aires_info!("pdf saved to {}", path.display());
            }
            log_outcome("generate_pdf", request_id, &result);
            EngineEvent::PdfSaved { request_id, result }
        }
    }
}

fn log_outcome<T>(operation: &str, request_id: RequestId, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => aires_info!("{operation} request {request_id} succeeded"),
        Err(err) => aires_warn!("{operation} request {request_id} failed: {err}"),
    }
}

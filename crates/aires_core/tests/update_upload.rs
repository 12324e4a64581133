use std::sync::Once;

use aires_core::{
    update, AppState, CallFailure, Effect, Msg, Notice, NoticeLevel, SelectedFile, UploadedResume,
    ValidationOutcome,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(aires_logging::initialize_for_tests);
}

fn resume_pdf() -> SelectedFile {
    SelectedFile::new("/tmp/jane_doe.pdf")
}

fn select(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::FileSelected(Some(resume_pdf())));
    match effects.as_slice() {
        [Effect::ValidateResume { request_id, file }] => {
            assert_eq!(file, &resume_pdf());
            (state, *request_id)
        }
        other => panic!("expected a single validate effect, got {other:?}"),
    }
}

#[test]
fn selecting_a_file_starts_validation() {
    init_logging();
    let (mut state, _request_id) = select(AppState::new());
    let view = state.view();

    assert!(view.upload.validating);
    assert_eq!(view.upload.file_name.as_deref(), Some("jane_doe.pdf"));
    assert!(view.upload.error.is_none());
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn negative_classification_blocks_upload() {
    init_logging();
    let (state, request_id) = select(AppState::new());

    let (state, effects) = update(
        state,
        Msg::ValidationFinished {
            request_id,
            result: Ok(ValidationOutcome {
                is_resume: false,
                confidence: 0.12,
                top_label: None,
            }),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.upload.validating);
    let banner = view.upload.banner.expect("banner shown");
    assert!(!banner.positive);
    assert_eq!(
        banner.text,
        "This doesn't appear to be a resume. Please upload a valid resume."
    );
    assert!(view.rewrite.is_none());
}

#[test]
fn positive_classification_uploads_and_opens_resume() {
    init_logging();
    let (state, request_id) = select(AppState::new());

    let (state, effects) = update(
        state,
        Msg::ValidationFinished {
            request_id,
            result: Ok(ValidationOutcome {
                is_resume: true,
                confidence: 0.9734,
                top_label: Some("resume".to_string()),
            }),
        },
    );

    let upload_id = match effects.as_slice() {
        [Effect::UploadResume { request_id, file }] => {
            assert_eq!(file, &resume_pdf());
            *request_id
        }
        other => panic!("expected upload effect, got {other:?}"),
    };
    let view = state.view();
    assert!(view.upload.validating);
    let banner = view.upload.banner.unwrap();
    assert!(banner.positive);
    assert_eq!(
        banner.text,
        "This appears to be a valid resume! (Confidence: 97.34%)"
    );
    assert_eq!(banner.top_label.as_deref(), Some("resume"));

    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: upload_id,
            result: Ok(UploadedResume {
                id: 42,
                original_text: "Jane Doe\nEngineer".to_string(),
            }),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.upload.validating);
    let rewrite = view.rewrite.expect("rewrite flow opened");
    assert_eq!(rewrite.resume_id, 42);
    assert_eq!(rewrite.original, "Jane Doe\nEngineer");
    assert!(!rewrite.has_rewrite);
}

#[test]
fn network_failure_during_validation_shows_connect_message() {
    init_logging();
    let (state, request_id) = select(AppState::new());

    let (state, effects) = update(
        state,
        Msg::ValidationFinished {
            request_id,
            result: Err(CallFailure::Network),
        },
    );

    let message = "Cannot connect to server. Please make sure the backend service is running.";
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::new(NoticeLevel::Error, "Error", message))]
    );
    let view = state.view();
    assert_eq!(view.upload.error.as_deref(), Some(message));
    assert!(view.upload.banner.is_none());
    assert!(!view.upload.validating);
}

#[test]
fn server_rejection_uses_server_message_or_fallback() {
    init_logging();
    let (state, request_id) = select(AppState::new());
    let (state, _) = update(
        state,
        Msg::ValidationFinished {
            request_id,
            result: Err(CallFailure::server("File must be a PDF")),
        },
    );
    assert_eq!(state.view().upload.error.as_deref(), Some("File must be a PDF"));

    let (state, request_id) = select(state);
    let (state, _) = update(
        state,
        Msg::ValidationFinished {
            request_id,
            result: Err(CallFailure::Server { message: None }),
        },
    );
    assert_eq!(
        state.view().upload.error.as_deref(),
        Some("Error validating resume")
    );
}

#[test]
fn upload_failure_reports_and_clears_flag() {
    init_logging();
    let (state, request_id) = select(AppState::new());
    let (state, effects) = update(
        state,
        Msg::ValidationFinished {
            request_id,
            result: Ok(ValidationOutcome {
                is_resume: true,
                confidence: 0.8,
                top_label: None,
            }),
        },
    );
    let Effect::UploadResume { request_id, .. } = effects[0].clone() else {
        panic!("expected upload effect");
    };

    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id,
            result: Err(CallFailure::Network),
        },
    );
    assert_eq!(state.view().upload.error.as_deref(), Some("File upload failed"));
    assert!(!state.view().upload.validating);
    assert!(state.view().rewrite.is_none());
    assert_eq!(effects.len(), 1);
}

#[test]
fn second_selection_while_validating_is_ignored() {
    init_logging();
    let (state, _request_id) = select(AppState::new());
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::FileSelected(Some(SelectedFile::new("/tmp/other.pdf"))),
    );

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn stale_validation_result_is_dropped() {
    init_logging();
    let (state, request_id) = select(AppState::new());
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::ValidationFinished {
            request_id: request_id + 100,
            result: Ok(ValidationOutcome {
                is_resume: true,
                confidence: 1.0,
                top_label: None,
            }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

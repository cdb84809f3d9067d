//! Check Disease handlers: upload then predict

use axum::extract::{multipart::MultipartError, Multipart, State};
use axum::http::StatusCode;
use tracing::{error, info, warn};

use super::{respond, ClientSession, PageResponse};
use crate::classify::{Upload, UploadError};
use crate::ui::{Advisory, PageView};
use crate::AppState;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

/// POST /check-disease/upload
///
/// Stages the image and shows it with a Predict button. A new upload
/// replaces any pending one. Rejected files and unreadable bodies leave the
/// session as it was.
pub async fn upload_image(
    State(state): State<AppState>,
    ClientSession(handle): ClientSession,
    multipart: Multipart,
) -> PageResponse {
    let mut session = handle.session.lock().await;
    if let Err(e) = session.require_check_disease() {
        return respond(&handle, &session, PageView::with_advisory(Advisory::warning(e.to_string()))).await;
    }

    let received = match read_image_field(multipart).await {
        Ok(received) => received,
        Err(e) => {
            let advisory = multipart_advisory(&e, state.max_upload_bytes);
            return respond(&handle, &session, PageView::with_advisory(advisory)).await;
        }
    };

    let upload = match received {
        Ok(upload) => upload,
        Err(e) => {
            info!("Upload rejected: {}", e);
            return respond(&handle, &session, PageView::with_advisory(Advisory::error(e.to_string()))).await;
        }
    };

    let view = match state.uploads.stage(upload).await {
        Ok(staged) => match session.stage_upload(staged) {
            Ok(()) => PageView::default(),
            Err(e) => PageView::with_advisory(Advisory::warning(e.to_string())),
        },
        Err(e) => {
            error!("Failed to stage upload: {}", e);
            PageView::with_advisory(Advisory::error(e.to_string()))
        }
    };

    respond(&handle, &session, view).await
}

/// First `image` field of the body, validated as an upload
async fn read_image_field(mut multipart: Multipart) -> Result<Result<Upload, UploadError>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Upload::new(&file_name, bytes.to_vec()));
    }
    Ok(Err(UploadError::Missing))
}

fn multipart_advisory(err: &MultipartError, max_upload_bytes: usize) -> Advisory {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        info!("Upload rejected: body exceeds {} bytes", max_upload_bytes);
        Advisory::error(format!(
            "The image is larger than {} MB.",
            max_upload_bytes.div_ceil(1024 * 1024)
        ))
    } else {
        warn!("Unreadable upload body: {}", err);
        Advisory::error("The upload could not be read. Please try again.")
    }
}

/// POST /check-disease/predict
///
/// Consumes the pending upload: the staged file is gone once this returns,
/// whether classification succeeded or not.
pub async fn predict(State(state): State<AppState>, ClientSession(handle): ClientSession) -> PageResponse {
    let mut session = handle.session.lock().await;

    let upload = match session.take_upload() {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            let advisory = Advisory::warning(UploadError::Missing.to_string());
            return respond(&handle, &session, PageView::with_advisory(advisory)).await;
        }
        Err(e) => {
            return respond(&handle, &session, PageView::with_advisory(Advisory::warning(e.to_string()))).await;
        }
    };

    let preview = match upload.preview_data_uri().await {
        Ok(uri) => Some(uri),
        Err(e) => {
            warn!("Cannot read staged upload for preview: {}", e);
            None
        }
    };

    let view = match state.pipeline.classify_staged(upload).await {
        Ok(result) => PageView {
            advisory: Some(Advisory::success("Prediction Completed!")),
            result: Some(result),
            preview,
            ..PageView::default()
        },
        Err(e) => {
            warn!("Classification failed: {}", e);
            PageView::with_advisory(Advisory::error(e.to_string()))
        }
    };

    respond(&handle, &session, view).await
}

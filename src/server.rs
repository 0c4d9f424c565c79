//! HTTP upload endpoint
//!
//! `POST /api/reformat-comments` takes a `multipart/form-data` body with a
//! `file` field and answers with the reformatted workbook as an attachment.
//!
//! ```no_run
//! # async fn run() -> erc_reformat::Result<()> {
//! erc_reformat::server::serve("127.0.0.1:3000").await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ReformatError, Result};
use crate::processor::process_buffer;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{error, info};

/// Route the upload endpoint is mounted at
pub const REFORMAT_ROUTE: &str = "/api/reformat-comments";

/// Multipart field carrying the workbook
pub const FILE_FIELD: &str = "file";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const ATTACHMENT_DISPOSITION: &str = "attachment; filename=\"reformatted_comments.xlsx\"";

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Router exposing the upload endpoint
pub fn router() -> Router {
    Router::new()
        .route(REFORMAT_ROUTE, post(reformat_comments))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Bind `addr` and serve [`router`] until the process exits
pub async fn serve<A: ToSocketAddrs>(addr: A) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn reformat_comments(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let upload = match multipart {
        Ok(multipart) => handle_upload(multipart).await,
        Err(_) => Err(ReformatError::NoFileProvided),
    };

    match upload {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, ATTACHMENT_DISPOSITION),
            ],
            bytes,
        )
            .into_response(),
        Err(err) if err.is_client_error() => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": "No file provided" }))).into_response()
        }
        Err(err) => {
            error!("Error processing file: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process file" })),
            )
                .into_response()
        }
    }
}

async fn handle_upload(multipart: Multipart) -> Result<Vec<u8>> {
    let upload = file_field(multipart).await?;
    info!(bytes = upload.len(), "received upload");

    tokio::task::spawn_blocking(move || process_buffer(&upload))
        .await
        .map_err(|e| ReformatError::SerializationFailure(e.to_string()))?
}

/// Bytes of the first `file` field; a missing or empty field counts as no
/// file, a body that breaks off or exceeds the limit is an upload failure
async fn file_field(mut multipart: Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart.next_field().await.map_err(upload_failed)? {
        if field.name() == Some(FILE_FIELD) {
            let data = field.bytes().await.map_err(upload_failed)?;
            if data.is_empty() {
                break;
            }
            return Ok(data.to_vec());
        }
    }
    Err(ReformatError::NoFileProvided)
}

fn upload_failed(err: MultipartError) -> ReformatError {
    ReformatError::UploadFailed(err.to_string())
}

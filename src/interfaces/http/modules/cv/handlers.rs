//! CV file handlers
//!
//! One PDF slot on disk: uploads always land at the configured
//! `dir/filename` path, so a new upload replaces the previous CV and
//! the download route never has to pick between versions. The client's
//! original filename is only echoed back, never used for the path.

use std::path::PathBuf;

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::interfaces::http::common::ErrorBody;

/// Upload cap in bytes.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// CV handler state.
#[derive(Clone)]
pub struct CvState {
    /// Directory the CV is stored in.
    pub dir: PathBuf,
    /// Fixed on-disk filename (also the download filename).
    pub filename: String,
}

impl CvState {
    fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Successful upload payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadCvResponse {
    pub message: String,
    /// Filename as sent by the client.
    pub filename: String,
    /// Stored size in bytes.
    pub size: u64,
}

#[utoipa::path(
    post,
    path = "/cv/upload",
    tag = "CV",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CV stored", body = UploadCvResponse),
        (status = 400, description = "Missing, oversize, or non-PDF file", body = ErrorBody)
    )
)]
pub async fn upload_cv(
    State(state): State<CvState>,
    mut multipart: Multipart,
) -> Result<Json<UploadCvResponse>, DomainError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| DomainError::validation("Invalid multipart payload"))?
    {
        if field.name() == Some("cv") {
            let filename = field
                .file_name()
                .unwrap_or(state.filename.as_str())
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| DomainError::validation("Could not read uploaded file"))?;
            upload = Some((filename, data));
            break;
        }
    }

    let Some((filename, data)) = upload else {
        return Err(DomainError::validation("No file uploaded"));
    };

    if data.len() > MAX_FILE_SIZE {
        return Err(DomainError::validation("File size exceeds 5MB limit"));
    }
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(DomainError::validation("Only PDF files are allowed"));
    }
    if !data.starts_with(PDF_MAGIC) {
        return Err(DomainError::validation("File is not a valid PDF"));
    }

    tokio::fs::create_dir_all(&state.dir)
        .await
        .map_err(|e| DomainError::Internal(format!("Could not create upload directory: {}", e)))?;
    let path = state.path();
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| DomainError::Internal(format!("Could not store CV: {}", e)))?;

    info!("CV stored at {} ({} bytes)", path.display(), data.len());

    Ok(Json(UploadCvResponse {
        message: "CV uploaded successfully".to_string(),
        filename,
        size: data.len() as u64,
    }))
}

#[utoipa::path(
    get,
    path = "/cv/download",
    tag = "CV",
    responses(
        (status = 200, description = "The stored PDF", content_type = "application/pdf"),
        (status = 404, description = "No CV uploaded yet", body = ErrorBody)
    )
)]
pub async fn download_cv(State(state): State<CvState>) -> Result<Response, DomainError> {
    let path = state.path();
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DomainError::NotFound("CV file".to_string()));
        }
        Err(e) => return Err(DomainError::Internal(format!("Could not read CV: {}", e))),
    };

    let headers = [
        ("content-type", "application/pdf".to_string()),
        (
            "content-disposition",
            format!("attachment; filename={}", state.filename),
        ),
        ("content-transfer-encoding", "binary".to_string()),
        ("cache-control", "no-cache".to_string()),
    ];

    Ok((headers, data).into_response())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::DefaultBodyLimit;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use uuid::Uuid;

    const BOUNDARY: &str = "cv-test-boundary";

    fn test_state() -> CvState {
        CvState {
            dir: std::env::temp_dir().join(format!("cv-test-{}", Uuid::new_v4())),
            filename: "cv.pdf".to_string(),
        }
    }

    fn app(state: CvState) -> Router {
        Router::new()
            .route(
                "/cv/upload",
                post(upload_cv).layer(DefaultBodyLimit::max(6 * 1024 * 1024)),
            )
            .route("/cv/download", get(download_cv))
            .with_state(state)
    }

    fn multipart_body(field: &str, filename: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY,
        )
    }

    async fn send(app: Router, req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app.into_service();
        svc.call(req).await.unwrap()
    }

    fn upload_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/cv/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upload_then_download_round_trips() {
        let state = test_state();

        let resp = send(
            app(state.clone()),
            upload_request(multipart_body("cv", "resume.pdf", "%PDF-1.4 fake document")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "CV uploaded successfully");
        assert_eq!(json["filename"], "resume.pdf");
        assert_eq!(json["size"], 22);

        let resp = send(
            app(state),
            Request::builder()
                .method("GET")
                .uri("/cv/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        assert_eq!(
            resp.headers().get("content-disposition").unwrap(),
            "attachment; filename=cv.pdf"
        );

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn missing_cv_field_is_rejected() {
        let resp = send(
            app(test_state()),
            upload_request(multipart_body("file", "resume.pdf", "%PDF-1.4")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn non_pdf_extension_is_rejected() {
        let resp = send(
            app(test_state()),
            upload_request(multipart_body("cv", "resume.txt", "%PDF-1.4")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn wrong_magic_bytes_are_rejected() {
        let resp = send(
            app(test_state()),
            upload_request(multipart_body("cv", "resume.pdf", "just some text")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "File is not a valid PDF");
    }

    #[tokio::test]
    async fn oversize_upload_is_rejected() {
        let padding = "a".repeat(MAX_FILE_SIZE);
        let resp = send(
            app(test_state()),
            upload_request(multipart_body(
                "cv",
                "resume.pdf",
                &format!("%PDF-{}", padding),
            )),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["message"],
            "File size exceeds 5MB limit"
        );
    }

    #[tokio::test]
    async fn download_without_upload_is_404() {
        let resp = send(
            app(test_state()),
            Request::builder()
                .method("GET")
                .uri("/cv/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "CV file not found");
    }
}

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;
use url::form_urlencoded;

use common::types::ErrorBody;
use service::datasets::{DataFormat, DataLookup, Dataset, UploadSummary};

use crate::errors::ApiError;
use crate::state::AppState;

/// Multipart part carrying the CSV file.
const FILE_FIELD: &str = "file";

#[derive(Serialize, Debug)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

/// Upload a CSV file and keep it in memory under its filename
#[utoipa::path(
    post,
    path = "/api/upload-csv/",
    tag = "datasets",
    request_body(content = crate::openapi::UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored", body = crate::openapi::UploadSummaryDoc),
        (status = 413, description = "Upload larger than the configured body limit", body = crate::openapi::ErrorBodyDoc),
        (status = 422, description = "Missing `file` part", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Not UTF-8 or not valid CSV")
    )
)]
pub async fn upload_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadSummary>, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::from_multipart(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::decode("field `file` must be a file upload with a filename")),
        };
        let raw = field
            .bytes()
            .await
            .map_err(|e| ApiError::from_multipart(e.status(), e.body_text()))?;
        let summary = state.datasets.upload(&filename, raw.to_vec()).await?;
        return Ok(Json(summary));
    }

    Err(ApiError::decode("field `file` is required"))
}

/// List stored filenames
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "datasets",
    responses((status = 200, description = "Stored filenames", body = crate::openapi::FilesResponseDoc))
)]
pub async fn list_files(State(state): State<AppState>) -> Json<FilesResponse> {
    Json(FilesResponse { files: state.datasets.list_files().await })
}

/// Fetch a stored file as JSON records (default) or as the original CSV
#[utoipa::path(
    get,
    path = "/api/data/{filename}",
    tag = "datasets",
    params(
        ("filename" = String, Path, description = "Name the file was uploaded with"),
        crate::openapi::DataQueryDoc
    ),
    responses(
        (status = 200, description = "JSON array of row objects, the raw CSV when format=csv, or {\"error\": ...} for an unknown file")
    )
)]
pub async fn get_data(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let format = DataFormat::from_query(format_param(query.as_deref()).as_deref());
    match state.datasets.get_data(&filename, format).await {
        DataLookup::NotFound(msg) => Json(ErrorBody::new(msg)).into_response(),
        DataLookup::Csv(dataset) => csv_attachment(&dataset),
        DataLookup::Json(dataset) => Json(dataset.table().records()).into_response(),
    }
}

/// Value of `format` in the query string; the last one wins when it repeats.
fn format_param(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == "format")
        .last()
        .map(|(_, value)| value.into_owned())
}

fn csv_attachment(dataset: &Dataset) -> Response {
    let disposition = format!("attachment; filename={}", dataset.filename());
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    info!(filename = %dataset.filename(), bytes = dataset.raw().len(), "serving raw csv");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(dataset.raw().to_vec()),
    )
        .into_response()
}

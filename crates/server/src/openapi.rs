use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(ToSchema)]
pub struct UploadSummaryDoc { pub message: String, pub rows: usize }

#[derive(ToSchema)]
pub struct FilesResponseDoc { pub files: Vec<String> }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String }

#[derive(utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DataQueryDoc {
    /// `csv` for the raw upload; anything else returns JSON. Last value wins when repeated.
    pub format: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::datasets::upload_csv,
        crate::routes::datasets::list_files,
        crate::routes::datasets::get_data,
    ),
    components(
        schemas(
            HealthResponse,
            UploadForm,
            UploadSummaryDoc,
            FilesResponseDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "datasets")
    )
)]
pub struct ApiDoc;

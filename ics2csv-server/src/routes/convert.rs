//! Upload endpoints

use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use ics2csv_core::upload::{CSV_CONTENT_TYPE, with_bom};
use ics2csv_core::{Conversion, ConversionResult, ConvertResult, Upload, Variant};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

/// Multipart field holding the .ics file
const FILE_FIELD: &str = "file";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/convert", post(convert))
        .route("/api/convert/json", post(convert_json))
}

#[derive(Deserialize)]
pub struct ConvertParams {
    pub variant: Option<Variant>,
}

/// POST /api/convert - Upload an .ics file, download the .csv
async fn convert(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart).await?;
    let conversion = run(&state, params.variant, upload.as_ref())?;

    let file_name = upload
        .as_ref()
        .map(Upload::output_file_name)
        .unwrap_or_default();

    let body = if state.config().bom {
        with_bom(&conversion.csv)
    } else {
        conversion.csv.into_bytes()
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        body,
    )
        .into_response())
}

/// POST /api/convert/json - Same input, `{csv}` or `{error}` as JSON
async fn convert_json(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    multipart: Multipart,
) -> Result<Json<ConversionResult>, AppError> {
    let upload = read_upload(multipart).await?;
    let result: ConvertResult<Conversion> = run(&state, params.variant, upload.as_ref());
    Ok(Json(result.into()))
}

fn run(
    state: &AppState,
    variant: Option<Variant>,
    upload: Option<&Upload>,
) -> ConvertResult<Conversion> {
    let converter = state.converter(variant);
    let conversion = converter.convert_upload(upload)?;

    tracing::info!(
        file = upload.and_then(|u| u.file_name.as_deref()).unwrap_or("<unnamed>"),
        variant = %converter.variant,
        rows = conversion.rows,
        "converted upload"
    );

    Ok(conversion)
}

/// Pull the `file` field out of the form. Other fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;

        return Ok(Some(Upload::new(file_name, content_type, bytes.to_vec())));
    }

    Ok(None)
}

/// `attachment` disposition with an ASCII fallback name and the UTF-8 name
/// in `filename*` (RFC 6266).
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if fallback == file_name {
        return format!("attachment; filename=\"{file_name}\"");
    }

    let encoded = urlencoding::encode(file_name);

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use common::types::Envelope;
use models::record::Record;
use serde_json::Value;
use service::{errors::ServiceError, records::RecordInput};
use tracing::info;

use crate::errors::ApiError;
use crate::startup::AppState;

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

/// Any integer is a well-formed id; one outside the id range cannot name a record.
fn parse_id(id: Result<Path<String>, PathRejection>) -> Result<u64, ApiError> {
    let Path(raw) = id?;
    let raw = raw.trim();
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest(format!("id must be an integer, got `{raw}`")));
    }
    raw.parse::<u64>()
        .map_err(|_| ServiceError::not_found("record").into())
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<RecordInput, ApiError> {
    let Json(body) = body?;
    Ok(RecordInput::from_json(&body)?)
}

#[utoipa::path(get, path = "/api/records", tag = "records", responses((status = 200, description = "All records in insertion order", body = crate::openapi::RecordListEnvelopeDoc)))]
pub async fn list_records(State(state): State<AppState>) -> Reply<Vec<Record>> {
    let records = state.records.list().await;
    info!(count = records.len(), "list records");
    Ok((StatusCode::OK, Json(Envelope::ok(records, "records listed successfully"))))
}

#[utoipa::path(
    get,
    path = "/api/records/{id}",
    tag = "records",
    params(("id" = u64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record found", body = crate::openapi::RecordEnvelopeDoc),
        (status = 400, description = "Id is not an integer", body = crate::openapi::MessageEnvelopeDoc),
        (status = 404, description = "Record not found", body = crate::openapi::MessageEnvelopeDoc)
    )
)]
pub async fn get_record(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Reply<Record> {
    let id = parse_id(id)?;
    let record = state.records.get(id).await?;
    Ok((StatusCode::OK, Json(Envelope::ok(record, "record found"))))
}

#[utoipa::path(
    post,
    path = "/api/records",
    tag = "records",
    request_body = crate::openapi::RecordInputDoc,
    responses(
        (status = 201, description = "Record created", body = crate::openapi::RecordEnvelopeDoc),
        (status = 400, description = "Missing or invalid fields", body = crate::openapi::MessageEnvelopeDoc)
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Record> {
    let input = parse_body(body)?;
    let record = state
        .records
        .create(input)
        .await
        .map_err(|e| ApiError::from(e).context("failed to create record"))?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(record, "record created successfully"))))
}

#[utoipa::path(
    put,
    path = "/api/records/{id}",
    tag = "records",
    params(("id" = u64, Path, description = "Record id")),
    request_body = crate::openapi::RecordInputDoc,
    responses(
        (status = 200, description = "Record updated", body = crate::openapi::RecordEnvelopeDoc),
        (status = 400, description = "Missing or invalid fields", body = crate::openapi::MessageEnvelopeDoc),
        (status = 404, description = "Record not found", body = crate::openapi::MessageEnvelopeDoc)
    )
)]
pub async fn update_record(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Record> {
    let id = parse_id(id)?;
    // field validation comes before the existence check
    let input = parse_body(body)?;
    let record = state
        .records
        .update(id, input)
        .await
        .map_err(|e| ApiError::from(e).context("failed to update record"))?;
    Ok((StatusCode::OK, Json(Envelope::ok(record, "record updated successfully"))))
}

#[utoipa::path(
    delete,
    path = "/api/records/{id}",
    tag = "records",
    params(("id" = u64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record deleted", body = crate::openapi::MessageEnvelopeDoc),
        (status = 404, description = "Record not found", body = crate::openapi::MessageEnvelopeDoc)
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Reply<()> {
    let id = parse_id(id)?;
    state
        .records
        .delete(id)
        .await
        .map_err(|e| ApiError::from(e).context("failed to delete record"))?;
    Ok((StatusCode::OK, Json(Envelope::done("record deleted successfully"))))
}

#[utoipa::path(
    get,
    path = "/api/records/export",
    tag = "records",
    responses(
        (status = 200, description = "CSV file written", body = crate::openapi::MessageEnvelopeDoc),
        (status = 500, description = "Export failed", body = crate::openapi::MessageEnvelopeDoc)
    )
)]
pub async fn export_records(State(state): State<AppState>) -> Reply<()> {
    let path = state
        .records
        .export()
        .await
        .map_err(|e| ApiError::from(e).context("failed to export records"))?;
    Ok((StatusCode::OK, Json(Envelope::done(format!("records exported to {path}")))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(raw: &str) -> Result<u64, ApiError> {
        parse_id(Ok(Path(raw.to_string())))
    }

    #[test]
    fn plain_ids_parse() {
        assert_eq!(id_of("42").unwrap(), 42);
        assert_eq!(id_of("+7").unwrap(), 7);
    }

    #[test]
    fn integers_outside_u64_are_not_found() {
        for raw in ["-1", "-0", "18446744073709551616", "99999999999999999999"] {
            assert!(matches!(id_of(raw), Err(ApiError::NotFound(_))), "{raw}");
        }
    }

    #[test]
    fn non_integers_are_bad_requests() {
        for raw in ["abc", "1.0", "", "-", "12a", "0x10"] {
            assert!(matches!(id_of(raw), Err(ApiError::BadRequest(_))), "{raw}");
        }
    }
}

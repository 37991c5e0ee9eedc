use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RecordDoc { pub id: u64, pub name: String, pub age: u32 }

/// `age` may also be sent as a numeric string.
#[derive(ToSchema)]
pub struct RecordInputDoc { pub name: String, pub age: u32 }

#[derive(ToSchema)]
pub struct RecordEnvelopeDoc { pub success: bool, pub data: RecordDoc, pub message: String }

#[derive(ToSchema)]
pub struct RecordListEnvelopeDoc { pub success: bool, pub data: Vec<RecordDoc>, pub message: String }

#[derive(ToSchema)]
pub struct MessageEnvelopeDoc { pub success: bool, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::records::list_records,
        crate::routes::records::get_record,
        crate::routes::records::create_record,
        crate::routes::records::update_record,
        crate::routes::records::delete_record,
        crate::routes::records::export_records,
    ),
    components(
        schemas(
            HealthResponse,
            RecordDoc,
            RecordInputDoc,
            RecordEnvelopeDoc,
            RecordListEnvelopeDoc,
            MessageEnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "records")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_record_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for p in ["/health", "/api/records", "/api/records/{id}", "/api/records/export"] {
            assert!(paths.iter().any(|k| k.as_str() == p), "missing {p}");
        }
    }
}

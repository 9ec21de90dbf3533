use axum::Json;
use serde::Serialize;

use crate::validation::RecordType;

#[derive(Serialize)]
pub struct RecordTypeDto {
    #[serde(rename = "type")]
    pub rrtype: RecordType,
    pub description: String,
}

// GET /api/record-types
pub async fn list_record_types() -> Json<Vec<RecordTypeDto>> {
    let types = RecordType::KNOWN
        .into_iter()
        .map(|rrtype| RecordTypeDto {
            description: rrtype.describe().to_string(),
            rrtype,
        })
        .collect();
    Json(types)
}

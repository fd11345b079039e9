//! Advice handler: loads the knowledge base and roster for each request, finds the student and
//! runs the policy engine. Engine-level refusals come back as `{"advice": <message>}` with 200.

use crate::AppState;
use advisor_core::{
    compute_advice, AdviceQuery, AdvisoryError, IngestError, KnowledgeBase, StudentRoster,
    StudentSource,
};
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(serde::Deserialize)]
pub(crate) struct AdviceRequest {
    regnum: String,
    query_type: String,
    /// Number or numeric string; anything else is reported as an invalid value.
    #[serde(default)]
    value: serde_json::Value,
}

/// POST /get_advice
pub(crate) async fn get_advice(
    State(state): State<AppState>,
    Json(req): Json<AdviceRequest>,
) -> Response {
    let query = match AdviceQuery::from_raw(&req.query_type, &req.value) {
        Ok(q) => q,
        Err(e) => {
            tracing::info!(
                target: "advisor::gateway",
                regnum = %req.regnum,
                reason = %e,
                "Advice query rejected"
            );
            return advisory_message(&e);
        }
    };

    let knowledge = match read_table(&state.config.knowledge_base_path)
        .await
        .and_then(|bytes| KnowledgeBase::from_reader(bytes.as_slice()))
    {
        Ok(kb) => kb,
        Err(e) => return ingest_failure("knowledge base", e),
    };
    let roster = match read_table(&state.config.student_data_path)
        .await
        .and_then(|bytes| StudentRoster::from_reader(bytes.as_slice()))
    {
        Ok(r) => r,
        Err(e) => return ingest_failure("student roster", e),
    };

    let Some(student) = roster.find(&req.regnum) else {
        tracing::info!(target: "advisor::gateway", regnum = %req.regnum, "Student not found");
        return advisory_message(&AdvisoryError::StudentNotFound);
    };

    let result = compute_advice(&query, &student, knowledge.entries());
    tracing::info!(
        target: "advisor::gateway",
        regnum = %student.regnum,
        query_type = query.query_type.label(),
        value = query.value,
        "Advice issued"
    );
    Json(result).into_response()
}

async fn read_table(path: &str) -> Result<Vec<u8>, IngestError> {
    tokio::fs::read(path).await.map_err(|source| IngestError::Io {
        path: path.to_string(),
        source,
    })
}

fn advisory_message(e: &AdvisoryError) -> Response {
    Json(serde_json::json!({ "advice": e.advice_message() })).into_response()
}

fn ingest_failure(source: &str, e: IngestError) -> Response {
    tracing::error!(target: "advisor::gateway", source, error = %e, "Data source unavailable");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "status": "error",
            "error": format!("{}: {}", source, e),
        })),
    )
        .into_response()
}

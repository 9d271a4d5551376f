use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use signbook_shared::{SignatureEntry, SignaturePayload};

use crate::state::{AppState, MAX_ENTRIES};
use crate::storage::save_entries;
use crate::validation::validate_payload;

pub async fn create_signature(
    State(state): State<AppState>,
    Json(payload): Json<SignaturePayload>,
) -> (StatusCode, Json<serde_json::Value>) {
    let accepted = match validate_payload(&payload) {
        Ok(accepted) => accepted,
        Err(error) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": error.message() })),
            );
        }
    };
    let entry = SignatureEntry {
        id: Uuid::new_v4().to_string(),
        name: accepted.name,
        message: accepted.message,
        path: accepted.path,
        view_box: accepted.view_box,
        created_at_ms: now_ms(),
    };
    {
        let mut entries = state.entries.write().await;
        entries.push(entry.clone());
        let overflow = entries.len().saturating_sub(MAX_ENTRIES);
        if overflow > 0 {
            entries.drain(0..overflow);
        }
        // The lock stays held across the save so concurrent submissions
        // cannot land an older snapshot on disk last.
        save_entries(&state.entries_file, &entries).await;
    }
    println!("Stored signature {} from {}", entry.id, entry.name);
    (StatusCode::CREATED, Json(json!({ "id": entry.id })))
}

pub async fn list_signatures(State(state): State<AppState>) -> Json<Vec<SignatureEntry>> {
    let entries = state.entries.read().await;
    Json(entries.clone())
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

use crate::{
    AppState,
    types::{ResearchRequest, Result, RunEvent},
};
use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use std::convert::Infallible;

/// Run a research query, streaming progress as Server-Sent Events.
///
/// The connection stays genuinely incremental: each pipeline stage
/// boundary produces one SSE event as it happens, and the final event of a
/// successful run carries the complete report. Clients that want blocking
/// semantics can drain the stream themselves.
pub async fn research(
    State(state): State<AppState>,
    Json(payload): Json<ResearchRequest>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = state
        .orchestrator
        .run(payload.query)
        .map(|item| Ok(to_sse_event(item)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Encode one run element as an SSE event. Successful elements carry the
/// JSON-encoded [`RunEvent`]; a fatal run failure becomes an `error` event
/// naming the failed stage, after which the stream ends.
fn to_sse_event(item: Result<RunEvent>) -> Event {
    match item {
        Ok(run_event) => Event::default().json_data(&run_event).unwrap_or_else(|e| {
            Event::default()
                .event("error")
                .data(format!("event serialization failed: {}", e))
        }),
        Err(e) => {
            let stage = e
                .stage()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Validation".to_string());
            let payload = serde_json::json!({
                "stage": stage,
                "error": e.to_string(),
            });
            Event::default().event("error").data(payload.to_string())
        }
    }
}

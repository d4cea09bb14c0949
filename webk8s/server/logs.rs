use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt, future, stream};
use std::convert::Infallible;
use webk8s_common::normalize_line_endings;
use webk8s_kube::logs::{LogEvent, LogRequest, stream_logs};

use super::AppState;

/// Streams pod logs as server-sent events named `message`, errors are sent in-band.
pub async fn stream(
    State(state): State<AppState>,
    Query(request): Query<LogRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = match state.logs_client().await {
        Ok(client) => stream_logs(client, request, state.config().logs.tail_lines).left_stream(),
        Err(err) => stream::once(future::ready(LogEvent::Error(err.to_string()))).right_stream(),
    };

    Sse::new(events.map(|event| Ok(to_sse_event(&event)))).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &LogEvent) -> Event {
    Event::default()
        .event("message")
        .data(normalize_line_endings(&event.text()))
}

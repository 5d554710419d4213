//! Server-sent events stream of live snapshots

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{AppState, LiveSnapshot};

/// `None` when the snapshot cannot be encoded; the stream skips it
fn snapshot_event(snapshot: &LiveSnapshot) -> Option<Event> {
    match serde_json::to_string(snapshot) {
        Ok(data) => Some(
            Event::default()
                .event("snapshot")
                .id(snapshot.version.to_string())
                .data(data),
        ),
        Err(e) => {
            warn!(version = snapshot.version, error = %e, "Failed to encode snapshot");
            None
        }
    }
}

/// GET /api/events - Current snapshot, then one event per applied change
///
/// Lagging clients skip straight to newer snapshots; versions never go
/// backwards on a single stream.
pub async fn event_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (initial, mut rx) = state.feed.subscribe();
    debug!(version = initial.version, "Event stream subscribed");

    let stream = async_stream::stream! {
        let mut last_version = initial.version;
        if let Some(event) = snapshot_event(&initial) {
            yield Ok(event);
        }

        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    if snapshot.version <= last_version {
                        continue;
                    }
                    last_version = snapshot.version;
                    if let Some(event) = snapshot_event(&snapshot) {
                        yield Ok(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Event stream lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

//! Server-Sent Events (SSE) stream of panel snapshots.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};

use crate::state::AppState;

/// `GET /api/panel/stream`: SSE stream of panel snapshots.
///
/// Subscribes to the snapshot bus and sends each snapshot as a JSON `data:`
/// frame, one per simulation tick. The stream continues until the client
/// disconnects, the bus is closed or the server starts shutting down.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let rx = state.snapshots.subscribe();
    tracing::debug!(
        subscribers = state.snapshots.subscriber_count(),
        "SSE client subscribed to snapshots"
    );

    let snapshot_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(snapshot) => match serde_json::to_string(&snapshot) {
            Ok(json) => Some(Some(Event::default().event("snapshot").data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize snapshot for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some snapshots were dropped");
            None
        }
    });
    // `None` marks shutdown and ends the merged stream.
    let shutdown_stream = WatchStream::new(state.shutdown)
        .filter(|stopping| *stopping)
        .map(|_| None);

    let events = snapshot_stream
        .merge(shutdown_stream)
        .map_while(|event| event.map(Ok));

    Sse::new(events).keep_alive(KeepAlive::default())
}

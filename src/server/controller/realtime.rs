use std::{convert::Infallible, time::Duration};

use axum::{
    extract::State,
    response::{
        sse::{Event as SseEvent, KeepAlive, Sse},
        IntoResponse,
    },
};
use futures::{stream, Stream};
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::server::{service::notification::StatusUpdated, state::AppState};

/// Tag for grouping real-time endpoints in OpenAPI documentation
pub static REALTIME_TAG: &str = "realtime";

const STATUS_UPDATED_EVENT: &str = "statusUpdated";

/// Subscribe to schedule changes.
///
/// Sends a `statusUpdated` server-sent event whenever events are booked, edited or
/// deleted, or when the status refresh changed a status. Clients reload the schedule on
/// receipt; the event carries no payload. A client that falls behind skips the missed
/// notifications.
#[utoipa::path(
    get,
    path = "/api/events/stream",
    tag = REALTIME_TAG,
    responses(
        (status = 200, description = "Server-sent event stream", content_type = "text/event-stream")
    ),
)]
pub async fn event_stream(State(state): State<AppState>) -> impl IntoResponse {
    tracing::debug!("SSE client connected");

    Sse::new(status_updates(state.notifier.subscribe()))
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

fn status_updates(
    receiver: Receiver<StatusUpdated>,
) -> impl Stream<Item = Result<SseEvent, Infallible>> {
    stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(StatusUpdated) => {
                    let event = SseEvent::default().event(STATUS_UPDATED_EVENT).data("");
                    return Some((Ok(event), receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "SSE client lagging, skipped notifications");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::notification::StatusNotifier;
    use futures::StreamExt;

    #[tokio::test]
    async fn forwards_each_notification() {
        let notifier = StatusNotifier::new();
        let mut updates = Box::pin(status_updates(notifier.subscribe()));

        notifier.notify();
        notifier.notify();

        assert!(updates.next().await.is_some());
        assert!(updates.next().await.is_some());
    }

    #[tokio::test]
    async fn ends_when_notifier_is_dropped() {
        let notifier = StatusNotifier::new();
        let mut updates = Box::pin(status_updates(notifier.subscribe()));

        drop(notifier);

        assert!(updates.next().await.is_none());
    }
}

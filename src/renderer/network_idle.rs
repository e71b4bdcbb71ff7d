//! Network-idle detection over CDP network events

use chromiumoxide::Page;
use chromiumoxide::error::CdpError;
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::HashSet;
use std::time::Duration;
use tracing::trace;

/// Request lifecycle transition observed on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    Started(String),
    Finished(String),
}

/// Set of requests that started but have not finished or failed
#[derive(Debug, Default)]
pub struct InflightRequests {
    pending: HashSet<String>,
}

impl InflightRequests {
    pub fn apply(&mut self, event: NetworkEvent) {
        match event {
            // A redirect re-sends the same id, the set absorbs it
            NetworkEvent::Started(id) => {
                self.pending.insert(id);
            }
            NetworkEvent::Finished(id) => {
                self.pending.remove(&id);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Merged stream of request start/finish events for `page`.
///
/// Subscribe before navigating so the document request itself is observed.
pub async fn subscribe(page: &Page) -> Result<BoxStream<'static, NetworkEvent>, CdpError> {
    let started = page
        .event_listener::<EventRequestWillBeSent>()
        .await?
        .map(|e| NetworkEvent::Started(e.request_id.inner().clone()))
        .boxed();
    let finished = page
        .event_listener::<EventLoadingFinished>()
        .await?
        .map(|e| NetworkEvent::Finished(e.request_id.inner().clone()))
        .boxed();
    let failed = page
        .event_listener::<EventLoadingFailed>()
        .await?
        .map(|e| NetworkEvent::Finished(e.request_id.inner().clone()))
        .boxed();

    Ok(stream::select_all([started, finished, failed]).boxed())
}

/// Resolve once no request is in flight and no event arrived for `quiet_window`.
///
/// Never returns on its own while traffic continues; callers bound it with a
/// timeout.
pub async fn wait_for_network_idle<S>(events: &mut S, quiet_window: Duration)
where
    S: futures::Stream<Item = NetworkEvent> + Unpin,
{
    let mut inflight = InflightRequests::default();
    loop {
        if inflight.is_empty() {
            match tokio::time::timeout(quiet_window, events.next()).await {
                Err(_) => return,
                Ok(None) => return,
                Ok(Some(event)) => inflight.apply(event),
            }
        } else {
            match events.next().await {
                Some(event) => inflight.apply(event),
                None => return,
            }
        }
        trace!("In-flight requests: {}", inflight.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_reuses_request_id() {
        let mut inflight = InflightRequests::default();
        inflight.apply(NetworkEvent::Started("1".into()));
        inflight.apply(NetworkEvent::Started("1".into()));
        inflight.apply(NetworkEvent::Started("2".into()));
        assert_eq!(inflight.len(), 2);

        inflight.apply(NetworkEvent::Finished("1".into()));
        inflight.apply(NetworkEvent::Finished("2".into()));
        assert!(inflight.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_after_all_requests_finish() {
        let mut events = stream::iter([
            NetworkEvent::Started("doc".into()),
            NetworkEvent::Started("xhr".into()),
            NetworkEvent::Finished("doc".into()),
            NetworkEvent::Finished("xhr".into()),
        ])
        .chain(stream::pending());

        tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_network_idle(&mut events, Duration::from_millis(500)),
        )
        .await
        .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn never_idle_while_request_pending() {
        let mut events = stream::iter([NetworkEvent::Started("poll".into())])
            .chain(stream::pending());

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_network_idle(&mut events, Duration::from_millis(500)),
        )
        .await;
        assert!(result.is_err());
    }
}

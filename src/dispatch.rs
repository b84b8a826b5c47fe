//! Dispatch: one message to one resolved recipient, with a caller-visible
//! wait bound.

use crate::client::{ProtocolClient, SendAck};
use crate::types::Recipient;
use futures::FutureExt;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default confirmation wait.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

/// Outcome of exactly one send attempt. Never retried automatically.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The message was handed to the transport. The ack is `None` in
    /// fire-and-forget mode (`wait == 0`), where confirmation is not
    /// awaited.
    Delivered(Option<SendAck>),
    Failed(DispatchFailure),
}

/// Why a dispatch failed, distinguishing deadline expiry from transport
/// errors.
#[derive(Debug)]
pub enum DispatchFailure {
    Timeout(Duration),
    Transport(String),
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(wait) => write!(f, "no confirmation within {}s", wait.as_secs()),
            Self::Transport(reason) => write!(f, "transport: {reason}"),
        }
    }
}

/// Send `body` to `recipient`, waiting up to `wait` for the server ack.
///
/// `wait == 0` is a degraded fire-and-forget mode: the send is polled once
/// and, if still pending, detached onto the runtime; the outcome is then
/// `Delivered(None)` rather than a timeout. The underlying transport may
/// still need the connection open for the detached send to complete.
///
/// When the deadline wins the race, the send future is dropped, not
/// cancelled at the transport level; the message may still reach the
/// server. That is a known limitation of the underlying capability.
pub async fn dispatch(
    client: Arc<dyn ProtocolClient>,
    recipient: &Recipient,
    body: &str,
    wait: Duration,
) -> DispatchOutcome {
    let to = recipient.jid().clone();
    let body = body.to_string();
    let send = {
        let client = Arc::clone(&client);
        async move { client.send_message(&to, &body).await }
    };

    if wait.is_zero() {
        let mut send = Box::pin(send);
        return match (&mut send).now_or_never() {
            Some(Ok(ack)) => DispatchOutcome::Delivered(Some(ack)),
            Some(Err(e)) => DispatchOutcome::Failed(DispatchFailure::Transport(e.to_string())),
            None => {
                debug!(%recipient, "fire-and-forget send detached, not waiting for ack");
                tokio::spawn(send);
                DispatchOutcome::Delivered(None)
            }
        };
    }

    match tokio::time::timeout(wait, send).await {
        Ok(Ok(ack)) => DispatchOutcome::Delivered(Some(ack)),
        Ok(Err(e)) => DispatchOutcome::Failed(DispatchFailure::Transport(e.to_string())),
        Err(_) => DispatchOutcome::Failed(DispatchFailure::Timeout(wait)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockClient;

    fn recipient() -> Recipient {
        Recipient::individual("15551234567")
    }

    #[tokio::test]
    async fn immediate_ack_is_delivered() {
        let client: Arc<dyn ProtocolClient> = Arc::new(MockClient::new());
        let outcome = dispatch(client, &recipient(), "hello", DEFAULT_WAIT).await;
        match outcome {
            DispatchOutcome::Delivered(Some(ack)) => assert!(ack.id.starts_with("3EB0")),
            other => panic!("expected Delivered(Some(..)), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_error_is_classified_as_transport() {
        let client: Arc<dyn ProtocolClient> =
            Arc::new(MockClient::new().fail_send("stream closed"));
        let outcome = dispatch(client, &recipient(), "hello", DEFAULT_WAIT).await;
        match outcome {
            DispatchOutcome::Failed(DispatchFailure::Transport(reason)) => {
                assert!(reason.contains("stream closed"));
            }
            other => panic!("expected Failed(Transport), got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expiry_is_classified_as_timeout() {
        let client: Arc<dyn ProtocolClient> =
            Arc::new(MockClient::new().delay_send(Duration::from_secs(60)));
        let outcome = dispatch(client, &recipient(), "hello", Duration::from_secs(1)).await;
        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(DispatchFailure::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn zero_wait_returns_promptly_without_ack() {
        // A send that would never resolve must not block a zero-wait
        // dispatch, and the lack of an ack is not a timeout failure.
        let client: Arc<dyn ProtocolClient> =
            Arc::new(MockClient::new().delay_send(Duration::from_secs(3600)));
        let outcome = dispatch(client, &recipient(), "hello", Duration::ZERO).await;
        assert!(matches!(outcome, DispatchOutcome::Delivered(None)));
    }

    #[tokio::test]
    async fn zero_wait_still_reports_immediate_transport_errors() {
        let client: Arc<dyn ProtocolClient> =
            Arc::new(MockClient::new().fail_send("not connected"));
        let outcome = dispatch(client, &recipient(), "hello", Duration::ZERO).await;
        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(DispatchFailure::Transport(_))
        ));
    }

    #[tokio::test]
    async fn each_call_is_one_send_attempt() {
        let mock = Arc::new(MockClient::new());
        let client: Arc<dyn ProtocolClient> = mock.clone();
        dispatch(Arc::clone(&client), &recipient(), "one", DEFAULT_WAIT).await;
        dispatch(client, &recipient(), "two", DEFAULT_WAIT).await;
        assert_eq!(mock.send_calls(), 2);
    }
}

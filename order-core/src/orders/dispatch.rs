//! Collaborator seams and dispatch
//!
//! Notification and persistence are external systems behind async traits.
//! Dispatch is fire-and-forget relative to the customer session: every call
//! runs in its own spawned task, so dropping the caller (checkout closed,
//! session reset) never cancels an in-flight delivery. No timeout is imposed
//! here; that belongs to the collaborator's own contract.

use async_trait::async_trait;
use serde::Serialize;
use shared::models::PromotionRule;
use shared::order::Order;
use std::sync::Arc;

/// Read-only source of the currently configured promotion rules
///
/// Implementations validate raw catalog data into typed rules at this
/// boundary. The core calls it fresh for each computation; caching across
/// calls is the implementation's business.
pub trait PromotionSource: Send + Sync {
    fn active_rules(&self) -> anyhow::Result<Vec<PromotionRule>>;
}

/// Delivers a formatted message to one recipient (staff chat, webhook, ...)
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, recipient: &str, message: &str) -> anyhow::Result<()>;
}

/// Persists the finalized order snapshot
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Returns the backend-assigned identifier
    async fn persist(&self, order: &Order) -> anyhow::Result<String>;
}

/// Aggregate result of a notification fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub recipients_notified: usize,
    pub recipients_failed: usize,
}

impl DispatchOutcome {
    /// At-least-one-of-N policy: one successful recipient is enough
    pub fn is_success(&self) -> bool {
        self.recipients_notified > 0
    }
}

/// Fan the message out to every recipient concurrently
///
/// One detached task per recipient; failures are logged per recipient and
/// aggregated, never propagated individually.
pub async fn dispatch_notifications(
    sink: Arc<dyn NotificationSink>,
    recipients: &[String],
    message: &str,
) -> DispatchOutcome {
    let mut handles = Vec::with_capacity(recipients.len());

    for recipient in recipients {
        let sink = Arc::clone(&sink);
        let recipient = recipient.clone();
        let message = message.to_string();
        handles.push(tokio::spawn(async move {
            match sink.notify(&recipient, &message).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(recipient = %recipient, error = %e, "Notification failed");
                    false
                }
            }
        }));
    }

    let results = futures::future::join_all(handles).await;
    let recipients_notified = results
        .iter()
        .filter(|result| matches!(result, Ok(true)))
        .count();

    DispatchOutcome {
        recipients_notified,
        recipients_failed: recipients.len() - recipients_notified,
    }
}

/// Best-effort persistence in a detached task
///
/// Failure is logged and never surfaces to the customer flow.
pub fn persist_detached(repository: Arc<dyn OrderRepository>, order: Order) {
    tokio::spawn(async move {
        match repository.persist(&order).await {
            Ok(assigned_id) => {
                tracing::info!(
                    order_number = %order.order_number,
                    assigned_id = %assigned_id,
                    "Order persisted"
                );
            }
            Err(e) => {
                tracing::error!(
                    order_number = %order.order_number,
                    error = %e,
                    "Order persistence failed"
                );
            }
        }
    });
}

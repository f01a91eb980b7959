use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Domain events emitted after state changes commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    StaffCreated {
        staff_id: String,
    },
    LeaveStatusChanged {
        leave_request_id: i32,
        new_status: String,
    },
    StockReceived {
        product_id: i32,
        quantity: i32,
    },
    /// Fired once per removal request, after the deduction transaction
    /// commits.
    StockDeducted {
        removal_request_id: i32,
        request_no: String,
    },
    QuoteCreated {
        quote_id: i32,
        quote_no: String,
    },
    MailDispatched {
        outgoing_mail_id: i32,
    },
    MailFailed {
        outgoing_mail_id: i32,
        error: String,
    },
    SalesOrderApproved {
        sales_order_id: i32,
    },
    UserRegistered {
        user_id: Uuid,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event; a full or closed channel is logged, never fatal.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("failed to enqueue event: {e}");
        }
    }
}

/// Builds a channel pair with the consumer task not yet spawned.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}

/// Drains the event channel, logging each event. Runs until every sender
/// is dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::StockDeducted {
                removal_request_id,
                request_no,
            } => {
                info!(removal_request_id, request_no, "stock deducted");
            }
            Event::MailFailed {
                outgoing_mail_id,
                error,
            } => {
                warn!(outgoing_mail_id, error, "outgoing mail failed");
            }
            other => {
                info!(event = ?other, "event processed");
            }
        }
    }
}

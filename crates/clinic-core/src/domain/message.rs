//! Internal message documents

use crate::types::{MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read status of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    /// Not yet read by the receiver
    Unread,
    /// Read by the receiver
    Read,
}

/// A directed message between two staff or patient accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Primary key
    pub id: MessageId,
    /// Sending user
    pub sender_id: UserId,
    /// Receiving user
    pub receiver_id: UserId,
    /// Message body
    pub body: String,
    /// Read status
    pub status: MessageStatus,
    /// When it was sent
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Send a message timestamped now; status starts as `Unread`
    pub fn send(sender_id: UserId, receiver_id: UserId, body: String) -> Self {
        Self {
            id: MessageId::new(),
            sender_id,
            receiver_id,
            body,
            status: MessageStatus::Unread,
            sent_at: Utc::now(),
        }
    }
}

//! Internal messaging
//!
//! Sending is gated by the fixed role-pair allow-list; the inbox is readable
//! by its receiver only, newest first, with sender identity projected through
//! one batched lookup.

use crate::projections::user_map;
use chrono::{DateTime, Utc};
use clinic_core::domain::Message;
use clinic_core::{AuthContext, ClinicError, MessageId, Result, Role, UserId};
use clinic_policy::engine::message as policy;
use clinic_store::{MessageStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Message send input
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    /// The receiving user
    pub receiver_id: UserId,
    /// Message body, non-empty
    pub body: String,
}

/// Sender identity attached to an inbox row
#[derive(Debug, Clone, Serialize)]
pub struct SenderDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Sender's role
    pub role: Role,
}

/// One row of an inbox listing
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    /// Message id
    pub message_id: MessageId,
    /// Who sent it
    pub sender: Option<SenderDetails>,
    /// Message body
    pub body: String,
    /// When it was sent
    pub sent_at: DateTime<Utc>,
}

/// Messaging operations
pub struct MessageHandler {
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserStore>,
}

impl MessageHandler {
    /// Create a handler over the injected collaborators
    pub fn new(messages: Arc<dyn MessageStore>, users: Arc<dyn UserStore>) -> Self {
        Self { messages, users }
    }

    /// Send a message from the acting user
    pub async fn send(&self, ctx: &AuthContext, request: SendMessageRequest) -> Result<MessageId> {
        if request.body.is_empty() {
            return Err(ClinicError::invalid_input("message body is required"));
        }
        let receiver = self
            .users
            .find_by_id(request.receiver_id)
            .await?
            .ok_or_else(|| ClinicError::not_found("receiver not found"))?;
        policy::may_send(ctx, receiver.role).require()?;

        let message = Message::send(ctx.user_id, request.receiver_id, request.body);
        let id = self.messages.insert(message).await?;
        info!(message_id = %id, sender = %ctx.user_id, "message sent");
        Ok(id)
    }

    /// Read the acting user's inbox, newest first
    pub async fn inbox(&self, ctx: &AuthContext) -> Result<Vec<MessageView>> {
        policy::may_read_inbox(ctx, ctx.user_id).require()?;

        let messages = self.messages.find_inbox(ctx.user_id).await?;
        let senders = user_map(self.users.as_ref(), messages.iter().map(|m| m.sender_id)).await?;

        Ok(messages
            .into_iter()
            .map(|m| MessageView {
                message_id: m.id,
                sender: senders.get(&m.sender_id).map(|u| SenderDetails {
                    first_name: u.personal_details.first_name.clone(),
                    last_name: u.personal_details.last_name.clone(),
                    role: u.role,
                }),
                body: m.body,
                sent_at: m.sent_at,
            })
            .collect())
    }
}

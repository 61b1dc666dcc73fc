//! Inbound host events and control messages.

use serde::{Deserialize, Serialize};

use crate::request::Request;

/// A control message posted to the controller by a client context.
///
/// The wire form carries a `type` discriminator. Unrecognized types
/// deserialize to `Unknown` and are ignored by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Request immediate takeover by a waiting controller version.
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,
    /// Any other message type.
    #[serde(other)]
    Unknown,
}

impl ControlMessage {
    /// Parse a message from its JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Push payload delivered by the host.
///
/// Fields are lenient by design: a malformed payload produces empty
/// notification text rather than a hard failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Target URL opened when the notification is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Correlation tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl PushPayload {
    /// Parse a raw push payload, degrading to defaults on malformed input.
    pub fn parse(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }
}

/// Data attached to a displayed notification for later correlation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// URL opened when the notification is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Delivery time, seconds since the Unix epoch.
    pub delivered_at: i64,
    /// Reference key correlating the notification with its push delivery.
    pub reference: String,
}

/// Events delivered to the controller by the hosting environment.
///
/// One event is handled at a time; each handler's future is the
/// keep-alive contract with the dispatcher.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// First-time initialization of a new controller version.
    Install,
    /// The controller is taking control of open contexts.
    Activate,
    /// An intercepted outbound request.
    Fetch(Request),
    /// An inbound control message.
    Message(ControlMessage),
    /// A push delivery with its raw payload.
    Push(Vec<u8>),
    /// A user clicked a previously shown notification.
    NotificationClick(NotificationData),
}

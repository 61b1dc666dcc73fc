//! Push payload presentation.

use chrono::Utc;
use offline_core::{NotificationData, PushPayload};

/// Icon shown on push notifications.
pub const NOTIFICATION_ICON: &str = "/images/icons/icon-192x192.png";

/// Badge shown on push notifications.
pub const NOTIFICATION_BADGE: &str = "/images/icons/icon-96x96.png";

// Reference used when the payload carries no correlation tag.
const DEFAULT_REFERENCE: &str = "general";

/// A system notification assembled from a push delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Icon asset path.
    pub icon: String,
    /// Badge asset path.
    pub badge: String,
    /// Correlation data carried through to the click handler.
    pub data: NotificationData,
}

impl Notification {
    /// Build a notification from a push payload, stamping the delivery
    /// time and a correlation reference into its data.
    pub fn from_payload(payload: PushPayload) -> Self {
        let reference = payload
            .tag
            .unwrap_or_else(|| DEFAULT_REFERENCE.to_string());
        Self {
            title: payload.title,
            body: payload.body,
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            data: NotificationData {
                url: payload.url,
                delivered_at: Utc::now().timestamp(),
                reference,
            },
        }
    }
}

//! Stripe webhook event types.
//!
//! Structures for parsing Stripe webhook payloads. Only the fields the
//! provisioning workflow needs are captured; the rest of Stripe's event
//! schema is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stripe webhook event (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::from_str(&self.event_type)
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Stripe event types relevant to provisioning.
///
/// Only `checkout.session.completed` triggers any work; every other type is
/// acknowledged without action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    /// Checkout session completed successfully - triggers provisioning.
    CheckoutSessionCompleted,
    /// Any other event type - acknowledged, no side effects.
    Other,
}

impl StripeEventType {
    /// Parse event type from the Stripe event type string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            _ => Self::Other,
        }
    }
}

/// The checkout session snapshot embedded in a completed-checkout event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSessionObject {
    /// Opaque session identifier (cs_xxx format).
    pub id: String,

    /// Purchaser details collected by the hosted checkout form.
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,

    /// Metadata attached when the session was created.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Purchaser details from the hosted checkout form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomerDetails {
    /// Email address entered at checkout.
    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutSessionObject {
    /// Email address of the purchaser, if the gateway captured one.
    pub fn purchaser_email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
    }

    /// Album name metadata attached at checkout creation.
    pub fn album_name(&self) -> Option<&str> {
        self.metadata.get("albumName").map(String::as_str)
    }
}

/// Builder for creating test StripeEvent instances.
#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
    livemode: bool,
}

#[cfg(test)]
impl Default for StripeEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "checkout.session.completed".to_string(),
            created: chrono::Utc::now().timestamp(),
            object: serde_json::json!({}),
            livemode: false,
        }
    }
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData {
                object: self.object,
            },
            livemode: self.livemode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_minimal_event() {
        let json = r#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {
                "object": {}
            },
            "livemode": false
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1234567890");
        assert_eq!(event.event_type, "checkout.session.completed");
        assert_eq!(event.created, 1704067200);
        assert!(!event.livemode);
    }

    #[test]
    fn extra_stripe_fields_are_ignored() {
        let json = r#"{
            "id": "evt_extra",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {} },
            "livemode": true,
            "api_version": "2023-10-16",
            "pending_webhooks": 1
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "evt_extra");
        assert!(event.livemode);
    }

    #[test]
    fn checkout_completed_type_is_recognized() {
        let event = StripeEventBuilder::new().build();
        assert_eq!(event.parsed_type(), StripeEventType::CheckoutSessionCompleted);
    }

    #[test]
    fn unrelated_event_types_map_to_other() {
        for event_type in [
            "invoice.payment_succeeded",
            "customer.subscription.deleted",
            "payment_intent.created",
            "some.future.event",
        ] {
            assert_eq!(StripeEventType::from_str(event_type), StripeEventType::Other);
        }
    }

    #[test]
    fn checkout_session_extracts_email_and_album_name() {
        let event = StripeEventBuilder::new()
            .object(json!({
                "id": "cs_test_abc123",
                "customer_details": { "email": "a@example.com" },
                "metadata": { "albumName": "Smith Wedding" }
            }))
            .build();

        let session: CheckoutSessionObject = event.deserialize_object().unwrap();
        assert_eq!(session.id, "cs_test_abc123");
        assert_eq!(session.purchaser_email(), Some("a@example.com"));
        assert_eq!(session.album_name(), Some("Smith Wedding"));
    }

    #[test]
    fn checkout_session_tolerates_missing_details() {
        let event = StripeEventBuilder::new()
            .object(json!({ "id": "cs_test_bare" }))
            .build();

        let session: CheckoutSessionObject = event.deserialize_object().unwrap();
        assert_eq!(session.purchaser_email(), None);
        assert_eq!(session.album_name(), None);
    }

    #[test]
    fn deserialize_object_fails_for_wrong_shape() {
        let event = StripeEventBuilder::new().object(json!("not an object")).build();
        let result: Result<CheckoutSessionObject, _> = event.deserialize_object();
        assert!(result.is_err());
    }
}

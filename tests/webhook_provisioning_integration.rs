//! Integration tests for the payment-to-provisioning workflow.
//!
//! Drives the application handlers end to end with in-memory port
//! implementations and real HMAC-signed webhook payloads.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use snapalbum::application::handlers::checkout::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
};
use snapalbum::application::handlers::provisioning::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    ProvisionAccountHandler,
};
use snapalbum::domain::foundation::{AlbumId, UserId};
use snapalbum::domain::provisioning::{StripeWebhookVerifier, WebhookError, DEFAULT_ALBUM_NAME};
use snapalbum::ports::{
    Album, AlbumRepository, AlbumRepositoryError, CreateCheckoutSession, CreateUserRequest,
    CreatedUser, GatewayCheckoutSession, GatewayError, IdentityError, IdentityProvider,
    LedgerError, NewAlbum, PaymentGateway, ProcessedSessionStore, UserRole,
};

const WEBHOOK_SECRET: &str = "whsec_integration_secret";
const RESET_URL: &str = "https://snapalbum.example/reset-password";

// ════════════════════════════════════════════════════════════════════════════════
// In-Memory Port Implementations
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct InMemoryIdentityProvider {
    users: Mutex<Vec<(String, String)>>, // (user id, email)
    resets: Mutex<Vec<(String, String)>>, // (email, redirect_to)
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_user(&self, request: CreateUserRequest) -> Result<CreatedUser, IdentityError> {
        assert_eq!(request.role, UserRole::StandardAdmin);
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(_, email)| email == &request.email) {
            return Err(IdentityError::EmailAlreadyRegistered);
        }
        let id = format!("user-{}", users.len() + 1);
        users.push((id.clone(), request.email.clone()));
        Ok(CreatedUser {
            id: UserId::new(id).unwrap(),
            email: request.email,
        })
    }

    async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), IdentityError> {
        self.resets
            .lock()
            .unwrap()
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryAlbumRepository {
    albums: Mutex<Vec<Album>>,
}

#[async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn insert(&self, album: NewAlbum) -> Result<Album, AlbumRepositoryError> {
        let persisted = Album {
            id: AlbumId::new(),
            name: album.name.into_string(),
            created_by: album.created_by,
            created_at: chrono::Utc::now(),
        };
        self.albums.lock().unwrap().push(persisted.clone());
        Ok(persisted)
    }
}

#[derive(Default)]
struct InMemoryLedger {
    sessions: Mutex<Vec<String>>,
}

#[async_trait]
impl ProcessedSessionStore for InMemoryLedger {
    async fn contains(&self, session_id: &str) -> Result<bool, LedgerError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .any(|s| s == session_id))
    }

    async fn mark_processed(&self, session_id: &str) -> Result<(), LedgerError> {
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.iter().any(|s| s == session_id) {
            sessions.push(session_id.to_string());
        }
        Ok(())
    }
}

struct RecordingGateway {
    requests: Mutex<Vec<CreateCheckoutSession>>,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutSession,
    ) -> Result<GatewayCheckoutSession, GatewayError> {
        self.requests.lock().unwrap().push(request);
        Ok(GatewayCheckoutSession {
            id: "cs_live_777".to_string(),
            url: Some("https://checkout.stripe.com/c/pay/cs_live_777".to_string()),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════════

struct Workflow {
    identity: Arc<InMemoryIdentityProvider>,
    albums: Arc<InMemoryAlbumRepository>,
    ledger: Arc<InMemoryLedger>,
    handler: HandlePaymentWebhookHandler,
}

fn workflow() -> Workflow {
    let identity = Arc::new(InMemoryIdentityProvider::default());
    let albums = Arc::new(InMemoryAlbumRepository::default());
    let ledger = Arc::new(InMemoryLedger::default());

    let provisioner = Arc::new(ProvisionAccountHandler::new(
        identity.clone(),
        albums.clone(),
        ledger.clone(),
        RESET_URL.to_string(),
    ));
    let handler = HandlePaymentWebhookHandler::new(
        StripeWebhookVerifier::new(WEBHOOK_SECRET),
        provisioner,
    );

    Workflow {
        identity,
        albums,
        ledger,
        handler,
    }
}

fn sign(payload: &str, timestamp: i64) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(signed_payload.as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

fn signed_command(payload: serde_json::Value) -> HandlePaymentWebhookCommand {
    let payload = serde_json::to_string(&payload).unwrap();
    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign(&payload, timestamp);
    HandlePaymentWebhookCommand {
        payload: payload.into_bytes(),
        signature,
    }
}

fn checkout_completed(session_id: &str, email: &str, album_name: Option<&str>) -> serde_json::Value {
    let mut object = json!({
        "id": session_id,
        "customer_details": { "email": email },
    });
    if let Some(name) = album_name {
        object["metadata"] = json!({ "albumName": name });
    }
    json!({
        "id": format!("evt_{}", session_id),
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": object }
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Completed Checkout
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn completed_checkout_provisions_user_album_and_reset_email() {
    let w = workflow();

    let result = w
        .handler
        .handle(signed_command(checkout_completed(
            "cs_1",
            "buyer@example.com",
            Some("Smith Wedding"),
        )))
        .await
        .unwrap();

    assert!(matches!(
        result,
        HandlePaymentWebhookResult::AccountProvisioned { .. }
    ));

    let users = w.identity.users.lock().unwrap().clone();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].1, "buyer@example.com");

    let albums = w.albums.albums.lock().unwrap().clone();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].name, "Smith Wedding");
    assert_eq!(albums[0].created_by.as_str(), users[0].0);

    let resets = w.identity.resets.lock().unwrap().clone();
    assert_eq!(resets, vec![("buyer@example.com".to_string(), RESET_URL.to_string())]);

    assert_eq!(
        w.ledger.sessions.lock().unwrap().clone(),
        vec!["cs_1".to_string()]
    );
}

#[tokio::test]
async fn missing_album_metadata_falls_back_to_default_name() {
    let w = workflow();

    w.handler
        .handle(signed_command(checkout_completed(
            "cs_2",
            "buyer@example.com",
            None,
        )))
        .await
        .unwrap();

    let albums = w.albums.albums.lock().unwrap().clone();
    assert_eq!(albums[0].name, DEFAULT_ALBUM_NAME);
}

// ════════════════════════════════════════════════════════════════════════════════
// Idempotent Redelivery
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn redelivered_notification_provisions_exactly_once() {
    let w = workflow();
    let payload = checkout_completed("cs_3", "buyer@example.com", Some("Reunion"));

    let first = w.handler.handle(signed_command(payload.clone())).await.unwrap();
    let second = w.handler.handle(signed_command(payload)).await.unwrap();

    assert!(matches!(
        first,
        HandlePaymentWebhookResult::AccountProvisioned { .. }
    ));
    assert!(matches!(
        second,
        HandlePaymentWebhookResult::AlreadyProcessed { .. }
    ));

    assert_eq!(w.identity.users.lock().unwrap().len(), 1);
    assert_eq!(w.albums.albums.lock().unwrap().len(), 1);
    assert_eq!(w.identity.resets.lock().unwrap().len(), 1);
}

// ════════════════════════════════════════════════════════════════════════════════
// Rejections
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn tampered_payload_is_rejected_with_no_side_effects() {
    let w = workflow();

    let mut cmd = signed_command(checkout_completed("cs_4", "buyer@example.com", None));
    cmd.payload = cmd
        .payload
        .iter()
        .map(|b| if *b == b'4' { b'5' } else { *b })
        .collect();

    let result = w.handler.handle(cmd).await;
    assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    assert!(w.identity.users.lock().unwrap().is_empty());
    assert!(w.ledger.sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stale_timestamp_is_rejected() {
    let w = workflow();

    let payload =
        serde_json::to_string(&checkout_completed("cs_5", "buyer@example.com", None)).unwrap();
    let stale = chrono::Utc::now().timestamp() - 3600;
    let cmd = HandlePaymentWebhookCommand {
        signature: sign(&payload, stale),
        payload: payload.into_bytes(),
    };

    let result = w.handler.handle(cmd).await;
    assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
}

#[tokio::test]
async fn completed_checkout_without_email_is_a_missing_field_error() {
    let w = workflow();

    let payload = json!({
        "id": "evt_no_email",
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": { "id": "cs_6" } }
    });

    let result = w.handler.handle(signed_command(payload)).await;
    match result {
        Err(err @ WebhookError::MissingField("customer_details.email")) => {
            assert!(!err.is_retryable());
        }
        other => panic!("expected missing-field error, got {:?}", other),
    }
    assert!(w.ledger.sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_email_for_a_new_session_fails_provisioning() {
    let w = workflow();

    w.handler
        .handle(signed_command(checkout_completed(
            "cs_7",
            "buyer@example.com",
            None,
        )))
        .await
        .unwrap();

    // Same purchaser pays again with a different session id
    let result = w
        .handler
        .handle(signed_command(checkout_completed(
            "cs_8",
            "buyer@example.com",
            None,
        )))
        .await;

    match result {
        Err(err @ WebhookError::Provisioning(_)) => assert!(err.is_retryable()),
        other => panic!("expected provisioning error, got {:?}", other),
    }
    // The failed session is not marked processed
    assert_eq!(
        w.ledger.sessions.lock().unwrap().clone(),
        vec!["cs_7".to_string()]
    );
}

#[tokio::test]
async fn unrelated_event_types_are_acknowledged_without_side_effects() {
    let w = workflow();

    let payload = json!({
        "id": "evt_other",
        "type": "payment_intent.succeeded",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": { "id": "pi_1" } }
    });

    let result = w.handler.handle(signed_command(payload)).await.unwrap();
    assert!(matches!(result, HandlePaymentWebhookResult::Acknowledged));
    assert!(w.identity.users.lock().unwrap().is_empty());
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Initiation
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn checkout_initiation_carries_album_name_through_metadata() {
    let gateway = Arc::new(RecordingGateway {
        requests: Mutex::new(Vec::new()),
    });
    let handler = CreateCheckoutSessionHandler::new(gateway.clone());

    let result = handler
        .handle(CreateCheckoutSessionCommand {
            album_name: Some("Graduation 2026".to_string()),
            origin: "https://snapalbum.example".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.session_id, "cs_live_777");

    let requests = gateway.requests.lock().unwrap();
    assert_eq!(requests[0].album_name.as_str(), "Graduation 2026");
    assert_eq!(
        requests[0].success_url,
        "https://snapalbum.example/payment/success?session_id={CHECKOUT_SESSION_ID}"
    );
    assert_eq!(requests[0].cancel_url, "https://snapalbum.example/");
}

#[tokio::test]
async fn checkout_initiation_leaves_blank_album_name_for_provisioning() {
    let gateway = Arc::new(RecordingGateway {
        requests: Mutex::new(Vec::new()),
    });
    let handler = CreateCheckoutSessionHandler::new(gateway.clone());

    handler
        .handle(CreateCheckoutSessionCommand {
            album_name: Some(String::new()),
            origin: "https://snapalbum.example".to_string(),
        })
        .await
        .unwrap();

    // The default album name only appears when the webhook provisions the
    // account; checkout metadata carries the purchaser's input untouched.
    let requests = gateway.requests.lock().unwrap();
    assert_eq!(requests[0].album_name, "");
}

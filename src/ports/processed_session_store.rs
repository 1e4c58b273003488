//! Processed-session ledger port.
//!
//! Webhook deliveries are at-least-once; the ledger records which checkout
//! sessions have already been provisioned so redeliveries become no-ops
//! instead of duplicate-account errors.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the ledger store.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Underlying storage failure.
    #[error("ledger storage error: {0}")]
    Storage(String),
}

/// Port for the processed checkout-session ledger.
///
/// # Contract
///
/// - `mark_processed` must be idempotent: marking an already-marked session
///   succeeds without error
/// - A session marked processed must be reported by `contains` on every
///   subsequent call
#[async_trait]
pub trait ProcessedSessionStore: Send + Sync {
    /// Has this checkout session already been provisioned?
    async fn contains(&self, session_id: &str) -> Result<bool, LedgerError>;

    /// Record that provisioning completed for this checkout session.
    async fn mark_processed(&self, session_id: &str) -> Result<(), LedgerError>;
}

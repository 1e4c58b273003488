//! Temporary password generation.
//!
//! A freshly provisioned account gets a random high-entropy password that is
//! never shown to anyone; the purchaser sets their own via the reset email.

use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};

/// Length of generated passwords (alphanumeric, ~190 bits of entropy).
const PASSWORD_LENGTH: usize = 32;

/// A generated temporary password.
///
/// Wraps `SecretString` so the value is redacted in `Debug` output and
/// cannot be serialized. The only way to read it is [`expose`], which the
/// identity adapter uses when submitting the account-creation request.
///
/// [`expose`]: TemporaryPassword::expose
#[derive(Clone)]
pub struct TemporaryPassword(SecretString);

impl TemporaryPassword {
    /// Generates a new random password from the OS entropy source.
    pub fn generate() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(PASSWORD_LENGTH)
            .map(char::from)
            .collect();
        Self(SecretString::new(value))
    }

    /// Exposes the password value for submission to the identity store.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for TemporaryPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TemporaryPassword([REDACTED])")
    }
}

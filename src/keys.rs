//! Signing key material.
//!
//! The embedded key pair is for local testing only. It was generated with:
//!
//! ```text
//! openssl genrsa -traditional -out keys/private.pem 2048
//! openssl rsa -in keys/private.pem -pubout -out keys/public.pem
//! ```

/// Key id placed in every token header. It only has to look like one of
/// Apple's.
pub const KEY_ID: &str = "86D88Kf";

/// PKCS#1 RSA private key used to sign tokens.
pub const PRIVATE_KEY_PEM: &str = include_str!("../keys/private.pem");

/// SubjectPublicKeyInfo public key that verifies tokens.
pub const PUBLIC_KEY_PEM: &str = include_str!("../keys/public.pem");

/// Supplies the key pair and key id a token is signed with.
pub trait KeyProvider {
    /// Value of the `kid` header.
    fn key_id(&self) -> &str;

    /// PEM encoded RSA private key.
    fn private_key_pem(&self) -> &[u8];

    /// PEM encoded RSA public key matching [`private_key_pem`][Self::private_key_pem].
    fn public_key_pem(&self) -> &[u8];
}

/// The compiled-in key pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedKey;

impl KeyProvider for EmbeddedKey {
    fn key_id(&self) -> &str {
        KEY_ID
    }

    fn private_key_pem(&self) -> &[u8] {
        PRIVATE_KEY_PEM.as_bytes()
    }

    fn public_key_pem(&self) -> &[u8] {
        PUBLIC_KEY_PEM.as_bytes()
    }
}

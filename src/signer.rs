//! RS256 signing of [`Claims`] into a compact token.

use std::{fmt, io::Write};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::debug;

use crate::{claims::Claims, error::SigningError, keys::KeyProvider};

/// A compact serialized token: `header.claims.signature`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three base64url segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signs claims with the key supplied by a [`KeyProvider`].
#[derive(Clone, Debug)]
pub struct TokenSigner<K> {
    keys: K,
}

impl<K: KeyProvider> TokenSigner<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    /// `{"alg":"RS256","kid":<key id>,"typ":"JWT"}`
    pub fn header(&self) -> Header {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.keys.key_id().to_string());
        header
    }

    /// Write the header and claims as JSON lines, one each.
    pub fn inspect<W: Write>(
        &self,
        claims: &Claims,
        pretty: bool,
        out: &mut W,
    ) -> Result<(), SigningError> {
        write_json(out, &self.header(), pretty)?;
        write_json(out, claims, pretty)?;
        Ok(())
    }

    pub fn sign(&self, claims: &Claims) -> Result<SignedToken, SigningError> {
        let key = EncodingKey::from_rsa_pem(self.keys.private_key_pem())
            .map_err(SigningError::InvalidKey)?;
        debug!(kid = self.keys.key_id(), "Loaded private key.");

        let token = encode(&self.header(), claims, &key).map_err(SigningError::Encode)?;
        debug!(len = token.len(), "Signed token.");

        Ok(SignedToken(token))
    }
}

/// Serialize `value` on its own line, four-space indented when `pretty`.
pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), SigningError> {
    if pretty {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
        value.serialize(&mut ser)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

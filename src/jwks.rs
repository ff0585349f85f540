//! JSON Web Key Set publication of the signing key, and a kid-indexed key
//! set that consumers can verify generated tokens with.

use std::collections::HashMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{
    jwk::{
        self, AlgorithmParameters, CommonParameters, KeyAlgorithm, PublicKeyUse,
        RSAKeyParameters, RSAKeyType,
    },
    DecodingKey,
};
use rsa::{pkcs8::DecodePublicKey, traits::PublicKeyParts, RsaPublicKey};
use tracing::debug;

use crate::{
    error::{JwkError, JwksError},
    keys::KeyProvider,
};

/// Describe the provider's public key as a single-entry JWK Set, the way an
/// identity provider publishes it at its `keys` endpoint.
pub fn key_set<K: KeyProvider>(keys: &K) -> Result<jwk::JwkSet, JwksError> {
    let pem = String::from_utf8_lossy(keys.public_key_pem());
    let public = RsaPublicKey::from_public_key_pem(&pem)?;

    let jwk = jwk::Jwk {
        common: CommonParameters {
            public_key_use: Some(PublicKeyUse::Signature),
            key_algorithm: Some(KeyAlgorithm::RS256),
            key_id: Some(keys.key_id().to_string()),
            ..Default::default()
        },
        algorithm: AlgorithmParameters::RSA(RSAKeyParameters {
            key_type: RSAKeyType::RSA,
            n: URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
        }),
    };
    debug!(kid = keys.key_id(), "Built JSON Web Key Set.");

    Ok(jwk::JwkSet { keys: vec![jwk] })
}

/// A container for a set of JWT decoding keys.
///
/// Any JWT whose header `kid` names a key in the set can be verified with
/// the matching [`DecodingKey`].
#[derive(Clone)]
pub struct Jwks {
    keys: HashMap<String, DecodingKey>,
}

impl Jwks {
    pub fn from_jwk_set(set: &jwk::JwkSet) -> Result<Self, JwksError> {
        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let kid = jwk.common.key_id.clone().ok_or(JwkError::MissingKeyId)?;
            let decoding_key =
                DecodingKey::from_jwk(jwk).map_err(|error| JwkError::DecodingError {
                    key_id: kid.clone(),
                    error,
                })?;
            keys.insert(kid, decoding_key);
        }

        Ok(Self { keys })
    }

    /// Key set for the provider's own public key.
    pub fn from_provider<K: KeyProvider>(keys: &K) -> Result<Self, JwksError> {
        Self::from_jwk_set(&key_set(keys)?)
    }

    pub fn get(&self, kid: &str) -> Option<&DecodingKey> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
    use serde_json::json;

    use super::*;
    use crate::{
        claims::{Claims, ClaimsBuilder},
        config::Config,
        keys::EmbeddedKey,
        signer::TokenSigner,
    };

    #[test]
    fn key_set_publishes_rs256_signing_key() {
        let set = key_set(&EmbeddedKey).unwrap();
        let value = serde_json::to_value(&set).unwrap();
        let key = &value["keys"][0];

        assert_eq!(value["keys"].as_array().unwrap().len(), 1);
        assert_eq!(key["kty"], json!("RSA"));
        assert_eq!(key["use"], json!("sig"));
        assert_eq!(key["alg"], json!("RS256"));
        assert_eq!(key["kid"], json!("86D88Kf"));
        assert_eq!(key["e"], json!("AQAB"));
        // 2048-bit modulus, unpadded base64url
        assert_eq!(key["n"].as_str().unwrap().len(), 342);
    }

    #[test]
    fn generated_token_verifies_through_key_set() {
        let claims = ClaimsBuilder::new(&Config::default()).build().unwrap();
        let token = TokenSigner::new(EmbeddedKey).sign(&claims).unwrap();

        let jwks = Jwks::from_provider(&EmbeddedKey).unwrap();
        assert_eq!(jwks.len(), 1);

        let header = decode_header(token.as_str()).unwrap();
        let key = jwks
            .get(header.kid.as_deref().unwrap())
            .expect("key should be found by kid");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["com.fake.fake.AppleSignIn"]);
        let data = decode::<Claims>(token.as_str(), key, &validation).unwrap();
        assert_eq!(data.claims, claims);
    }

    #[test]
    fn key_without_kid_is_rejected() {
        let set: jwk::JwkSet = serde_json::from_value(json!({
            "keys": [
                {
                    "kty": "RSA",
                    "use": "sig",
                    "alg": "RS256",
                    "n": "jb1Ps3fdt0oPYPbQlfZqKkCXrM1qJ5EkfBHSMrPXPzh9QLwa43WCLEdrTcf5vI8cNwbgSxDlCDS2BzHQC0hYPwFkJaD6y6NIIcwdSMcKlQPwk4-sqJbz55_gyUWjifcpXXKbXDdnd2QzSE2YipareOPJaBs3Ybuvf_EePnYoKEhXNeGm_T3546A56uOV2mNEe6e-RaIa76i8kcx_8JP3FjqxZSWRrmGYwZJhTGbeY5pfOS6v_EYpA4Up1kZANWReeC3mgh3O78f5nKEDxwPf99bIQ22fIC2779HbfzO-ybqR_EJ0zv8LlqfT7dMjZs25LH8Jw5wGWjP_9efP8emTOw",
                    "e": "AQAB"
                }
            ]
        }))
        .unwrap();

        let err = Jwks::from_jwk_set(&set).err().unwrap();
        assert!(matches!(err, JwksError::KeyError(JwkError::MissingKeyId)));
    }

    #[test]
    fn unparseable_public_key_is_reported() {
        struct NoPublicKey;

        impl KeyProvider for NoPublicKey {
            fn key_id(&self) -> &str {
                "none"
            }

            fn private_key_pem(&self) -> &[u8] {
                EmbeddedKey.private_key_pem()
            }

            fn public_key_pem(&self) -> &[u8] {
                b"-----BEGIN PUBLIC KEY-----\n-----END PUBLIC KEY-----\n"
            }
        }

        assert!(matches!(
            key_set(&NoPublicKey),
            Err(JwksError::PublicKey(_))
        ));
    }
}

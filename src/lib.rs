//! Generate signed, Sign in with Apple shaped identity tokens for local
//! testing of systems that consume them.
//!
//! ```no_run
//! use jwtgen::{ClaimsBuilder, Config, EmbeddedKey, TokenSigner};
//!
//! let config = Config::default();
//! let claims = ClaimsBuilder::new(&config).build()?;
//! let token = TokenSigner::new(EmbeddedKey).sign(&claims)?;
//! println!("{token}");
//! # Ok::<(), jwtgen::Error>(())
//! ```

use std::io::Write;

use tracing::debug;

pub mod claims;
pub mod config;
pub mod error;
pub mod jwks;
pub mod keys;
pub mod logging;
pub mod signer;

pub use claims::{Claims, ClaimsBuilder, ErrorCode, EXPIRATION_OFFSET_SECS};
pub use config::{Args, Config, Mode};
pub use error::{Error, JwkError, JwksError, SigningError, ValidationError};
pub use jwks::Jwks;
pub use keys::{EmbeddedKey, KeyProvider};
pub use signer::{SignedToken, TokenSigner};

/// Run one invocation, writing everything it produces to `out`.
///
/// Nothing is written when the claims fail validation.
pub fn run<K: KeyProvider, W: Write>(config: &Config, keys: K, out: &mut W) -> Result<(), Error> {
    match config.mode {
        Mode::Jwks => {
            let set = jwks::key_set(&keys)?;
            signer::write_json(out, &set, config.pretty)?;
        }
        Mode::Token => {
            let claims = ClaimsBuilder::new(config).build()?;
            let signer = TokenSigner::new(keys);
            if config.debug {
                signer.inspect(&claims, config.pretty, out)?;
            }

            let token = signer.sign(&claims)?;
            writeln!(out, "{token}").map_err(SigningError::from)?;
            debug!("Emitted token.");
        }
    }

    Ok(())
}

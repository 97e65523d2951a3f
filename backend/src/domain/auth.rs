//! Bearer credential issuance and resolution.
//!
//! Login issues an HS256 JWT whose sole claim is the user id; every
//! authenticated call resolves the bearer token back into that id. Tokens
//! carry no expiry — once issued, a credential stays valid indefinitely.
//! That is a deliberate reproduction of the source contract and a documented
//! weakness, not something to fix silently here.
//!
//! Resolution does not check whether the id still exists in the store; that
//! check belongs to the caller.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::user::UserId;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i64,
}

/// Issues and verifies bearer credentials with a shared symmetric secret.
#[derive(Clone)]
pub struct AccessTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokens {
    /// Build a token service around an HMAC secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The source contract issues tokens without an expiry claim.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a signed credential embedding the user id as its sole claim.
    pub fn issue(&self, user: UserId) -> Result<String, Error> {
        let claims = Claims { id: user.get() };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| Error::internal(format!("failed to sign credential: {err}")))
    }

    /// Verify a credential and extract the user id.
    ///
    /// Malformed, forged, and claim-less tokens all collapse into the same
    /// unauthorized error so the failure mode leaks nothing.
    pub fn resolve(&self, token: &str) -> Result<UserId, Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| UserId::new(data.claims.id))
            .map_err(|err| {
                tracing::debug!(error = %err, "bearer credential rejected");
                Error::unauthorized("invalid credentials")
            })
    }
}

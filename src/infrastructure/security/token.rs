// src/infrastructure/security/token.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, PublicKey,
    builder::{Algorithm, AuthorizerBuilder},
};

/// Verifies biscuit tokens sealed by the identity service's root key.
///
/// Issuance lives with the identity service; this side only holds the public
/// key and checks signatures, the token's own time caveats, and the claims.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    public: PublicKey,
}

impl BiscuitTokenManager {
    pub fn new(public_key_hex: &str) -> ApplicationResult<Self> {
        let public = PublicKey::from_bytes_hex(public_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { public })
    }
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // Tokens are minted elsewhere, so expiry is enforced here whether or
        // not the issuer sealed its own time check into the token.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .check("check if expires_at($exp), time($now), $now <= $exp")
            .and_then(|builder| builder.policy("allow if user($id, $name), role($role)"))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        parse_claims(facts)
    }
}

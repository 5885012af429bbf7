use crate::keys::StaticKeySource;
use crate::verifier::TokenVerifier;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) const ISSUER: &str = "https://coffee.test/";
pub(crate) const AUDIENCE: &str = "drinks";
pub(crate) const KID: &str = "test-key-1";

/// RSA key matching the public key published in `JWKS` under `KID`
pub(crate) const PRIVATE_KEY: &str = include_str!("../tests/fixtures/rsa_private.pem");
/// RSA key that is not part of any published key set
pub(crate) const ROGUE_PRIVATE_KEY: &str = include_str!("../tests/fixtures/rsa_rogue_private.pem");
pub(crate) const JWKS: &str = include_str!("../tests/fixtures/jwks.json");

pub(crate) fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before unix epoch")
        .as_secs()
}

/// Verifier trusting the fixture key set
pub(crate) fn static_verifier() -> TokenVerifier {
    let keys = StaticKeySource::from_json(JWKS).expect("Invalid fixture JWKS");
    TokenVerifier::new(Arc::new(keys), ISSUER, AUDIENCE)
}

/// Claims of a valid token for the test issuer and audience, expiring in an hour
pub(crate) fn claims_with(permissions: &[&str]) -> Value {
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": "auth0|barista",
        "iat": now(),
        "exp": now() + 3600,
        "permissions": permissions,
    })
}

/// Sign claims with the fixture key under `KID`
pub(crate) fn sign(claims: &Value) -> String {
    sign_with_key(claims, Some(KID), PRIVATE_KEY)
}

pub(crate) fn sign_with_key(claims: &Value, kid: Option<&str>, private_key_pem: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(String::from);

    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).expect("Invalid fixture key");
    encode(&header, claims, &key).expect("Failed to sign token")
}

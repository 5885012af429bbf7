//! Bearer token authorization for the coffee shop API.
//!
//! Tokens are JWTs issued by an external identity provider. A request passes
//! through four checks, each of which can reject it:
//!
//! 1. the `Authorization: Bearer <token>` header ([`bearer_token`])
//! 2. token structure, signing key, signature, expiry, issuer and audience
//!    ([`TokenVerifier`])
//! 3. presence of the `permissions` claim ([`extract_permissions`])
//! 4. membership of the required permission ([`Guard`])
//!
//! ```rust,ignore
//! let keys = RemoteKeySource::new(client, jwks_url, Duration::from_secs(600));
//! let verifier = TokenVerifier::new(Arc::new(keys), issuer, audience);
//!
//! let app = Router::new().route(
//!     "/drinks-detail",
//!     get(list_drink_details).route_layer(middleware::from_fn_with_state(
//!         Guard::new(verifier.clone(), "get:drinks-detail"),
//!         authorize,
//!     )),
//! );
//! ```

mod claims;
mod error;
mod guard;
mod header;
mod keys;
mod verifier;
#[cfg(test)]
mod test_utils;

pub use claims::{extract_permissions, Audience, ClaimSet};
pub use error::AuthError;
pub use guard::{authorize, Guard};
pub use header::bearer_token;
pub use jsonwebtoken::Algorithm;
pub use keys::{KeyDirectory, KeyFetchError, KeySource, RemoteKeySource, StaticKeySource};
pub use verifier::TokenVerifier;

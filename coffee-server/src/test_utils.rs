use crate::config::Settings;
use crate::create_app;
use crate::models::{Drink, Ingredient};
use crate::state::AppState;
use axum::body::Body;
use axum::Router;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use wiremock::matchers;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

const JWKS: &str = include_str!("../../coffee-auth/tests/fixtures/jwks.json");
const PRIVATE_KEY: &str = include_str!("../../coffee-auth/tests/fixtures/rsa_private.pem");
const KID: &str = "test-key-1";

/// Every permission the API knows about
pub const ALL_PERMISSIONS: &[&str] = &[
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

/// Test fixture for setting up a complete test environment.
///
/// The fixture serves the signing keys from a wiremock server, opens an
/// in-memory drink store and builds the full application router. Tokens minted
/// with [`TestFixture::token`] are accepted by the application.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///     let token = fixture.token(&["post:drinks"]);
///
///     let response = fixture
///         .post("/drinks", &json!({"title": "latte", "recipe": []}), Some(&token))
///         .await;
///
///     response.assert_ok();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Application state, for seeding and inspecting the store
    pub state: AppState,
    /// Configuration settings
    pub settings: Settings,
    /// Mock server publishing the signing keys
    pub jwks_mock: MockServer,
}

impl TestFixture {
    /// Creates a new test fixture with an empty store.
    pub async fn new() -> Self {
        // Initialize test logger
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let jwks_mock = MockServer::start().await;
        let jwks: Value = serde_json::from_str(JWKS).expect("Invalid fixture JWKS");
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks))
            .mount(&jwks_mock)
            .await;

        let settings = Settings::for_test_with_mocks(&jwks_mock);
        let state = AppState::new(&settings)
            .await
            .expect("Failed to initialize application state");
        let app = create_app(state.clone()).await;

        Self {
            app,
            state,
            settings,
            jwks_mock,
        }
    }

    /// Claims of a valid token for the test issuer and audience
    pub fn claims(&self, permissions: &[&str]) -> Value {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System time before unix epoch")
            .as_secs();

        json!({
            "iss": self.settings.auth.issuer,
            "aud": self.settings.auth.audience,
            "sub": "auth0|barista",
            "iat": now,
            "exp": now + 3600,
            "permissions": permissions,
        })
    }

    /// Sign arbitrary claims with the key published by the mock
    pub fn sign(&self, claims: &Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(KID.to_string());

        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).expect("Invalid fixture key");
        jsonwebtoken::encode(&header, claims, &key).expect("Failed to sign token")
    }

    /// Mint a valid token granting the given permissions
    pub fn token(&self, permissions: &[&str]) -> String {
        self.sign(&self.claims(permissions))
    }

    /// Mint a valid token granting every permission
    pub fn manager_token(&self) -> String {
        self.token(ALL_PERMISSIONS)
    }

    /// Insert a drink directly into the store
    pub async fn seed(&self, title: &str, recipe: &[Ingredient]) -> Drink {
        self.state
            .store
            .insert(title, recipe)
            .await
            .expect("Failed to seed drink")
    }

    /// Creates a request builder with a JSON content type and, when a token is
    /// given, a bearer authorization header.
    pub fn request_builder(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        token: Option<&str>,
    ) -> http::request::Builder {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri.as_ref())
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        builder
    }

    /// Sends a GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with a JSON body to the specified URI.
    pub async fn post<T: Serialize>(
        &self,
        uri: impl AsRef<str>,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        self.send_json(Method::POST, uri, body, token).await
    }

    /// Sends a PATCH request with a JSON body to the specified URI.
    pub async fn patch<T: Serialize>(
        &self,
        uri: impl AsRef<str>,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        self.send_json(Method::PATCH, uri, body, token).await
    }

    /// Sends a DELETE request to the specified URI.
    pub async fn delete(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::DELETE, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    async fn send_json<T: Serialize>(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(method, uri, token)
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    ///
    /// Use this method when you need more control over the request details,
    /// e.g. a raw authorization header or a body that is not valid JSON.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to empty object if parsing fails or empty body
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| json!({}))
        } else {
            json!({})
        };

        TestResponse {
            status,
            headers,
            json,
        }
    }
}

/// Response from a test request that provides convenient access to status and JSON body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status, expected,
            "Expected status code {}, got {}. Response body: {}",
            expected, self.status, self.json
        );
    }

    /// Asserts that the response is 200 OK with `success: true`.
    pub fn assert_ok(&self) {
        self.assert_status(StatusCode::OK);
        assert_eq!(self.json["success"], true, "Response body: {}", self.json);
    }

    /// Asserts the error envelope for the given status and message.
    pub fn assert_error(&self, expected: StatusCode, message: &str) {
        self.assert_status(expected);
        assert_eq!(
            self.json,
            json!({
                "success": false,
                "error": expected.as_u16(),
                "message": message,
            })
        );
    }

    /// Deserializes the JSON body into the specified type.
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).unwrap_or_else(|e| {
            panic!(
                "Failed to deserialize response: {}. Response body: {}",
                e, self.json
            )
        })
    }
}

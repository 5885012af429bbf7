use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use http::{Method, StatusCode};

/// Helper struct for setting cross-origin headers
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
    allow_methods: HeaderValue,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_headers: HeaderValue::from_static("Content-Type,Authorization,true"),
            allow_methods: HeaderValue::from_static("GET,POST,PATCH,DELETE,OPTIONS"),
        }
    }
}

impl CorsHeaders {
    /// Apply headers to a response, replacing any set by the handler
    pub fn apply<B>(&self, response: &mut axum::response::Response<B>) {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
    }
}

/// Middleware adding CORS headers to every response.
///
/// Preflight requests are answered here and never reach the router.
pub async fn cors(request: Request, next: Next) -> Response {
    let headers = CorsHeaders::default();

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    headers.apply(&mut response);
    response
}

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use lcms_api::{
    config::{ApiConfig, Environment},
    state::ApiState,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_ADMIN_PASSWORD: &str = "test_admin_password";
pub const TEST_JWT_SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

/// A router wired to an isolated temporary data directory.
///
/// The directory is removed when the harness is dropped, so every test
/// starts from empty collections.
pub struct TestApp {
    pub client: TestClient,
    _data_dir: TempDir,
}

pub fn test_app() -> TestApp {
    let data_dir = TempDir::new().expect("Failed to create temp data dir");
    let config = ApiConfig {
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        data_dir: data_dir.path().to_string_lossy().into_owned(),
        port: 0,
        env: Environment::Development,
    };
    let state = ApiState::new(config);
    let client = TestClient::new(lcms_api::router::router().with_state(state));

    TestApp {
        client,
        _data_dir: data_dir,
    }
}

/// A valid admin token for the test JWT secret.
pub fn admin_token() -> String {
    lcms_api::auth::jwt::generate_admin_token(TEST_JWT_SECRET, 7)
        .expect("Failed to generate admin token")
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body and no credential
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body and the admin cookie
    pub async fn post_json_with_auth<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        token: &str,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("cookie", format!("admin_token={token}"))
            .body(Body::from(json_body))
            .expect("Failed to build authenticated request");

        self.request(request).await
    }

    /// Send a POST request with JSON body and a bearer credential
    pub async fn post_json_with_bearer<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        token: &str,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(json_body))
            .expect("Failed to build authenticated request");

        self.request(request).await
    }

    /// Send a PUT request with JSON body and the admin cookie
    pub async fn put_json_with_auth<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        token: &str,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("cookie", format!("admin_token={token}"))
            .body(Body::from(json_body))
            .expect("Failed to build authenticated request");

        self.request(request).await
    }

    /// Send a DELETE request with the admin cookie
    pub async fn delete_with_auth(&self, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("cookie", format!("admin_token={token}"))
            .body(Body::empty())
            .expect("Failed to build authenticated request");

        self.request(request).await
    }
}

/// A buffered response with assertion helpers
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse response body as JSON")
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
    }
}

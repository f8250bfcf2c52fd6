//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    CredentialsStatus, DecryptRequest, DecryptResponse, ErrorResponse, HealthResponse,
    SaveCredentialsRequest,
};
use common::ServiceError;

use super::state::AppState;
use crate::credentials::Credentials;

/// Render a [`ServiceError`] as its status code and JSON body.
fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}

/// `PUT /credentials` — replace the stored key and vector.
///
/// Always succeeds with `204 No Content`; the values are validated only when
/// a decrypt uses them.
pub async fn save_credentials(
    State(state): State<AppState>,
    Json(req): Json<SaveCredentialsRequest>,
) -> StatusCode {
    state.credentials.save(req.key, req.vector);
    StatusCode::NO_CONTENT
}

/// `GET /credentials` — report whether credentials are held, without
/// revealing them.
pub async fn credentials_status(State(state): State<AppState>) -> Json<CredentialsStatus> {
    let snapshot = state.credentials.snapshot();
    let (key_len, vector_len) = snapshot
        .as_ref()
        .map_or((0, 0), |c| (c.key().len(), c.vector().len()));
    Json(CredentialsStatus {
        key_set: snapshot.is_some(),
        key_len,
        vector_len,
    })
}

/// `POST /decrypt` — decrypt a hex ciphertext.
///
/// Uses the `key`/`vector` from the body when both are given, otherwise the
/// stored pair. Any decryption failure becomes `422` with the generic
/// "Failed to decrypt data" message; the cause is only logged.
pub async fn decrypt(State(state): State<AppState>, Json(req): Json<DecryptRequest>) -> Response {
    let credentials = match (req.key, req.vector) {
        (Some(key), Some(vector)) => Credentials::new(key, vector),
        (None, None) => state.credentials.read(),
        _ => {
            return error_response(&ServiceError::BadRequest(
                "key and vector must be supplied together".into(),
            ))
        }
    };

    match state
        .decryptor
        .decrypt_with(&req.ciphertext, credentials)
        .await
    {
        Ok(plaintext) => (StatusCode::OK, Json(DecryptResponse { plaintext })).into_response(),
        Err(e) => error_response(&ServiceError::from(e)),
    }
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` once credentials have been saved, `503 Service
/// Unavailable` before that.
pub async fn health(State(state): State<AppState>) -> Response {
    let credentials_set = state.credentials.is_set();

    let (status_code, status_str) = if credentials_set {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        credentials_set,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher::tests::{encrypt_hex, KEY_32, VECTOR_8};
    use crate::crypto::{Decryptor, HexMode};
    use axum::routing::{get, post, put};
    use axum::{body::Body, http::Request, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router(state: AppState) -> Router {
        Router::new()
            .route("/credentials", put(save_credentials).get(credentials_status))
            .route("/decrypt", post(decrypt))
            .route("/health", get(health))
            .with_state(state)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_503_when_not_ready() {
        let app = test_router(AppState::default());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(resp).await["status"], "degraded");
    }

    #[tokio::test]
    async fn save_credentials_then_decrypt_with_stored_pair() {
        let state = AppState::default();

        let resp = test_router(state.clone())
            .oneshot(json_request(
                "PUT",
                "/credentials",
                json!({"key": KEY_32, "vector": VECTOR_8}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.credentials.read().key(), KEY_32);

        let ciphertext = encrypt_hex("hello world", KEY_32, VECTOR_8);
        let resp = test_router(state)
            .oneshot(json_request(
                "POST",
                "/decrypt",
                json!({"ciphertext": ciphertext}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["plaintext"], "hello world");
    }

    #[tokio::test]
    async fn explicit_credentials_override_stored_pair() {
        let state = AppState::default();
        state.credentials.save("wrong-key-wrong-key-wrong-key-ab", VECTOR_8);

        let ciphertext = encrypt_hex("override", KEY_32, VECTOR_8);
        let resp = test_router(state)
            .oneshot(json_request(
                "POST",
                "/decrypt",
                json!({"ciphertext": ciphertext, "key": KEY_32, "vector": VECTOR_8}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["plaintext"], "override");
    }

    #[tokio::test]
    async fn key_without_vector_is_bad_request() {
        let resp = test_router(AppState::default())
            .oneshot(json_request(
                "POST",
                "/decrypt",
                json!({"ciphertext": "00", "key": KEY_32}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], "bad_request");
    }

    #[tokio::test]
    async fn decrypt_without_credentials_fails_generically() {
        let resp = test_router(AppState::default())
            .oneshot(json_request("POST", "/decrypt", json!({"ciphertext": "00"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "decryption_failed");
        assert_eq!(body["message"], "Failed to decrypt data");
    }

    #[tokio::test]
    async fn malformed_hex_fails_generically_in_strict_mode() {
        let state = AppState::default();
        state.credentials.save(KEY_32, VECTOR_8);
        let resp = test_router(state)
            .oneshot(json_request("POST", "/decrypt", json!({"ciphertext": "xyz"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(resp).await["message"], "Failed to decrypt data");
    }

    #[tokio::test]
    async fn empty_ciphertext_returns_empty_plaintext() {
        let state = AppState::new(Default::default(), Decryptor::new(HexMode::Lenient));
        state.credentials.save(KEY_32, VECTOR_8);
        let resp = test_router(state)
            .oneshot(json_request("POST", "/decrypt", json!({"ciphertext": ""})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["plaintext"], "");
    }

    #[tokio::test]
    async fn credentials_status_before_save() {
        let resp = test_router(AppState::default())
            .oneshot(
                Request::builder()
                    .uri("/credentials")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["key_set"], false);
        assert_eq!(body["key_len"], 0);
        assert_eq!(body["vector_len"], 0);
    }

    #[tokio::test]
    async fn credentials_status_never_echoes_secrets() {
        let state = AppState::default();
        state.credentials.save(KEY_32, VECTOR_8);
        let resp = test_router(state)
            .oneshot(
                Request::builder()
                    .uri("/credentials")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["key_set"], true);
        assert_eq!(body["key_len"], 32);
        assert_eq!(body["vector_len"], 8);
        assert!(!body.to_string().contains(KEY_32));
    }
}

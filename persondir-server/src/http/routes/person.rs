//! Person endpoints
//!
//! - `GET /person/{person_id}/info` - flattened profile
//! - `POST /person/create` - atomic person + phone + address creation
//!
//! The create response carries `person_id` next to the confirmation
//! message. The id goes beyond the `{"message": ...}` body the API
//! promises; clients that only read `message` are unaffected.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{PersonIdPath, ValidJson};
use crate::http::server::AppState;
use crate::models::{PersonId, PersonProfile};

/// Create person response
#[derive(Debug, Serialize)]
pub struct CreatePersonResponse {
    pub message: &'static str,
    pub person_id: PersonId,
}

/// GET /person/{person_id}/info
async fn get_person_info(
    State(state): State<Arc<AppState>>,
    PersonIdPath(id): PersonIdPath,
) -> Result<Json<PersonProfile>, ApiError> {
    let profile = state.store.get_person_info(id).await?;
    Ok(Json(profile))
}

/// POST /person/create
async fn create_person(
    State(state): State<Arc<AppState>>,
    ValidJson(profile): ValidJson<PersonProfile>,
) -> Result<Json<CreatePersonResponse>, ApiError> {
    let created = state.store.create_person(&profile).await?;
    tracing::info!(person_id = %created.person_id, "Person created");

    Ok(Json(CreatePersonResponse {
        message: "Person created successfully",
        person_id: created.person_id,
    }))
}

/// Person routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/person/{person_id}/info", get(get_person_info))
        .route("/person/create", post(create_person))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::{CreateStep, MemoryPersonStore, RowCounts};
    use crate::http::server::{build_router, ServerConfig};

    const ADA: &str = r#"{"name":"Ada","phone_number":"555-1111","city":"Springfield","state":"IL","street1":"1 Main St","street2":"","zip_code":"62701"}"#;

    fn app(store: Arc<MemoryPersonStore>) -> Router {
        build_router(AppState::new(store), &ServerConfig::default())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/person/create")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get_info(id: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/person/{}/info", id))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_read_echoes_payload() {
        let store = Arc::new(MemoryPersonStore::new());
        let app = app(store.clone());

        let response = app.clone().oneshot(post_json(ADA)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Person created successfully");
        let id = body["person_id"].as_i64().unwrap();

        let response = app.oneshot(get_info(&id.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let expected: Value = serde_json::from_str(ADA).unwrap();
        assert_eq!(body_json(response).await, expected);
    }

    #[tokio::test]
    async fn null_street2_is_accepted_and_read_back_empty() {
        let store = Arc::new(MemoryPersonStore::new());
        let app = app(store.clone());

        let payload = r#"{"name":"Ada","phone_number":"555-1111","city":"Springfield","state":"IL","street1":"1 Main St","street2":null,"zip_code":"62701"}"#;
        let response = app.clone().oneshot(post_json(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let id = body_json(response).await["person_id"].as_i64().unwrap();

        let response = app.oneshot(get_info(&id.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["street2"], "");
    }

    #[tokio::test]
    async fn unknown_person_is_404() {
        let app = app(Arc::new(MemoryPersonStore::new()));

        let response = app.oneshot(get_info("404")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Person not found" })
        );
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() {
        let app = app(Arc::new(MemoryPersonStore::new()));

        let response = app.oneshot(get_info("not-a-number")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_field_is_400_and_writes_nothing() {
        let store = Arc::new(MemoryPersonStore::new());
        let app = app(store.clone());

        let response = app
            .oneshot(post_json(r#"{"name":"Ada","city":"Springfield"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid input" }));
        assert_eq!(store.row_counts(), RowCounts::default());
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let app = app(Arc::new(MemoryPersonStore::new()));

        let response = app.oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_400() {
        let app = app(Arc::new(MemoryPersonStore::new()));

        let request = Request::builder()
            .method("POST")
            .uri("/person/create")
            .body(Body::from(ADA))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_step_is_500_and_rolled_back() {
        for step in CreateStep::ALL {
            let store = Arc::new(MemoryPersonStore::new());
            store.fail_at(step);
            let app = app(store.clone());

            let response = app.oneshot(post_json(ADA)).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await,
                json!({ "error": step.failure_message() })
            );
            assert_eq!(store.row_counts(), RowCounts::default(), "step {step}");
        }
    }

    #[tokio::test]
    async fn identical_payloads_get_distinct_ids() {
        let store = Arc::new(MemoryPersonStore::new());
        let app = app(store.clone());

        let (first, second) = tokio::join!(
            app.clone().oneshot(post_json(ADA)),
            app.clone().oneshot(post_json(ADA)),
        );
        let first = body_json(first.unwrap()).await["person_id"].as_i64().unwrap();
        let second = body_json(second.unwrap()).await["person_id"].as_i64().unwrap();

        assert_ne!(first, second);
        assert_eq!(store.row_counts().address_joins, 2);
    }
}

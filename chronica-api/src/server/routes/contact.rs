use crate::server::{Result, ServerError, ServerRouter, json::Json};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use chronica_common::model::contact::{Contact, ContactMessage};
use chronica_db::client::BlogStore;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_post(create_contact)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/contact", rejection(ServerError))]
struct ContactPath();

async fn create_contact(
    ContactPath(): ContactPath,
    State(store): State<Arc<dyn BlogStore>>,
    Json(message): Json<ContactMessage>,
) -> Result<(StatusCode, Json<Contact>)> {
    let contact = store
        .create_contact(&message)
        .await
        .map_err(ServerError::CreateContact)?;

    Ok((StatusCode::CREATED, Json(contact)))
}

#[cfg(test)]
mod tests {
    use crate::server::{ServerState, app};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chronica_db::memory::MemoryStore;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::{path::Path, sync::Arc};
    use tower::ServiceExt;

    fn test_app(store: Arc<MemoryStore>) -> axum::Router {
        let state = ServerState { store };
        app(
            state,
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("public"),
        )
    }

    fn contact_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn any_subset_of_fields_is_accepted() {
        let store = Arc::new(MemoryStore::new());

        for body in [
            json!({}),
            json!({"firstName": "Ada"}),
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100",
                "subject": "Hello",
                "message": "A note"
            }),
        ] {
            let response = test_app(Arc::clone(&store))
                .oneshot(contact_request(body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);

            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let created: Value = serde_json::from_slice(&bytes).unwrap();
            assert!(created["id"].as_str().is_some());
        }

        assert_eq!(store.contact_count().await, 3);
    }

    #[tokio::test]
    async fn unreachable_store_is_a_server_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_unreachable(true);

        let response = test_app(store)
            .oneshot(contact_request(json!({"subject": "s"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn rejected_write_is_a_client_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_reject_writes(true);

        let response = test_app(store)
            .oneshot(contact_request(json!({"subject": "s"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

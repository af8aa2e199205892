use crate::server::{Result, ServerError, ServerRouter, json::Json};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use chronica_common::model::post::{CreatePost, Post};
use chronica_db::client::BlogStore;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_blogs)
        .typed_post(create_blog)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/blogs", rejection(ServerError))]
struct BlogsPath();

async fn list_blogs(
    BlogsPath(): BlogsPath,
    State(store): State<Arc<dyn BlogStore>>,
) -> Result<Json<Vec<Post>>> {
    let posts = store.list_posts().await.map_err(ServerError::ListBlogs)?;

    Ok(Json(posts))
}

async fn create_blog(
    BlogsPath(): BlogsPath,
    State(store): State<Arc<dyn BlogStore>>,
    Json(post): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>)> {
    let created = store
        .create_post(&post)
        .await
        .map_err(ServerError::CreateBlog)?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    use crate::server::{ServerState, app};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chronica_common::model::post::PLACEHOLDER_IMAGE_URL;
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

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/blogs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_applies_defaults_and_list_is_newest_first() {
        let store = Arc::new(MemoryStore::new());

        for (title, date) in [
            ("middle", "2024-02-01T00:00:00Z"),
            ("newest", "2024-03-01T00:00:00Z"),
            ("oldest", "2024-01-01T00:00:00Z"),
        ] {
            let response = test_app(Arc::clone(&store))
                .oneshot(post_request(
                    json!({"title": title, "content": "c", "date": date}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);

            let created = body_json(response).await;
            assert_eq!(created["imageUrl"], PLACEHOLDER_IMAGE_URL);
            assert!(created["id"].as_str().is_some());
        }

        let response = test_app(store)
            .oneshot(
                Request::builder()
                    .uri("/api/blogs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listed = body_json(response).await;
        let titles: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|post| post["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn supplied_fields_are_preserved_verbatim() {
        let store = Arc::new(MemoryStore::new());

        let response = test_app(Arc::clone(&store))
            .oneshot(post_request(json!({
                "title": "Fall of Rome",
                "content": "It fell.",
                "imageUrl": "https://example.com/rome.jpg",
                "date": "2023-06-15T08:30:00Z"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert_eq!(created["imageUrl"], "https://example.com/rome.jpg");
        assert!(
            created["date"]
                .as_str()
                .unwrap()
                .starts_with("2023-06-15T08:30:00")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request_with_message() {
        let response = test_app(Arc::new(MemoryStore::new()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/blogs")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"title\": 12}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn unreachable_store_is_a_server_error_on_list() {
        let store = Arc::new(MemoryStore::new());
        store.set_unreachable(true);

        let response = test_app(Arc::clone(&store))
            .oneshot(
                Request::builder()
                    .uri("/api/blogs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("Database connection not available")
        );
    }

    #[tokio::test]
    async fn unreachable_store_is_a_server_error_on_create() {
        let store = Arc::new(MemoryStore::new());
        store.set_unreachable(true);

        let response = test_app(store)
            .oneshot(post_request(json!({"title": "t", "content": "c"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn rejected_write_is_a_client_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_reject_writes(true);

        let response = test_app(store)
            .oneshot(post_request(json!({"title": "t", "content": "c"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

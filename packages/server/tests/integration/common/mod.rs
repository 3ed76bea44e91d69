use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use ::common::config::{StorageBackend, StorageConfig};
use ::common::storage::ObjectKey;
use ::common::storage::memory::MemoryObjectStore;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use shelf_server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
use shelf_server::state::AppState;

/// Public URL prefix of the test storage domain.
pub const STORAGE_BASE: &str = "https://demo.supabase.co/storage/v1/object/public/shelf-images";

pub mod routes {
    pub const LOGIN: &str = "/api/login";
    pub const USERS: &str = "/api/users";
    pub const SHELF: &str = "/api/shelf";

    pub fn shelf(id: i64) -> String {
        format!("/api/shelf/{id}")
    }
}

/// A running test server backed by in-memory SQLite and an in-memory object store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub store: Arc<MemoryObjectStore>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

/// Multipart fields for `POST /api/shelf`.
#[derive(Default, Clone)]
pub struct ShelfUpload<'a> {
    pub id: Option<&'a str>,
    pub floor: &'a str,
    pub location: &'a str,
    pub side: &'a str,
    pub item_list: &'a str,
    pub branch_name: &'a str,
    pub image_deleted: bool,
    pub image: Option<(&'a str, Vec<u8>)>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
                serve_images_at: None,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                // Every pooled connection to `sqlite::memory:` is its own database.
                max_connections: 1,
                min_connections: 1,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                public_base_url: STORAGE_BASE.to_string(),
                max_upload_size: 1024 * 1024,
                ..Default::default()
            },
            branches: HashMap::new(),
            bootstrap_admin: None,
        };

        let db = shelf_server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");
        shelf_server::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");

        let store = Arc::new(MemoryObjectStore::new());
        let state = AppState::new(db.clone(), app_config, store.clone());
        let app = shelf_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn save_shelf(&self, upload: ShelfUpload<'_>) -> TestResponse {
        let mut form = Form::new()
            .text("floor", upload.floor.to_string())
            .text("location", upload.location.to_string())
            .text("side", upload.side.to_string())
            .text("item_list", upload.item_list.to_string())
            .text("branch_name", upload.branch_name.to_string());
        if let Some(id) = upload.id {
            form = form.text("id", id.to_string());
        }
        if upload.image_deleted {
            form = form.text("imageDeleted", "true");
        }
        if let Some((name, bytes)) = upload.image {
            let part = Part::bytes(bytes)
                .file_name(name.to_string())
                .mime_str("image/jpeg")
                .expect("Failed to set MIME type");
            form = form.part("image", part);
        }

        let res = self
            .client
            .post(self.url(routes::SHELF))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Create a user through the API.
    pub async fn create_user(&self, username: &str, password: &str, role: &str, branch: &str) {
        let res = self
            .post_json(
                routes::USERS,
                &serde_json::json!({
                    "username": username,
                    "password": password,
                    "role": role,
                    "branch_name": branch,
                    "full_name": format!("{username} full name"),
                }),
            )
            .await;
        assert_eq!(res.status, 200, "create_user failed: {}", res.text);
    }

    pub async fn list_shelves(&self, branch: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(routes::SHELF))
            .query(&[("branch", branch)])
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// List a branch's shelves and return the one with `id`.
    pub async fn shelf_in_branch(&self, branch: &str, id: i64) -> Option<Value> {
        let res = self.list_shelves(branch).await;
        assert_eq!(res.status, 200, "list shelves failed: {}", res.text);
        res.body
            .as_array()
            .expect("shelf list should be an array")
            .iter()
            .find(|s| s["id"].as_i64() == Some(id))
            .cloned()
    }

    /// Key of a stored object, recovered from its public URL.
    pub fn key_of(&self, url: &str) -> ObjectKey {
        let rest = url
            .strip_prefix(&format!("{STORAGE_BASE}/"))
            .expect("URL should be in the storage domain");
        ObjectKey::new(rest).expect("URL should map to a valid key")
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

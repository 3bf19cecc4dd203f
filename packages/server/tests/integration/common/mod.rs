use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use ::common::storage::filesystem::FilesystemImageStore;
use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tempfile::TempDir;

use catalog::config::{
    AppConfig, CorsConfig, DatabaseConfig, LabelConfig, ServerConfig, StorageConfig,
};
use catalog::label::LabelEncoder;
use catalog::state::AppState;

pub mod routes {
    pub const CHEMICALS: &str = "/api/chemicals";
    pub const CHEMICAL: &str = "/api/chemical";

    pub fn chemical(id: i64) -> String {
        format!("/api/chemical/{id}")
    }

    pub fn chemical_label(id: i64) -> String {
        format!("/api/chemical/qr/{id}")
    }

    pub fn chemical_page(page: u64, size: u64) -> String {
        format!("/api/chemicals?page={page}&size={size}")
    }

    pub fn lookup(identifier: &str) -> String {
        format!("/api/chemical?identifier={}", urlencode(identifier))
    }

    fn urlencode(s: &str) -> String {
        s.bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    (b as char).to_string()
                }
                _ => format!("%{b:02X}"),
            })
            .collect()
    }
}

/// A running test server backed by its own SQLite file and image directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub image_dir: PathBuf,
    _scratch: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let scratch = tempfile::tempdir().expect("Failed to create scratch directory");
        let image_dir = scratch.path().join("img");

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            scratch.path().join("catalog.db").display()
        );
        let mut opts = ConnectOptions::new(&db_url);
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to connect to test database");
        catalog::database::sync_schema(&db)
            .await
            .expect("Failed to sync schema");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec!["*".to_string()],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 1,
            },
            storage: StorageConfig {
                image_dir: image_dir.clone(),
                ..Default::default()
            },
            label: LabelConfig::default(),
        };

        let state = AppState {
            db: db.clone(),
            images: Arc::new(FilesystemImageStore::new(
                image_dir.clone(),
                app_config.storage.max_image_size as u64,
            )),
            labels: LabelEncoder::new(app_config.label.size),
            config: app_config,
        };

        let app = catalog::build_router(state);

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
            image_dir,
            _scratch: scratch,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
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

    /// POST a chemical as multipart, optionally with an image part.
    pub async fn post_chemical(&self, data: &Value, image: Option<Vec<u8>>) -> TestResponse {
        let data_part = reqwest::multipart::Part::text(data.to_string())
            .mime_str("application/json")
            .expect("Failed to set MIME type");
        let mut form = reqwest::multipart::Form::new().part("chemicalData", data_part);

        if let Some(bytes) = image {
            let image_part = reqwest::multipart::Part::bytes(bytes)
                .file_name("structure.png")
                .mime_str("image/png")
                .expect("Failed to set MIME type");
            form = form.part("imageFile", image_part);
        }

        let res = self
            .client
            .post(self.url(routes::CHEMICAL))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Create a chemical via the API and return its numeric `id`.
    pub async fn create_chemical(&self, cas_number: &str, name: &str) -> i64 {
        let res = self
            .post_chemical(
                &serde_json::json!({
                    "casNumber": cas_number,
                    "name": name,
                }),
                None,
            )
            .await;
        assert_eq!(res.status, 201, "create_chemical failed: {}", res.text);
        res.id()
    }

    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.image_dir.join(file_name)
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i64 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain numeric 'id'")
    }
}

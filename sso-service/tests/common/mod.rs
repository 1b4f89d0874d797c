#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::HashingParams;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenTtl;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::SqliteStorage;
use sso_service::proto::auth_client::AuthClient;
use sso_service::proto::auth_server::AuthServer;
use tempfile::TempDir;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

/// Application provisioned in every test database
pub const APP_ID: i32 = 1;
pub const APP_SECRET: &str = "test-secret";

/// Second application, for isolation checks
pub const OTHER_APP_ID: i32 = 2;
pub const OTHER_APP_SECRET: &str = "other-secret";

pub type TestAuthService = AuthService<SqliteStorage, SqliteStorage, SqliteStorage>;

/// Test database helper backed by a throw-away SQLite file
pub struct TestDb {
    pub storage: Arc<SqliteStorage>,
    _dir: TempDir,
}

impl TestDb {
    /// Create a migrated database with the two test applications
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let storage = SqliteStorage::connect(&dir.path().join("sso.db"))
            .await
            .expect("Failed to open test database");

        storage.migrate().await.expect("Failed to run migrations");

        let db = Self {
            storage: Arc::new(storage),
            _dir: dir,
        };

        db.insert_app(APP_ID, "test", APP_SECRET).await;
        db.insert_app(OTHER_APP_ID, "other", OTHER_APP_SECRET).await;

        db
    }

    pub async fn insert_app(&self, id: i32, name: &str, secret: &str) {
        sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(secret)
            .execute(self.storage.pool())
            .await
            .expect("Failed to insert app");
    }

    pub async fn count_users(&self, email: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.storage.pool())
            .await
            .expect("Failed to count users")
    }
}

/// Argon2 with minimal cost so tests stay fast
pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_params(HashingParams {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build password hasher")
}

pub fn auth_service(db: &TestDb, ttl: TokenTtl) -> TestAuthService {
    AuthService::new(
        Arc::clone(&db.storage),
        Arc::clone(&db.storage),
        Arc::clone(&db.storage),
        cheap_hasher(),
        TokenIssuer::new(ttl),
    )
}

/// Service with production hashing cost, slow enough to cancel mid-flight
pub fn full_cost_service(db: &TestDb) -> TestAuthService {
    AuthService::new(
        Arc::clone(&db.storage),
        Arc::clone(&db.storage),
        Arc::clone(&db.storage),
        PasswordHasher::new(),
        TokenIssuer::new(TokenTtl::default()),
    )
}

/// Test application that spawns a real gRPC server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub client: AuthClient<Channel>,
    pub token_ttl: TokenTtl,
}

impl TestApp {
    /// Spawn the gRPC server in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;
        let service = auth_service(&db, TokenTtl::default());

        Self::serve(db, service, None).await
    }

    /// Spawn a server that enforces a per-request timeout. Uses the
    /// production hashing cost so requests outlast short timeouts.
    pub async fn spawn_with_timeout(timeout: Duration) -> Self {
        let db = TestDb::new().await;
        let service = full_cost_service(&db);

        Self::serve(db, service, Some(timeout)).await
    }

    async fn serve(db: TestDb, service: TestAuthService, timeout: Option<Duration>) -> Self {
        let token_ttl = TokenTtl::default();
        let service = Arc::new(service);

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let mut builder = Server::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        tokio::spawn(async move {
            builder
                .add_service(AuthServer::new(AuthGrpcService::new(service)))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        let client = AuthClient::connect(address.clone())
            .await
            .expect("Failed to connect to gRPC server");

        Self {
            address,
            db,
            client,
            token_ttl,
        }
    }
}

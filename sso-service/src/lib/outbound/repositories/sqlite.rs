use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::AppSecret;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

const MAX_CONNECTIONS: u32 = 5;

/// SQLite credential store.
///
/// One instance implements all three storage capabilities. Every operation
/// is a single statement, so a failed or cancelled call leaves no partial row.
pub struct SqliteStorage {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
}

#[derive(FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl SqliteStorage {
    /// Open the database at `path`, creating the file and its parent
    /// directory if missing.
    ///
    /// # Errors
    /// * `Database` - Directory creation or connection failed
    pub async fn connect(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            max_connections = MAX_CONNECTIONS,
            "SQLite connection pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))
    }
}

#[async_trait]
impl UserSaver for SqliteStorage {
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?, ?)
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_bytes())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserExists(email.to_string());
                }
            }
            StorageError::Database(e.to_string())
        })?;

        Ok(UserId(result.last_insert_rowid()))
    }
}

#[async_trait]
impl UserProvider for SqliteStorage {
    async fn user(&self, email: &EmailAddress) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        let row = row.ok_or_else(|| StorageError::UserNotFound(email.to_string()))?;

        let password_hash = String::from_utf8(row.pass_hash).map_err(|_| {
            StorageError::Database(format!("Password hash for user {} is not UTF-8", row.id))
        })?;

        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email),
            password_hash: PasswordHash::new(password_hash),
        })
    }
}

#[async_trait]
impl AppProvider for SqliteStorage {
    async fn app(&self, app_id: AppId) -> Result<App, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        let row = row.ok_or(StorageError::AppNotFound(app_id))?;

        let id = i32::try_from(row.id)
            .map_err(|_| StorageError::Database(format!("App id {} out of range", row.id)))?;

        Ok(App {
            id: AppId(id),
            name: row.name,
            secret: AppSecret::new(row.secret),
        })
    }
}

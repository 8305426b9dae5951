use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::user::{Role, User, UserRow};

/// A directory entry ready for persistence: the password is already hashed.
#[derive(Debug, Clone)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

/// Persistence for directory entries. Each method is a single-document
/// operation; concurrent writers to the same entry are last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All entries in insertion order.
    async fn list(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, user: UserInsert) -> Result<User>;
    /// Returns `None` when no entry has `id`.
    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>>;
    /// Returns `false` when no entry has `id`.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const USER_COLUMNS: &str = "id, name, email, role, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>> {
        let query = format!("SELECT {} FROM users ORDER BY seq ASC", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: UserInsert) -> Result<User> {
        let query = format!(
            "INSERT INTO users (id, name, email, role, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;
        User::try_from(row)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

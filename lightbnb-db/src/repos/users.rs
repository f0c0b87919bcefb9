//! User repository
//!
//! Lookups return `Ok(None)` for a missing row; a failed query is an `Err`.

use std::fmt;

use lightbnb_core::NewUser;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::error::DbError;

/// User record from database
#[derive(Clone, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Exact match on email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        debug!(email, "looking up user by email");
        sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::from_query("get_user_by_email", e))
    }

    /// Exact match on id.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, DbError> {
        debug!(id, "looking up user by id");
        sqlx::query_as(
            r#"
            SELECT u.id, u.name, u.email, u.password
            FROM users AS u
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::from_query("get_user_by_id", e))
    }

    /// Insert a user and return the generated id.
    ///
    /// The password is stored as given and must already be hashed. A second
    /// account with the same email surfaces as [`DbError::Conflict`].
    pub async fn create(&self, user: &NewUser) -> Result<i32, DbError> {
        debug!(?user, "creating user");
        sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_query("create_user", e))
    }
}

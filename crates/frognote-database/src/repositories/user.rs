//! User repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use frognote_core::error::{AppError, ErrorKind};
use frognote_core::result::AppResult;
use frognote_core::types::UserId;
use frognote_entity::user::{SignInId, User};

use super::UserStore;

/// Raw `users` row before domain validation.
#[derive(Debug, FromRow)]
struct UserRow {
    id: UserId,
    sign_in_id: String,
    password: String,
    screen_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::new(
            row.id,
            row.screen_name,
            SignInId::new(row.sign_in_id)?,
            row.password,
        )
    }
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint violation on `sign_in_id` to a conflict.
fn map_write_error(err: sqlx::Error, context: &'static str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::with_source(ErrorKind::Conflict, "signInId is already taken", err)
        }
        _ => AppError::with_source(ErrorKind::Database, context, err),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(
        &self,
        sign_in_id: &SignInId,
        password_digest: &str,
        screen_name: &str,
    ) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"INSERT INTO users (sign_in_id, password, screen_name)
               VALUES ($1, $2, $3)
               RETURNING id, sign_in_id, password, screen_name"#,
        )
        .bind(sign_in_id.as_str())
        .bind(password_digest)
        .bind(screen_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user"))?;

        tracing::debug!(user_id = %row.id, "Created user");
        User::try_from(row)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET sign_in_id = $1, password = $2, screen_name = $3 WHERE id = $4",
        )
        .bind(user.sign_in_id.as_str())
        .bind(&user.password)
        .bind(&user.screen_name)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }
        Ok(())
    }

    async fn find_by_sign_in_id(&self, sign_in_id: &SignInId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, sign_in_id, password, screen_name FROM users WHERE sign_in_id = $1",
        )
        .bind(sign_in_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by sign-in id", e)
        })?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, sign_in_id, password, screen_name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))?
        .map(User::try_from)
        .transpose()
    }

    async fn delete(&self, sign_in_id: &SignInId) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE sign_in_id = $1")
            .bind(sign_in_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_validates() {
        let row = UserRow {
            id: UserId::new(1),
            sign_in_id: "frog".into(),
            password: "digest".into(),
            screen_name: "Frog".into(),
        };
        let user = User::try_from(row).unwrap();
        assert_eq!(user.sign_in_id.as_str(), "frog");

        let bad = UserRow {
            id: UserId::new(2),
            sign_in_id: String::new(),
            password: "digest".into(),
            screen_name: "Frog".into(),
        };
        assert_eq!(User::try_from(bad).unwrap_err().kind, ErrorKind::Validation);
    }
}

use companies_core::error::AppError;
use companies_core::models::{NewUser, User};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use crate::database::map_db_error;

/// Repository for API users.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user. A taken user name yields [`AppError::Conflict`].
    pub async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (first_name, last_name, user_name, email, phone_number, password_hash, roles)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, user_name, email, phone_number, password_hash, roles
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, || format!("User name '{}' is already taken", user.user_name)))?;

        Ok(row.into())
    }

    pub async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, user_name, email, phone_number, password_hash, roles
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: Option<String>,
    last_name: Option<String>,
    user_name: String,
    email: Option<String>,
    phone_number: Option<String>,
    password_hash: String,
    roles: Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            user_name: row.user_name,
            email: row.email,
            phone_number: row.phone_number,
            password_hash: row.password_hash,
            roles: row.roles,
        }
    }
}

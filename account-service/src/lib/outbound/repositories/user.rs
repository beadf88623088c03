use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::CreateUserParams;
use crate::domain::user::models::UpdateUserParams;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::StoreError;

const USERNAME_CONSTRAINT: &str = "users_pkey";
const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    hashed_password: String,
    full_name: String,
    email: String,
    password_changed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            hashed_password: row.hashed_password,
            full_name: row.full_name,
            email: row.email,
            password_changed_at: row.password_changed_at,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error onto the store taxonomy, naming the field behind a
/// unique violation.
fn classify(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USERNAME_CONSTRAINT) => return StoreError::Conflict("username".to_string()),
                Some(EMAIL_CONSTRAINT) => return StoreError::Conflict("email".to_string()),
                _ => {}
            }
        }
    }
    StoreError::Other(err.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, hashed_password, full_name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING username, hashed_password, full_name, email, password_changed_at, created_at
            "#,
        )
        .bind(&params.username)
        .bind(&params.hashed_password)
        .bind(&params.full_name)
        .bind(&params.email)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, hashed_password, full_name, email, password_changed_at, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(User::from)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    async fn update_user(&self, params: UpdateUserParams) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET
                hashed_password = COALESCE($1, hashed_password),
                password_changed_at = COALESCE($2, password_changed_at),
                full_name = COALESCE($3, full_name),
                email = COALESCE($4, email)
            WHERE username = $5
            RETURNING username, hashed_password, full_name, email, password_changed_at, created_at
            "#,
        )
        .bind(params.hashed_password)
        .bind(params.password_changed_at)
        .bind(params.full_name)
        .bind(params.email)
        .bind(&params.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(User::from)
            .ok_or(StoreError::NotFound(params.username))
    }
}

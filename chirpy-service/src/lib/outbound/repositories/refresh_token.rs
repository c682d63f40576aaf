use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::session::errors::SessionError;
use crate::session::models::RefreshToken;
use crate::session::ports::RefreshTokenRepository;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    token: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshToken {
            token: row.token,
            account_id: AccountId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
            revoked_at: row.revoked_at,
        }
    }
}

fn store_failure(e: sqlx::Error) -> SessionError {
    SessionError::StoreFailure(e.to_string())
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&token.token)
        .bind(token.account_id.0)
        .bind(token.created_at)
        .bind(token.updated_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(store_failure)?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure)?;

        Ok(row.map(RefreshToken::from))
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, SessionError> {
        // Single statement: an already revoked row keeps its first timestamp.
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, $2),
                updated_at = CASE WHEN revoked_at IS NULL THEN $2 ELSE updated_at END
            WHERE token = $1
            "#,
        )
        .bind(token)
        .bind(revoked_at)
        .execute(&self.pool)
        .await
        .map_err(store_failure)?;

        Ok(result.rows_affected() > 0)
    }
}

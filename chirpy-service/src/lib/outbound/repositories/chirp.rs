use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::ChirpId;
use crate::chirp::ports::ChirpRepository;

pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ChirpRow {
    id: Uuid,
    user_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChirpRow> for Chirp {
    fn from(row: ChirpRow) -> Self {
        Chirp {
            id: ChirpId(row.id),
            author_id: AccountId(row.user_id),
            body: ChirpBody::from_stored(row.body),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> ChirpError {
    ChirpError::DatabaseError(e.to_string())
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        sqlx::query(
            r#"
            INSERT INTO chirps (id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chirp.id.0)
        .bind(chirp.author_id.0)
        .bind(chirp.body.as_str())
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(chirp)
    }

    async fn find_all(&self, author_id: Option<AccountId>) -> Result<Vec<Chirp>, ChirpError> {
        let rows = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM chirps
            WHERE $1::uuid IS NULL OR user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(author_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Chirp::from).collect())
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Chirp::from))
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ChirpError::NotFound(*id));
        }

        Ok(())
    }
}

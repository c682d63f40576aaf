use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    hashed_password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_chirpy_red: bool,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.hashed_password,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_chirpy_red: row.is_chirpy_red,
        })
    }
}

fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return AccountError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, hashed_password, created_at, updated_at, is_chirpy_red)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .bind(account.is_chirpy_red)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account.email))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, hashed_password, created_at, updated_at, is_chirpy_red
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, hashed_password, created_at, updated_at, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn update_credentials(
        &self,
        id: &AccountId,
        email: &EmailAddress,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, email, hashed_password, created_at, updated_at, is_chirpy_red
            "#,
        )
        .bind(id.0)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email))?;

        row.ok_or_else(|| AccountError::NotFound(id.to_string()))?
            .try_into()
    }

    async fn set_subscription(
        &self,
        id: &AccountId,
        is_chirpy_red: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(is_chirpy_red)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, AccountError> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

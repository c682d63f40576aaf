use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Clock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CreateAccountCommand;
use crate::account::models::UpdateCredentialsCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing
    /// * `clock` - Source of creation and update timestamps
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            authenticator,
            clock,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| AccountError::PasswordHashing(e.to_string()))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self.hash_password(command.password.as_str())?;
        let now = self.clock.now();

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
            is_chirpy_red: false,
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account created");

        Ok(created)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_credentials(
        &self,
        id: &AccountId,
        command: UpdateCredentialsCommand,
    ) -> Result<Account, AccountError> {
        let password_hash = self.hash_password(command.password.as_str())?;

        let updated = self
            .repository
            .update_credentials(id, &command.email, &password_hash, self.clock.now())
            .await?;
        tracing::info!(account_id = %id, "Account credentials updated");

        Ok(updated)
    }

    async fn upgrade_subscription(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository
            .set_subscription(id, true, self.clock.now())
            .await?;
        tracing::info!(account_id = %id, "Account upgraded to Chirpy Red");

        Ok(())
    }

    async fn reset(&self) -> Result<u64, AccountError> {
        let removed = self.repository.delete_all().await?;
        tracing::warn!(removed, "All accounts removed");

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use auth::FixedClock;
    use chrono::DateTime;
    use chrono::Duration;
    use chrono::TimeZone;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::account::models::EmailAddress;
    use crate::account::models::Password;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
            async fn update_credentials(&self, id: &AccountId, email: &EmailAddress, password_hash: &str, updated_at: DateTime<Utc>) -> Result<Account, AccountError>;
            async fn set_subscription(&self, id: &AccountId, is_chirpy_red: bool, updated_at: DateTime<Utc>) -> Result<(), AccountError>;
            async fn delete_all(&self) -> Result<u64, AccountError>;
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn service(repository: MockTestAccountRepository) -> AccountService<MockTestAccountRepository> {
        let authenticator = Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            "chirpy",
            Duration::hours(1),
        ));
        let clock = Arc::new(FixedClock::new(fixed_now()));
        AccountService::new(Arc::new(repository), authenticator, clock)
    }

    fn command(email: &str, password: &str) -> CreateAccountCommand {
        CreateAccountCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_account_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "walt@breakingbad.com"
                    && account.password_hash.starts_with("$argon2")
                    && !account.is_chirpy_red
                    && account.created_at == account.updated_at
            })
            .times(1)
            .returning(|account| Ok(account));

        let result = service(repository)
            .create_account(command("walt@breakingbad.com", "04234"))
            .await;

        let account = result.unwrap();
        assert_eq!(account.email.as_str(), "walt@breakingbad.com");
        assert_ne!(account.password_hash, "04234");
    }

    #[tokio::test]
    async fn test_create_account_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_create().times(1).returning(|account| {
            Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ))
        });

        let result = service(repository)
            .create_account(command("walt@breakingbad.com", "04234"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).get_account(&AccountId::new()).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_credentials_rehashes_password() {
        let mut repository = MockTestAccountRepository::new();
        let account_id = AccountId::new();

        repository
            .expect_update_credentials()
            .withf(move |id, email, hash, updated_at| {
                *id == account_id
                    && email.as_str() == "heisenberg@breakingbad.com"
                    && hash.starts_with("$argon2")
                    && *updated_at == fixed_now()
            })
            .times(1)
            .returning(|id, email, hash, updated_at| {
                Ok(Account {
                    id: *id,
                    email: email.clone(),
                    password_hash: hash.to_string(),
                    created_at: updated_at - Duration::days(1),
                    updated_at,
                    is_chirpy_red: false,
                })
            });

        let command = UpdateCredentialsCommand {
            email: EmailAddress::new("heisenberg@breakingbad.com".to_string()).unwrap(),
            password: Password::new("losPollosHermanos".to_string()).unwrap(),
        };

        let account = service(repository)
            .update_credentials(&account_id, command)
            .await
            .unwrap();
        assert_eq!(account.email.as_str(), "heisenberg@breakingbad.com");
        assert_eq!(account.updated_at, fixed_now());
    }

    #[tokio::test]
    async fn test_upgrade_subscription_not_found() {
        let mut repository = MockTestAccountRepository::new();
        let account_id = AccountId::new();

        repository
            .expect_set_subscription()
            .withf(|_, flag, _| *flag)
            .times(1)
            .returning(|id, _, _| Err(AccountError::NotFound(id.to_string())));

        let result = service(repository).upgrade_subscription(&account_id).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upgrade_subscription_stamps_clock_time() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_set_subscription()
            .withf(|_, flag, updated_at| *flag && *updated_at == fixed_now())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = service(repository).upgrade_subscription(&AccountId::new()).await;
        assert!(result.is_ok());
    }
}

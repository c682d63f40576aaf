use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Publish a chirp for an authenticated author.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// List chirps ordered by creation time, optionally for one author.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// Delete a chirp on behalf of `acting`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `NotOwner` - `acting` is not the author
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: &ChirpId, acting: &AccountId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist new chirp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// All chirps in ascending creation order, optionally for one author.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_all(&self, author_id: Option<AccountId>) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Returns
    /// Optional chirp entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Remove chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;

use crate::account::models::AccountId;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;
use crate::chirp::models::SortOrder;
use crate::chirp::ports::ChirpRepository;
use crate::chirp::ports::ChirpServicePort;

/// Domain service implementation for chirp operations.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
    clock: Arc<dyn Clock>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(repository: Arc<CR>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError> {
        let now = self.clock.now();

        let chirp = Chirp {
            id: ChirpId::new(),
            author_id: command.author_id,
            body: command.body,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(chirp).await?;
        tracing::info!(chirp_id = %created.id, author_id = %created.author_id, "Chirp created");

        Ok(created)
    }

    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.repository.find_all(query.author_id).await?;

        if query.sort == SortOrder::Descending {
            chirps.reverse();
        }

        Ok(chirps)
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(*id))
    }

    async fn delete_chirp(&self, id: &ChirpId, acting: &AccountId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if !auth::authorize(acting, &chirp.author_id) {
            tracing::warn!(chirp_id = %id, account_id = %acting, "Rejected delete by non-author");
            return Err(ChirpError::NotOwner {
                account_id: *acting,
                chirp_id: *id,
            });
        }

        self.repository.delete(id).await?;
        tracing::info!(chirp_id = %id, "Chirp deleted");

        Ok(())
    }
}

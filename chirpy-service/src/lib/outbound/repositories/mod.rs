pub mod account;
pub mod chirp;
pub mod memory;
pub mod refresh_token;

pub use account::PostgresAccountRepository;
pub use chirp::PostgresChirpRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryChirpRepository;
pub use memory::InMemoryDatabase;
pub use memory::InMemoryRefreshTokenRepository;
pub use refresh_token::PostgresRefreshTokenRepository;

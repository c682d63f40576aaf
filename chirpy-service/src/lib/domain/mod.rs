pub mod account;
pub mod chirp;
pub mod session;

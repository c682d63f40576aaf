use rand::RngCore;

/// Random bytes behind every refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token value.
///
/// # Returns
/// 32 bytes from the thread-local CSPRNG, hex encoded (64 characters)
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

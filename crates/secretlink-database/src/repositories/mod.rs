//! Repository implementations for all SecretLink entities.

pub mod api_token;
pub mod link;
pub mod user;

pub use api_token::ApiTokenRepository;
pub use link::LinkRepository;
pub use user::UserRepository;

//! Browser session tokens.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::SessionClaims;
pub use decoder::SessionDecoder;
pub use encoder::SessionEncoder;

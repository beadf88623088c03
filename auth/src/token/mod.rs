pub mod errors;
pub mod jwt;
pub mod maker;
pub mod payload;

pub use errors::TokenError;
pub use jwt::JwtMaker;
pub use maker::TokenMaker;
pub use payload::Payload;

//! Authentication adapters.
//!
//! - `jwt` - HS256 token signing and verification
//! - `bcrypt_hasher` - Password hashing
//! - `token_session` - `SessionValidator` over tokens and the user store
//! - `mock` - Test implementations

mod bcrypt_hasher;
mod jwt;
mod mock;
mod token_session;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt::JwtTokenService;
pub use mock::{MockPasswordHasher, MockSessionValidator};
pub use token_session::TokenSessionValidator;

//! Auth module - credentials, session tokens and the page redirect policy.

mod credentials;
pub mod route_guard;
mod tokens;

pub use credentials::{
    SignInForm, SignUpForm, EMAIL_ALREADY_EXISTS, EMAIL_NOT_REGISTERED, MIN_PASSWORD_LENGTH,
    PASSWORDS_DO_NOT_MATCH, PASSWORD_TOO_SHORT, WRONG_PASSWORD,
};
pub use route_guard::GuardDecision;
pub use tokens::{
    IssuedToken, RefreshTokenRecord, TokenKind, TokenPair, VerifiedToken, ACCESS_TOKEN_COOKIE,
    REFRESH_TOKEN_COOKIE,
};

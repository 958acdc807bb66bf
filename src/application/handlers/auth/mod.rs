//! Account and session command handlers.

mod get_current_user;
mod refresh_session;
mod session_issuer;
mod sign_in;
mod sign_out;
mod sign_up;

pub use get_current_user::GetCurrentUserHandler;
pub use refresh_session::{RefreshSessionCommand, RefreshSessionHandler, RefreshSessionResult};
pub use session_issuer::{token_digest, SessionIssuer};
pub use sign_in::{SignInCommand, SignInHandler, SignInResult};
pub use sign_out::{SignOutCommand, SignOutHandler};
pub use sign_up::{SignUpCommand, SignUpHandler, SignUpResult};

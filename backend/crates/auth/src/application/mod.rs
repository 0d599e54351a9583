//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod check_session;
pub mod config;
pub(crate) mod password;
pub mod seed_account;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::{AuthUser, CheckSessionUseCase};
pub use config::AuthConfig;
pub use seed_account::{SeedAccountInput, SeedAccountUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token::{Claims, TokenError, TokenService, VerifiedToken};

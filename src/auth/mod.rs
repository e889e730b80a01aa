// Authentication module
// Argon2 password hashing, stateless JWT bearer tokens, and the gate that
// protects every per-user route.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, register_handler};
pub use middleware::{require_auth, AuthenticatedUser};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
pub use password::PasswordService;
pub use service::AuthService;
pub use token::TokenService;

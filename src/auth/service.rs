// Authentication service - business logic layer

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, LoginRequest, NewUser, RegisterRequest},
    password::PasswordService,
    token::TokenService,
};
use crate::store::Store;

/// Authentication service coordinating registration and login
pub struct AuthService {
    store: Arc<dyn Store>,
    passwords: Arc<PasswordService>,
    tokens: Arc<TokenService>,
    /// Verified against on unknown-email logins so both failures cost one Argon2 run
    dummy_hash: Option<String>,
}

/// Plaintext hashed into `dummy_hash`
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        passwords: Arc<PasswordService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let dummy_hash = match passwords.hash_password(DUMMY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!("Could not prepare dummy password digest: {}", e);
                None
            }
        };

        Self {
            store,
            passwords,
            tokens,
            dummy_hash,
        }
    }

    /// Register a new user and issue their first token
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        if self.store.find_user_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self.hash_password(request.password).await?;

        // A concurrent registration can still win the race; the store's
        // uniqueness check turns that into EmailAlreadyExists as well.
        let user = self
            .store
            .insert_user(NewUser {
                full_name: request.full_name,
                email: request.email,
                password_hash,
                phone: request.phone,
                region: request.region,
            })
            .await?;

        let token = self.tokens.issue(user.id, &user.email)?;

        info!("Registered user {}", user.id);
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Log a user in. Unknown email and wrong password fail identically.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let Some(user) = self.store.find_user_by_email(&request.email).await? else {
            debug!("Login for unknown email");
            if let Some(dummy_hash) = &self.dummy_hash {
                self.verify_password(request.password, dummy_hash.clone())
                    .await?;
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .verify_password(request.password, user.password_hash.clone())
            .await?
        {
            debug!("Login with wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.email)?;

        info!("User {} logged in", user.id);
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    // Hashing runs on the blocking pool

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
    }
}

//! Signed-in user state shared by the client-side views.

pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::client::identity::{IdentityClient, SignUpOutcome};
use crate::client::{ApiError, VideoApi};
use crate::models::User;

/// Key the demo user is persisted under.
pub const DEMO_USER_KEY: &str = "demo_user";
pub const DEMO_EMAIL: &str = "demo@example.com";
const MIN_PASSWORD_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Please verify your email address before logging in.")]
    EmailNotConfirmed,
    #[error("Invalid login credentials. Please check your email and password.")]
    InvalidCredentials,
    #[error("An account with this email already exists. Please log in or reset your password.")]
    AlreadyRegistered,
    #[error("No identity service configured")]
    NoIdentityService,
    /// Any other identity service failure, by its message.
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Store(String),
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        if err.message.contains("Email not confirmed") {
            SessionError::EmailNotConfirmed
        } else if err.message.contains("Invalid login credentials") {
            SessionError::InvalidCredentials
        } else {
            SessionError::Api(err.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpStatus {
    /// The service sent a confirmation mail; nobody is signed in yet.
    VerificationSent,
    SignedIn(User),
}

pub struct AuthContext {
    user: RwLock<Option<User>>,
    access_token: RwLock<Option<String>>,
    loading: AtomicBool,
    store: Arc<dyn SessionStore>,
    identity: Option<IdentityClient>,
    api: Option<Arc<dyn VideoApi>>,
}

impl AuthContext {
    /// Starts in the loading state until [`AuthContext::restore`] runs.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        AuthContext {
            user: RwLock::new(None),
            access_token: RwLock::new(None),
            loading: AtomicBool::new(true),
            store,
            identity: None,
            api: None,
        }
    }

    pub fn with_identity(mut self, identity: IdentityClient) -> Self {
        self.identity = Some(identity);
        self
    }

    /// The client whose bearer token follows sign-in and sign-out.
    pub fn with_api(mut self, api: Arc<dyn VideoApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub async fn user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Picks up a previously persisted demo user. Unreadable entries are
    /// ignored; loading ends either way.
    pub async fn restore(&self) -> Option<User> {
        let restored = match self.store.get(DEMO_USER_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Ignoring unreadable {} entry: {}", DEMO_USER_KEY, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Session store unavailable: {}", e);
                None
            }
        };
        if let Some(user) = &restored {
            *self.user.write().await = Some(user.clone());
        }
        self.loading.store(false, Ordering::SeqCst);
        restored
    }

    /// Signs in a locally generated demo user unless someone is already
    /// signed in, in which case that user is returned unchanged.
    pub async fn sign_in_demo(&self) -> Result<User, SessionError> {
        let mut held = self.user.write().await;
        if let Some(user) = held.as_ref() {
            return Ok(user.clone());
        }

        let user = User::new(format!("demo-{}", random_base36(9)), DEMO_EMAIL);
        let raw = serde_json::to_string(&user).map_err(|e| SessionError::Store(e.to_string()))?;
        self.store
            .set(DEMO_USER_KEY, &raw)
            .await
            .map_err(SessionError::Store)?;
        info!("Demo user {} signed in", user.id);
        *held = Some(user.clone());
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, SessionError> {
        require_credentials(email, password)?;
        let identity = self
            .identity
            .as_ref()
            .ok_or(SessionError::NoIdentityService)?;

        let session = identity.sign_in_with_password(email, password).await?;
        let user = session.user.to_user();
        self.hold(user.clone(), session.access_token).await;
        info!("User {} signed in", user.id);
        Ok(user)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpStatus, SessionError> {
        require_credentials(email, password)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::PasswordTooShort);
        }
        let identity = self
            .identity
            .as_ref()
            .ok_or(SessionError::NoIdentityService)?;

        match identity.sign_up(email, password).await? {
            SignUpOutcome::ConfirmationSent(user) => {
                if user.identities.as_ref().is_some_and(|ids| ids.is_empty()) {
                    return Err(SessionError::AlreadyRegistered);
                }
                Ok(SignUpStatus::VerificationSent)
            }
            SignUpOutcome::SignedIn(session) => {
                let user = session.user.to_user();
                self.hold(user.clone(), session.access_token).await;
                Ok(SignUpStatus::SignedIn(user))
            }
        }
    }

    /// Forgets the user, the persisted demo entry and the access token.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        *self.user.write().await = None;
        *self.access_token.write().await = None;
        if let Some(api) = &self.api {
            api.set_access_token(None);
        }
        self.store
            .remove(DEMO_USER_KEY)
            .await
            .map_err(SessionError::Store)
    }

    /// A real session replaces any persisted demo user.
    async fn hold(&self, user: User, token: String) {
        if let Err(e) = self.store.remove(DEMO_USER_KEY).await {
            warn!("Failed to clear {} entry: {}", DEMO_USER_KEY, e);
        }
        if let Some(api) = &self.api {
            api.set_access_token(Some(token.clone()));
        }
        *self.access_token.write().await = Some(token);
        *self.user.write().await = Some(user);
    }
}

fn require_credentials(email: &str, password: &str) -> Result<(), SessionError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SessionError::MissingCredentials);
    }
    Ok(())
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

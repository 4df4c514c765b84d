// ============================================================================
// Service mock : AuthService
// ============================================================================
// Authentification simulée, session persistée sous la clé "currentUser"
//
// Règles de validation mock :
// - login : le mot de passe "error" est refusé, tout le reste est accepté
// - register : un email contenant "error" est refusé (déjà utilisé)
// - reset du mot de passe : l'email doit contenir '@'
// ============================================================================

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{info, instrument, warn};

use super::Latency;
use crate::models::User;
use crate::storage::{self, KeyValueStore, CURRENT_USER_KEY};

/// Utilisateur de démonstration renvoyé par login
fn mock_user(email: &str) -> User {
    User {
        id: "u_12345".to_string(),
        email: email.to_string(),
        name: "Crypto Investor".to_string(),
        avatar: Some(
            "https://ui-avatars.com/api/?name=Crypto+Investor&background=0D8ABC&color=fff".to_string(),
        ),
    }
}

/// Caractères laissés tels quels dans un composant d'URL
/// (alphanumériques et `- _ . ! ~ * ' ( )`, comme encodeURIComponent)
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// URL d'avatar générée à partir du nom
fn avatar_for(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=0D8ABC&color=fff",
        utf8_percent_encode(name, URI_COMPONENT)
    )
}

/// Service d'authentification
#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn KeyValueStore>,
    latency: Latency,
}

impl AuthService {
    pub fn new(storage: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self { storage, latency }
    }

    /// Connecte l'utilisateur et persiste la session
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.latency.wait(800).await;

        if password == "error" {
            warn!("Mock login rejected");
            anyhow::bail!("Invalid credentials");
        }

        let user = mock_user(email);
        storage::save_json(self.storage.as_ref(), CURRENT_USER_KEY, &user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Crée un compte et persiste la session
    #[instrument(skip(self, _password))]
    pub async fn register(&self, name: &str, email: &str, _password: &str) -> Result<User> {
        self.latency.wait(1000).await;

        if email.contains("error") {
            warn!("Mock registration rejected");
            anyhow::bail!("Email already exists");
        }

        let user = User {
            id: format!("u_{}", Utc::now().timestamp_millis()),
            email: email.to_string(),
            name: name.to_string(),
            avatar: Some(avatar_for(name)),
        };
        storage::save_json(self.storage.as_ref(), CURRENT_USER_KEY, &user)?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.latency.wait(1000).await;

        if !email.contains('@') {
            anyhow::bail!("Invalid email address");
        }
        info!("Password reset requested");
        Ok(())
    }

    /// Supprime la session stockée (n'échoue jamais côté mock)
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.latency.wait(300).await;
        self.storage.remove(CURRENT_USER_KEY)?;
        info!("User logged out");
        Ok(())
    }

    /// Session stockée, s'il y en a une
    ///
    /// Une session illisible est traitée comme absente (avec un warning).
    pub fn current_user(&self) -> Option<User> {
        match storage::load_json::<User>(self.storage.as_ref(), CURRENT_USER_KEY) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = ?e, "Ignoring unreadable stored session");
                None
            }
        }
    }
}

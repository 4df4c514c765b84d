// ============================================================================
// Slice : auth
// ============================================================================
// Cycle de vie de la session : login, register, reset, logout, restauration
//
// Un seul message d'erreur à la fois, effacé au début de chaque tentative.
// ============================================================================

use super::message_or;
use crate::models::{RequestStatus, User};

#[derive(Debug, Clone)]
pub enum AuthAction {
    LoginPending,
    LoginFulfilled(User),
    LoginRejected(String),

    RegisterPending,
    RegisterFulfilled(User),
    RegisterRejected(String),

    PasswordResetPending,
    PasswordResetFulfilled,
    PasswordResetRejected(String),

    LogoutFulfilled,

    /// Session restaurée au démarrage (None = non connecté, pas une erreur)
    CheckAuthFulfilled(Option<User>),

    ClearError,
    ResetPasswordResetStatus,
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub status: RequestStatus,
    /// Statut orthogonal de la demande de reset
    pub password_reset_status: RequestStatus,
    pub error: Option<String>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginPending | AuthAction::RegisterPending => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            AuthAction::LoginFulfilled(user) | AuthAction::RegisterFulfilled(user) => {
                self.status = RequestStatus::Succeeded;
                self.is_authenticated = true;
                self.user = Some(user);
            }
            AuthAction::LoginRejected(error) => {
                self.status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Login failed"));
            }
            AuthAction::RegisterRejected(error) => {
                self.status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Registration failed"));
            }

            AuthAction::PasswordResetPending => {
                self.password_reset_status = RequestStatus::Loading;
                self.error = None;
            }
            AuthAction::PasswordResetFulfilled => {
                self.password_reset_status = RequestStatus::Succeeded;
            }
            AuthAction::PasswordResetRejected(error) => {
                self.password_reset_status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Failed to request password reset"));
            }

            AuthAction::LogoutFulfilled => {
                self.user = None;
                self.is_authenticated = false;
                self.status = RequestStatus::Idle;
            }

            AuthAction::CheckAuthFulfilled(user) => {
                self.is_authenticated = user.is_some();
                self.user = user;
            }

            AuthAction::ClearError => {
                self.error = None;
            }
            AuthAction::ResetPasswordResetStatus => {
                self.password_reset_status = RequestStatus::Idle;
                self.error = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u_1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_login_flow_clears_previous_error() {
        let mut state = AuthState::new();
        state.reduce(AuthAction::LoginPending);
        state.reduce(AuthAction::LoginRejected("Invalid credentials".to_string()));
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_authenticated);

        state.reduce(AuthAction::LoginPending);
        assert!(state.error.is_none());

        state.reduce(AuthAction::LoginFulfilled(user()));
        assert!(state.is_authenticated);
        assert_eq!(state.user, Some(user()));
    }

    #[test]
    fn test_logout_resets_session() {
        let mut state = AuthState::new();
        state.reduce(AuthAction::RegisterFulfilled(user()));
        state.reduce(AuthAction::LogoutFulfilled);
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
        assert_eq!(state.status, RequestStatus::Idle);
    }

    #[test]
    fn test_check_auth_without_stored_user() {
        let mut state = AuthState::new();
        state.reduce(AuthAction::CheckAuthFulfilled(None));
        assert!(!state.is_authenticated);
        assert!(state.error.is_none());

        state.reduce(AuthAction::CheckAuthFulfilled(Some(user())));
        assert!(state.is_authenticated);
    }

    #[test]
    fn test_password_reset_status_is_orthogonal() {
        let mut state = AuthState::new();
        state.reduce(AuthAction::LoginFulfilled(user()));
        state.reduce(AuthAction::PasswordResetPending);
        state.reduce(AuthAction::PasswordResetRejected(String::new()));

        assert_eq!(state.status, RequestStatus::Succeeded);
        assert_eq!(state.password_reset_status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Failed to request password reset"));

        state.reduce(AuthAction::ResetPasswordResetStatus);
        assert_eq!(state.password_reset_status, RequestStatus::Idle);
        assert!(state.error.is_none());
    }
}

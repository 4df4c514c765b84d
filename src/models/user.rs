// ============================================================================
// Module : user
// ============================================================================
// Session utilisateur et préférences
//
// CONCEPTS RUST :
// 1. #[serde(default)] : un champ absent du JSON stocké prend sa valeur
//    par défaut au lieu de faire échouer le chargement
// 2. Patch partiel : chaque Option<T> à Some écrase la valeur existante
// ============================================================================

use serde::{Deserialize, Serialize};

/// Utilisateur connecté
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Thème de l'interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Préférences de notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub marketing_emails: bool,
    pub price_alerts: bool,
    pub security_alerts: bool,
    pub newsletter: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            marketing_emails: false,
            price_alerts: true,
            security_alerts: true,
            newsletter: true,
        }
    }
}

/// Paramètres de sécurité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    pub two_factor_enabled: bool,
    pub last_password_change: String,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_enabled: false,
            last_password_change: "2023-01-01".to_string(),
        }
    }
}

/// Profil et préférences de l'utilisateur local
///
/// Persisté en entier sous la clé `user_settings` à chaque modification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
    /// Code devise (ex: "USD")
    pub currency: String,
    pub theme: Theme,
    /// Code langue (ex: "en")
    pub language: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub birthdate: Option<String>,
    pub notifications: NotificationPreferences,
    pub security: SecuritySettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            display_name: "Crypto Investor".to_string(),
            email: "user@example.com".to_string(),
            avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=Felix".to_string(),
            currency: "USD".to_string(),
            theme: Theme::Light,
            language: "en".to_string(),
            bio: Some(String::new()),
            website: Some(String::new()),
            birthdate: Some(String::new()),
            notifications: NotificationPreferences::default(),
            security: SecuritySettings::default(),
        }
    }
}

/// Modification partielle des settings
///
/// Merge superficiel : les objets imbriqués (notifications, security)
/// sont remplacés en entier quand ils sont fournis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub currency: Option<String>,
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub birthdate: Option<String>,
    pub notifications: Option<NotificationPreferences>,
    pub security: Option<SecuritySettings>,
}

impl SettingsPatch {
    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Default::default()
        }
    }

    pub fn currency(currency: impl Into<String>) -> Self {
        Self {
            currency: Some(currency.into()),
            ..Default::default()
        }
    }

    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Default::default()
        }
    }

    pub fn notifications(notifications: NotificationPreferences) -> Self {
        Self {
            notifications: Some(notifications),
            ..Default::default()
        }
    }
}

impl UserSettings {
    /// Retourne une copie des settings avec le patch appliqué
    ///
    /// CONCEPT RUST : self par référence, résultat owned
    /// - Le slice persiste d'abord la nouvelle valeur, puis la remplace
    pub fn merged(&self, patch: SettingsPatch) -> UserSettings {
        let mut next = self.clone();
        if let Some(v) = patch.display_name {
            next.display_name = v;
        }
        if let Some(v) = patch.email {
            next.email = v;
        }
        if let Some(v) = patch.avatar_url {
            next.avatar_url = v;
        }
        if let Some(v) = patch.currency {
            next.currency = v;
        }
        if let Some(v) = patch.theme {
            next.theme = v;
        }
        if let Some(v) = patch.language {
            next.language = v;
        }
        if let Some(v) = patch.bio {
            next.bio = Some(v);
        }
        if let Some(v) = patch.website {
            next.website = Some(v);
        }
        if let Some(v) = patch.birthdate {
            next.birthdate = Some(v);
        }
        if let Some(v) = patch.notifications {
            next.notifications = v;
        }
        if let Some(v) = patch.security {
            next.security = v;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_other_fields() {
        let settings = UserSettings::default();
        let merged = settings.merged(SettingsPatch::theme(Theme::Dark));

        assert_eq!(merged.theme, Theme::Dark);
        assert_eq!(merged.currency, settings.currency);
        assert_eq!(merged.display_name, settings.display_name);
        assert_eq!(merged.notifications, settings.notifications);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        // Ancien format stocké : seulement quelques champs
        let json = r#"{"displayName":"Satoshi","theme":"dark"}"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.display_name, "Satoshi");
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.currency, "USD");
        assert!(settings.notifications.price_alerts);
    }

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: "u_1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            avatar: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatar").is_none());
        assert_eq!(json["email"], "a@b.c");
    }
}

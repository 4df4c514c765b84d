// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Polling avec timeout : l'UI se redessine même sans frappe, ce qui
//    laisse apparaître les prix mis à jour par le ticker
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Pas de frappe pendant le timeout (rafraîchissement)
    Tick,

    /// Erreur survenue
    Error,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    timeout: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// - poll(timeout) attend au plus 250 ms
    /// - Sans événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.timeout)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release : on garde Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : identifier les touches
// ============================================================================

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        _ => None,
    }
}

/// Vérifie si l'événement est exactement le caractère `c`
pub fn is_char_event(event: &Event, c: char) -> bool {
    key_code(event) == Some(KeyCode::Char(c))
}

/// 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Esc)
}

pub fn is_space_event(event: &Event) -> bool {
    is_char_event(event, ' ')
}

pub fn is_enter_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Enter)
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K')))
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J')))
}

/// Flèche gauche ou 'h' : page précédente
pub fn is_left_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Left | KeyCode::Char('h')))
}

/// Flèche droite ou 'l' : page suivante
pub fn is_right_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Right | KeyCode::Char('l')))
}

/// Tab : onglet suivant
pub fn is_tab_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Tab)
}

/// Shift+Tab : onglet précédent
pub fn is_backtab_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::BackTab)
}

/// 'a' : ajouter (lot du portfolio)
pub fn is_add_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('a') | KeyCode::Char('A')))
}

/// 'd' : supprimer (demande confirmation)
pub fn is_delete_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('d') | KeyCode::Char('D')))
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Backspace)
}

/// Caractère imprimable saisi sans Ctrl/Alt (pour le mode saisie)
pub fn is_text_char_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        let modified = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        matches!(key.code, KeyCode::Char(c) if !c.is_control()) && !modified
    } else {
        false
    }
}

/// Chiffre 1-6 : accès direct à un onglet (index à partir de 0)
pub fn get_tab_digit(event: &Event) -> Option<usize> {
    match key_code(event) {
        Some(KeyCode::Char(c @ '1'..='6')) => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match key_code(event) {
        Some(KeyCode::Char(c)) => Some(c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_up_event(&key(KeyCode::Char('k'))));
        assert!(is_down_event(&key(KeyCode::Down)));
        assert!(is_right_event(&key(KeyCode::Char('l'))));
        assert!(!is_right_event(&key(KeyCode::Char('L'))));
        assert!(is_backtab_event(&key(KeyCode::BackTab)));
    }

    #[test]
    fn test_text_and_digits() {
        assert!(is_text_char_event(&key(KeyCode::Char('@'))));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!is_text_char_event(&ctrl_c));
        assert!(!is_text_char_event(&key(KeyCode::Enter)));

        assert_eq!(get_tab_digit(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(get_tab_digit(&key(KeyCode::Char('6'))), Some(5));
        assert_eq!(get_tab_digit(&key(KeyCode::Char('7'))), None);
        assert_eq!(get_char_from_event(&key(KeyCode::Char('x'))), Some('x'));
    }
}

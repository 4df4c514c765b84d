// ============================================================================
// Structure : App
// ============================================================================
// État de l'interface TUI (ce que l'utilisateur regarde et saisit)
//
// CONCEPTS :
// 1. Séparation UI / données : les données de marché et les préférences
//    vivent dans le Store ; App ne garde que l'écran courant, la
//    sélection, la page, la saisie en cours et les confirmations
// 2. State machine : un seul écran actif à la fois
// 3. Mode saisie modal (Vim-like) : Enter valide, ESC annule
// ============================================================================

use std::ops::Range;

use crate::models::{ChangeWindow, PortfolioItem, SettingsPatch, UserSettings};
use crate::store::CryptoState;

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Liste paginée des coins
    Markets,
    /// Détail d'un coin (ouvert depuis Markets ou Watchlist)
    CoinDetail,
    Exchanges,
    Community,
    Watchlist,
    Portfolio,
    Settings,
}

impl Screen {
    /// Onglets accessibles avec Tab (le détail n'en fait pas partie)
    pub const TABS: [Screen; 6] = [
        Screen::Markets,
        Screen::Exchanges,
        Screen::Community,
        Screen::Watchlist,
        Screen::Portfolio,
        Screen::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Markets => "Markets",
            Screen::CoinDetail => "Coin",
            Screen::Exchanges => "Exchanges",
            Screen::Community => "Community",
            Screen::Watchlist => "Watchlist",
            Screen::Portfolio => "Portfolio",
            Screen::Settings => "Settings",
        }
    }

    fn tab_index(&self) -> usize {
        Self::TABS.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Screen {
        Self::TABS[(self.tab_index() + 1) % Self::TABS.len()]
    }

    pub fn previous(&self) -> Screen {
        let len = Self::TABS.len();
        Self::TABS[(self.tab_index() + len - 1) % len]
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Élément de la barre de pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

/// Nombre de pages pour `total` éléments
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Numéros de pages à afficher (pages numérotées à partir de 1)
///
/// - 7 pages ou moins : toutes
/// - début : 1 2 3 4 5 … N
/// - fin : 1 … N-4 N-3 N-2 N-1 N
/// - milieu : 1 … p-1 p p+1 … N
pub fn page_tokens(current: usize, total_pages: usize) -> Vec<PageToken> {
    use PageToken::{Ellipsis, Page};

    if total_pages <= 7 {
        return (1..=total_pages).map(Page).collect();
    }

    let last = total_pages;
    if current <= 4 {
        vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(last)]
    } else if current >= last - 3 {
        vec![
            Page(1),
            Ellipsis,
            Page(last - 4),
            Page(last - 3),
            Page(last - 2),
            Page(last - 1),
            Page(last),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(last),
        ]
    }
}

// ============================================================================
// Filtre des colonnes de variation
// ============================================================================

/// Colonnes de variation visibles sur l'écran Markets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeFilter {
    #[default]
    All,
    Only(ChangeWindow),
}

impl ChangeFilter {
    /// All → 1h → 24h → 7d → All
    pub fn next(&self) -> Self {
        match self {
            ChangeFilter::All => ChangeFilter::Only(ChangeWindow::OneHour),
            ChangeFilter::Only(ChangeWindow::OneHour) => ChangeFilter::Only(ChangeWindow::OneDay),
            ChangeFilter::Only(ChangeWindow::OneDay) => ChangeFilter::Only(ChangeWindow::SevenDays),
            ChangeFilter::Only(ChangeWindow::SevenDays) => ChangeFilter::All,
        }
    }

    pub fn shows(&self, window: ChangeWindow) -> bool {
        match self {
            ChangeFilter::All => true,
            ChangeFilter::Only(only) => *only == window,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeFilter::All => "All",
            ChangeFilter::Only(window) => window.label(),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Devises proposées dans les settings
pub const CURRENCIES: [&str; 5] = ["USD", "EUR", "VND", "JPY", "GBP"];

/// Langues proposées dans les settings
pub const LANGUAGES: [&str; 8] = ["en", "vi", "cn", "jp", "kr", "fr", "de", "es"];

/// Valeur suivante dans une liste circulaire (la première si inconnue)
fn cycle(options: &[&'static str], current: &str) -> &'static str {
    let next = options
        .iter()
        .position(|o| *o == current)
        .map(|i| (i + 1) % options.len())
        .unwrap_or(0);
    options[next]
}

/// Lignes modifiables de l'écran Settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Theme,
    Currency,
    Language,
    PriceAlerts,
    SecurityAlerts,
    MarketingEmails,
    Newsletter,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 7] = [
        SettingsItem::Theme,
        SettingsItem::Currency,
        SettingsItem::Language,
        SettingsItem::PriceAlerts,
        SettingsItem::SecurityAlerts,
        SettingsItem::MarketingEmails,
        SettingsItem::Newsletter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsItem::Theme => "Dark mode",
            SettingsItem::Currency => "Currency",
            SettingsItem::Language => "Language",
            SettingsItem::PriceAlerts => "Price alerts",
            SettingsItem::SecurityAlerts => "Security alerts",
            SettingsItem::MarketingEmails => "Marketing emails",
            SettingsItem::Newsletter => "Newsletter",
        }
    }

    /// Valeur affichée pour les settings courants
    pub fn value(&self, settings: &UserSettings) -> String {
        let on_off = |flag: bool| (if flag { "on" } else { "off" }).to_string();
        match self {
            SettingsItem::Theme => on_off(settings.theme == crate::models::Theme::Dark),
            SettingsItem::Currency => settings.currency.clone(),
            SettingsItem::Language => settings.language.clone(),
            SettingsItem::PriceAlerts => on_off(settings.notifications.price_alerts),
            SettingsItem::SecurityAlerts => on_off(settings.notifications.security_alerts),
            SettingsItem::MarketingEmails => on_off(settings.notifications.marketing_emails),
            SettingsItem::Newsletter => on_off(settings.notifications.newsletter),
        }
    }

    /// Patch qui bascule (ou fait tourner) cette ligne
    ///
    /// Les notifications forment un seul objet : on le remplace en entier.
    pub fn toggle_patch(&self, settings: &UserSettings) -> SettingsPatch {
        let mut notifications = settings.notifications.clone();
        match self {
            SettingsItem::Theme => return SettingsPatch::theme(settings.theme.toggled()),
            SettingsItem::Currency => return SettingsPatch::currency(cycle(&CURRENCIES, &settings.currency)),
            SettingsItem::Language => return SettingsPatch::language(cycle(&LANGUAGES, &settings.language)),
            SettingsItem::PriceAlerts => notifications.price_alerts = !notifications.price_alerts,
            SettingsItem::SecurityAlerts => notifications.security_alerts = !notifications.security_alerts,
            SettingsItem::MarketingEmails => notifications.marketing_emails = !notifications.marketing_emails,
            SettingsItem::Newsletter => notifications.newsletter = !notifications.newsletter,
        }
        SettingsPatch::notifications(notifications)
    }
}

// ============================================================================
// Mode saisie
// ============================================================================

/// Ce que la saisie en cours doit produire
///
/// CONCEPT : Wizard comme state machine
/// - Chaque étape transporte les valeurs déjà validées
/// - PortfolioCoin → PortfolioAmount → PortfolioPrice
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    LoginEmail,
    LoginPassword { email: String },
    RegisterName,
    RegisterEmail { name: String },
    RegisterPassword { name: String, email: String },
    PasswordResetEmail,
    PortfolioCoin,
    PortfolioAmount { coin_id: String, symbol: String, price: f64 },
    PortfolioPrice { coin_id: String, symbol: String, price: f64, amount: f64 },
    ConverterAmount,
}

impl InputKind {
    pub fn prompt(&self) -> String {
        match self {
            InputKind::LoginEmail => "Email: ".to_string(),
            InputKind::LoginPassword { .. } => "Password: ".to_string(),
            InputKind::RegisterName => "Name: ".to_string(),
            InputKind::RegisterEmail { .. } => "Email: ".to_string(),
            InputKind::RegisterPassword { .. } => "Password: ".to_string(),
            InputKind::PasswordResetEmail => "Reset password for email: ".to_string(),
            InputKind::PortfolioCoin => "Coin symbol (ex: BTC): ".to_string(),
            InputKind::PortfolioAmount { symbol, .. } => format!("Amount of {}: ", symbol),
            InputKind::PortfolioPrice { symbol, price, .. } => {
                format!("Avg buy price for {} (Enter = {:.2}): ", symbol, price)
            }
            InputKind::ConverterAmount => "Amount to convert: ".to_string(),
        }
    }

    /// Les mots de passe ne sont pas affichés en clair
    pub fn is_secret(&self) -> bool {
        matches!(self, InputKind::LoginPassword { .. } | InputKind::RegisterPassword { .. })
    }
}

/// Saisie en cours
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub kind: InputKind,
    pub buffer: String,
}

impl Input {
    /// Texte à afficher (masqué pour les mots de passe)
    pub fn display(&self) -> String {
        if self.kind.is_secret() {
            "*".repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }
}

/// Résultat d'une saisie complète, à exécuter par l'appelant
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    PasswordReset { email: String },
    AddPortfolioItem(PortfolioItem),
}

fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// App
// ============================================================================

/// État principal de l'interface
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    pub current_screen: Screen,
    /// Écran auquel revenir en quittant le détail
    return_screen: Screen,

    /// Index sélectionné dans la liste de l'écran courant
    /// (relatif à la page courante sur Markets)
    pub selected_index: usize,

    /// Page courante de Markets (à partir de 1)
    pub page: usize,
    pub page_size: usize,
    pub change_filter: ChangeFilter,

    /// Coin affiché sur l'écran de détail
    pub detail_coin_id: Option<String>,
    /// Quantité du convertisseur coin → USD
    pub converter_amount: f64,

    /// Two-step quit : première pression de 'q' → confirmation
    pub confirm_quit: bool,
    /// Two-step delete : première pression de 'd' → confirmation
    pub confirm_delete: bool,

    /// Saisie en cours (None hors mode saisie)
    pub input: Option<Input>,

    /// Dernier message pour l'utilisateur (erreur de saisie, action faite)
    pub status_message: Option<String>,
}

impl App {
    pub fn new(page_size: usize) -> Self {
        Self {
            running: true,
            current_screen: Screen::Markets,
            return_screen: Screen::Markets,
            selected_index: 0,
            page: 1,
            page_size: page_size.max(1),
            change_filter: ChangeFilter::default(),
            detail_coin_id: None,
            converter_amount: 1.0,
            confirm_quit: false,
            confirm_delete: false,
            input: None,
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Navigation entre écrans
    // ========================================================================

    /// Affiche un onglet (la sélection repart du haut)
    pub fn show(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.selected_index = 0;
        self.cancel_confirmations();
    }

    pub fn next_tab(&mut self) {
        let base = if self.is_on(Screen::CoinDetail) { self.return_screen } else { self.current_screen };
        self.show(base.next());
    }

    pub fn previous_tab(&mut self) {
        let base = if self.is_on(Screen::CoinDetail) { self.return_screen } else { self.current_screen };
        self.show(base.previous());
    }

    pub fn is_on(&self, screen: Screen) -> bool {
        self.current_screen == screen
    }

    /// Ouvre le détail d'un coin en mémorisant l'écran d'origine
    pub fn open_detail(&mut self, coin_id: impl Into<String>) {
        if !self.is_on(Screen::CoinDetail) {
            self.return_screen = self.current_screen;
        }
        self.detail_coin_id = Some(coin_id.into());
        self.converter_amount = 1.0;
        self.current_screen = Screen::CoinDetail;
        self.cancel_confirmations();
    }

    /// Ferme le détail ; retourne l'id du coin qui était affiché
    pub fn close_detail(&mut self) -> Option<String> {
        self.current_screen = self.return_screen;
        self.detail_coin_id.take()
    }

    // ========================================================================
    // Sélection
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Descend dans une liste de `len` lignes
    pub fn navigate_down(&mut self, len: usize) {
        let max_index = len.saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Ramène la sélection dans la liste (après une suppression par ex.)
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    // ========================================================================
    // Pagination (Markets)
    // ========================================================================

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    /// Va à une page (bornée à [1, pages])
    pub fn go_to_page(&mut self, page: usize, total: usize) {
        let pages = self.page_count(total).max(1);
        self.page = page.clamp(1, pages);
        self.selected_index = 0;
    }

    pub fn next_page(&mut self, total: usize) {
        self.go_to_page(self.page + 1, total);
    }

    pub fn previous_page(&mut self, total: usize) {
        self.go_to_page(self.page.saturating_sub(1), total);
    }

    /// Indices des coins visibles sur la page courante
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        let pages = self.page_count(total).max(1);
        let page = self.page.clamp(1, pages);
        let start = ((page - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Index absolu du coin sélectionné sur Markets
    pub fn selected_market_index(&self) -> usize {
        (self.page.max(1) - 1) * self.page_size + self.selected_index
    }

    pub fn cycle_change_filter(&mut self) {
        self.change_filter = self.change_filter.next();
    }

    // ========================================================================
    // Confirmations two-step
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    pub fn cancel_confirmations(&mut self) {
        self.confirm_quit = false;
        self.confirm_delete = false;
    }

    // ========================================================================
    // Messages
    // ========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // ========================================================================
    // Mode saisie
    // ========================================================================

    pub fn start_input(&mut self, kind: InputKind) {
        self.cancel_confirmations();
        self.input = Some(Input {
            kind,
            buffer: String::new(),
        });
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.input.is_some()
    }

    pub fn append_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    /// Valide l'étape de saisie courante
    ///
    /// Retourne Some(Submission) quand la saisie est complète. Une valeur
    /// invalide laisse l'utilisateur sur la même étape avec un message.
    pub fn submit_input(&mut self, crypto: &CryptoState) -> Option<Submission> {
        let Input { kind, buffer } = self.input.take()?;
        let value = buffer.trim().to_string();

        let retry = |app: &mut App, kind: InputKind, message: String| {
            app.set_status(message);
            app.input = Some(Input {
                kind,
                buffer: String::new(),
            });
            None
        };

        match kind {
            InputKind::LoginEmail => {
                if value.is_empty() {
                    return retry(self, InputKind::LoginEmail, "Email is required".to_string());
                }
                self.start_input(InputKind::LoginPassword { email: value });
                None
            }
            InputKind::LoginPassword { email } => Some(Submission::Login { email, password: buffer }),

            InputKind::RegisterName => {
                if value.is_empty() {
                    return retry(self, InputKind::RegisterName, "Name is required".to_string());
                }
                self.start_input(InputKind::RegisterEmail { name: value });
                None
            }
            InputKind::RegisterEmail { name } => {
                if value.is_empty() {
                    return retry(self, InputKind::RegisterEmail { name }, "Email is required".to_string());
                }
                self.start_input(InputKind::RegisterPassword { name, email: value });
                None
            }
            InputKind::RegisterPassword { name, email } => Some(Submission::Register {
                name,
                email,
                password: buffer,
            }),

            InputKind::PasswordResetEmail => Some(Submission::PasswordReset { email: value }),

            InputKind::PortfolioCoin => match crypto.coin_by_symbol(&value) {
                Some(coin) => {
                    self.start_input(InputKind::PortfolioAmount {
                        coin_id: coin.id.clone(),
                        symbol: coin.symbol.clone(),
                        price: coin.price,
                    });
                    None
                }
                None => retry(self, InputKind::PortfolioCoin, format!("Unknown coin '{}'", value)),
            },
            InputKind::PortfolioAmount { coin_id, symbol, price } => match parse_positive(&value) {
                Some(amount) => {
                    self.start_input(InputKind::PortfolioPrice {
                        coin_id,
                        symbol,
                        price,
                        amount,
                    });
                    None
                }
                None => retry(
                    self,
                    InputKind::PortfolioAmount { coin_id, symbol, price },
                    "Amount must be a positive number".to_string(),
                ),
            },
            InputKind::PortfolioPrice {
                coin_id,
                symbol,
                price,
                amount,
            } => {
                let avg_buy_price = if value.is_empty() { Some(price) } else { parse_positive(&value) };
                match avg_buy_price {
                    Some(avg_buy_price) => {
                        Some(Submission::AddPortfolioItem(PortfolioItem::new(coin_id, amount, avg_buy_price)))
                    }
                    None => retry(
                        self,
                        InputKind::PortfolioPrice {
                            coin_id,
                            symbol,
                            price,
                            amount,
                        },
                        "Price must be a positive number".to_string(),
                    ),
                }
            }

            InputKind::ConverterAmount => {
                match parse_positive(&value) {
                    Some(amount) => self.converter_amount = amount,
                    None => self.set_status("Amount must be a positive number"),
                }
                None
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::fixtures::coin;
    use crate::models::Theme;
    use crate::store::CryptoAction;
    use PageToken::{Ellipsis, Page};

    fn crypto() -> CryptoState {
        let mut state = CryptoState::new();
        state.reduce(CryptoAction::FetchCoinsFulfilled(vec![
            coin("bitcoin", 1, 64230.50),
            coin("ethereum", 2, 3450.20),
        ]));
        state
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.append_char(c);
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new(10);
        assert!(app.is_running());
        assert!(app.is_on(Screen::Markets));
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_navigation() {
        let mut app = App::default();
        app.navigate_down(3);
        app.navigate_down(3);
        app.navigate_down(3);
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);

        // Liste vide : reste à 0
        app.navigate_down(0);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_tabs_cycle_and_detail_returns() {
        let mut app = App::default();
        app.next_tab();
        assert!(app.is_on(Screen::Exchanges));
        app.previous_tab();
        app.previous_tab();
        assert!(app.is_on(Screen::Settings));

        app.show(Screen::Watchlist);
        app.open_detail("bitcoin");
        assert!(app.is_on(Screen::CoinDetail));
        assert_eq!(app.close_detail().as_deref(), Some("bitcoin"));
        assert!(app.is_on(Screen::Watchlist));
        assert!(app.detail_coin_id.is_none());
    }

    #[test]
    fn test_page_count_and_range() {
        let mut app = App::new(10);
        assert_eq!(app.page_count(35), 4);
        assert_eq!(app.page_count(0), 0);
        assert_eq!(app.visible_range(0), 0..0);

        app.go_to_page(4, 35);
        assert_eq!(app.visible_range(35), 30..35);
        app.next_page(35);
        assert_eq!(app.page, 4);

        app.navigate_down(5);
        assert_eq!(app.selected_market_index(), 31);

        app.go_to_page(0, 35);
        assert_eq!(app.page, 1);
        app.previous_page(35);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_page_tokens() {
        assert_eq!(page_tokens(1, 0), vec![]);
        assert_eq!(page_tokens(2, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
        assert_eq!(page_tokens(3, 7).len(), 7);

        assert_eq!(
            page_tokens(4, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_tokens(17, 20),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
        assert_eq!(
            page_tokens(10, 20),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_change_filter_cycle() {
        let mut filter = ChangeFilter::All;
        assert!(filter.shows(ChangeWindow::SevenDays));
        filter = filter.next();
        assert!(filter.shows(ChangeWindow::OneHour));
        assert!(!filter.shows(ChangeWindow::OneDay));
        assert_eq!(filter.next().next().next(), ChangeFilter::All);
    }

    #[test]
    fn test_settings_items() {
        let settings = UserSettings::default();

        let patch = SettingsItem::Theme.toggle_patch(&settings);
        assert_eq!(patch.theme, Some(Theme::Dark));

        let patch = SettingsItem::Currency.toggle_patch(&settings);
        assert_eq!(patch.currency.as_deref(), Some("EUR"));

        let patch = SettingsItem::Language.toggle_patch(&UserSettings {
            language: "es".to_string(),
            ..UserSettings::default()
        });
        assert_eq!(patch.language.as_deref(), Some("en"));

        let patch = SettingsItem::MarketingEmails.toggle_patch(&settings);
        let notifications = patch.notifications.unwrap();
        assert!(notifications.marketing_emails);
        assert_eq!(notifications.price_alerts, settings.notifications.price_alerts);

        assert_eq!(SettingsItem::Newsletter.value(&settings), "on");
    }

    #[test]
    fn test_portfolio_wizard() {
        let crypto = crypto();
        let mut app = App::default();
        app.start_input(InputKind::PortfolioCoin);

        // Symbole inconnu : on reste sur l'étape
        type_text(&mut app, "doge");
        assert_eq!(app.submit_input(&crypto), None);
        assert_eq!(app.input.as_ref().map(|i| &i.kind), Some(&InputKind::PortfolioCoin));
        assert!(app.status_message.is_some());

        type_text(&mut app, "ethereum");
        assert_eq!(app.submit_input(&crypto), None);

        type_text(&mut app, "-2");
        assert_eq!(app.submit_input(&crypto), None);
        type_text(&mut app, "2.5");
        assert_eq!(app.submit_input(&crypto), None);

        // Prix vide : prix courant
        let submission = app.submit_input(&crypto);
        match submission {
            Some(Submission::AddPortfolioItem(item)) => {
                assert_eq!(item.coin_id, "ethereum");
                assert_eq!(item.amount, 2.5);
                assert_eq!(item.avg_buy_price, 3450.20);
            }
            other => panic!("unexpected submission: {:?}", other),
        }
        assert!(!app.is_in_input_mode());
    }

    #[test]
    fn test_login_prompts() {
        let crypto = crypto();
        let mut app = App::default();
        app.start_input(InputKind::LoginEmail);
        type_text(&mut app, "me@example.com");
        assert_eq!(app.submit_input(&crypto), None);

        type_text(&mut app, "secret");
        assert_eq!(app.input.as_ref().map(|i| i.display()), Some("******".to_string()));
        assert_eq!(
            app.submit_input(&crypto),
            Some(Submission::Login {
                email: "me@example.com".to_string(),
                password: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_converter_amount() {
        let mut app = App::default();
        app.start_input(InputKind::ConverterAmount);
        type_text(&mut app, "0.25");
        assert_eq!(app.submit_input(&CryptoState::new()), None);
        assert_eq!(app.converter_amount, 0.25);
    }

    #[test]
    fn test_confirmations() {
        let mut app = App::default();
        app.request_quit();
        app.request_delete();
        assert!(app.is_awaiting_quit_confirmation());
        app.start_input(InputKind::LoginEmail);
        assert!(!app.is_awaiting_quit_confirmation());
        assert!(!app.is_awaiting_delete_confirmation());
        app.cancel_input();
        assert!(!app.is_in_input_mode());
    }
}

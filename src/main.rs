// ============================================================================
// CoinBoard - Point d'entrée
// ============================================================================
// Tableau de bord crypto dans le terminal : marchés, détail d'un coin,
// exchanges, communauté, watchlist, portfolio et réglages.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendu
// 3. Worker thread avec son propre runtime tokio (services mock + ticker)
// 4. Store partagé Arc<Mutex<Store>> : le worker écrit, l'UI lit
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use coinboard::api::{Services, UserService};
use coinboard::app::{App, InputKind, Screen, SettingsItem, Submission};
use coinboard::config::AppConfig;
use coinboard::storage::{FileStore, KeyValueStore, MemoryStore};
use coinboard::store::{lock, thunks, AuthAction, CryptoAction, SharedStore, Store, UserAction};
use coinboard::ticker::{run_ticker, MarketTicker, TickerConfig};
use coinboard::ui::{events::EventHandler, render, Event};

// ============================================================================
// AppCommand : Commandes pour le worker thread
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des commandes au worker thread
// - Le worker lance les thunks sur son runtime tokio
// - Les thunks écrivent directement dans le store partagé
// ============================================================================

#[derive(Debug, Clone)]
enum AppCommand {
    /// Coins + stats globales + highlights
    LoadMarket,
    FetchCoin(String),
    FetchExchanges,
    /// Posts + sujets tendance
    FetchCommunity,
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    PasswordReset { email: String },
    Logout,
}

/// Messages renvoyés à l'UI (affichés dans le footer)
#[derive(Debug, Clone)]
enum AppResult {
    Notice(String),
}

// ============================================================================
// Logging
// ============================================================================

/// Initialise le logging vers un fichier à rotation quotidienne
///
/// CONCEPT : Pas de log sur stdout
/// - Le terminal est en mode TUI, des lignes de log casseraient l'affichage
/// - Tout part dans log_dir/coinboard.log.AAAA-MM-JJ
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "coinboard.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: coinboard::store::thunks)
                .with_thread_ids(true) // Worker et UI tournent sur des threads différents
                .with_line_number(true),
        )
        .with(
            // RUST_LOG=coinboard=trace pour plus de détails
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinboard=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

/// Stockage local : fichiers JSON, ou mémoire si le répertoire est inutilisable
fn open_storage(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    match config.resolved_data_dir() {
        Some(dir) => match FileStore::open(&dir) {
            Ok(store) => {
                info!(dir = %dir.display(), "Stockage local ouvert");
                return Arc::new(store);
            }
            Err(e) => warn!(error = ?e, dir = %dir.display(), "Stockage local indisponible"),
        },
        None => warn!("Aucun répertoire de données trouvé"),
    }
    warn!("Les données ne seront pas conservées après la fermeture");
    Arc::new(MemoryStore::new())
}

fn main() -> Result<()> {
    // .env avant la configuration : il peut définir des COINBOARD_*
    let _ = dotenvy::dotenv();
    let config = AppConfig::load()?;

    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(?config, "CoinBoard starting up");

    let storage = open_storage(&config);
    let services = Services::new(storage.clone(), config.latency());
    let store = Store::new(UserService::new(storage)).into_shared();

    // Session persistée : synchrone, avant le premier rendu
    thunks::check_auth(&store, &services);

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, store.clone(), services, config.ticker_config());
    let _ = command_tx.send(AppCommand::LoadMarket);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new(config.page_size);
    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &store, &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Worker thread
// ============================================================================

/// Lance le worker : un thread OS qui possède un runtime tokio
///
/// CONCEPT RUST : Runtime per-thread
/// - L'UI reste synchrone (crossterm + ratatui)
/// - Chaque commande devient une tâche tokio : plusieurs requêtes peuvent
///   être en vol en même temps
/// - Le ticker tourne en tâche de fond sur ce même runtime
fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    store: SharedStore,
    services: Services,
    ticker: TickerConfig,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime");
                let _ = result_tx.send(AppResult::Notice("Background worker unavailable".to_string()));
                return;
            }
        };

        runtime.spawn(run_ticker(store.clone(), MarketTicker::new(ticker)));

        // Boucle de traitement des commandes
        // - recv() bloque ce thread, pas le runtime
        // - Quand l'UI ferme le channel, le runtime est détruit avec ses tâches
        while let Ok(command) = command_rx.recv() {
            info!(command = command_label(&command), "Worker received command");
            let store = store.clone();
            let services = services.clone();
            let result_tx = result_tx.clone();
            runtime.spawn(async move {
                if let Some(notice) = execute(command, &store, &services).await {
                    let _ = result_tx.send(AppResult::Notice(notice));
                }
            });
        }

        info!("Worker thread exiting (channel closed)");
    });
}

/// Nom de la commande pour les logs (sans les mots de passe)
fn command_label(command: &AppCommand) -> &'static str {
    match command {
        AppCommand::LoadMarket => "load_market",
        AppCommand::FetchCoin(_) => "fetch_coin",
        AppCommand::FetchExchanges => "fetch_exchanges",
        AppCommand::FetchCommunity => "fetch_community",
        AppCommand::Login { .. } => "login",
        AppCommand::Register { .. } => "register",
        AppCommand::PasswordReset { .. } => "password_reset",
        AppCommand::Logout => "logout",
    }
}

/// Exécute une commande ; retourne un message pour le footer si besoin
async fn execute(command: AppCommand, store: &SharedStore, services: &Services) -> Option<String> {
    match command {
        AppCommand::LoadMarket => {
            thunks::load_market(store, services).await;
            None
        }
        AppCommand::FetchCoin(id) => {
            thunks::fetch_coin_by_id(store, services, &id).await;
            None
        }
        AppCommand::FetchExchanges => {
            thunks::fetch_exchanges(store, services).await;
            None
        }
        AppCommand::FetchCommunity => {
            tokio::join!(
                thunks::fetch_posts(store, services),
                thunks::fetch_trending_topics(store, services)
            );
            None
        }
        AppCommand::Login { email, password } => {
            thunks::login(store, services, &email, &password).await;
            Some(session_notice(store, "Signed in"))
        }
        AppCommand::Register { name, email, password } => {
            thunks::register(store, services, &name, &email, &password).await;
            Some(session_notice(store, "Account created"))
        }
        AppCommand::PasswordReset { email } => {
            thunks::request_password_reset(store, services, &email).await;
            let state = lock(store);
            Some(match &state.auth.error {
                Some(error) => error.clone(),
                None => format!("Reset link sent to {}", email),
            })
        }
        AppCommand::Logout => {
            thunks::logout(store, services).await;
            Some("Signed out".to_string())
        }
    }
}

fn session_notice(store: &SharedStore, success: &str) -> String {
    let state = lock(store);
    match (&state.auth.user, &state.auth.error) {
        (Some(user), _) => format!("{} as {}", success, user.name),
        (None, Some(error)) => error.clone(),
        (None, None) => "Authentication failed".to_string(),
    }
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   1. Récupère les messages du worker
//   2. Dessine l'interface (lecture du store sous verrou)
//   3. Traite l'événement clavier
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &SharedStore,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    while app.is_running() {
        // CONCEPT : Non-blocking receive avec try_recv
        loop {
            match result_rx.try_recv() {
                Ok(AppResult::Notice(message)) => app.set_status(message),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected!");
                    break;
                }
            }
        }

        // Le verrou est relâché à la fin de la closure
        terminal.draw(|frame| {
            let state = lock(store);
            render(frame, app, &state);
        })?;

        match events.next() {
            Ok(event) => handle_event(app, store, event, &command_tx),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Helpers de l'event loop
// ============================================================================

/// Nombre de lignes sélectionnables sur l'écran courant
fn selectable_len(app: &App, store: &Store) -> usize {
    match app.current_screen {
        Screen::Markets => app.visible_range(store.crypto.coins.len()).len(),
        Screen::Exchanges => store.crypto.exchanges.len(),
        Screen::Community => store.community.posts.len(),
        Screen::Watchlist => store.crypto.watchlist_coins(&store.user.watchlist).count(),
        Screen::Portfolio => store.user.portfolio.len(),
        Screen::Settings => SettingsItem::ALL.len(),
        Screen::CoinDetail => 0,
    }
}

/// Coin visé par les actions 'w' et Enter
fn selected_coin_id(app: &App, store: &Store) -> Option<String> {
    match app.current_screen {
        Screen::Markets => store.crypto.coins.get(app.selected_market_index()).map(|c| c.id.clone()),
        Screen::Watchlist => store
            .crypto
            .watchlist_coins(&store.user.watchlist)
            .nth(app.selected_index)
            .map(|c| c.id.clone()),
        Screen::Portfolio => store.user.portfolio.get(app.selected_index).map(|p| p.coin_id.clone()),
        Screen::CoinDetail => app.detail_coin_id.clone(),
        _ => None,
    }
}

/// Quitte le détail : la sélection du store est effacée
fn leave_detail(app: &mut App, store: &SharedStore) {
    if app.is_on(Screen::CoinDetail) {
        app.close_detail();
        dispatch(app, store, CryptoAction::ClearSelectedCoin);
    }
}

/// Déclenche le chargement des données d'un onglet encore vide
fn ensure_loaded(app: &App, store: &SharedStore, command_tx: &mpsc::Sender<AppCommand>) {
    let state = lock(store);
    let command = match app.current_screen {
        Screen::Exchanges if state.crypto.exchanges.is_empty() && !state.crypto.exchanges_status.is_pending() => {
            Some(AppCommand::FetchExchanges)
        }
        Screen::Community if state.community.posts.is_empty() && !state.community.status.is_pending() => {
            Some(AppCommand::FetchCommunity)
        }
        _ => None,
    };
    drop(state);
    if let Some(command) = command {
        send(command_tx, command);
    }
}

/// Dispatch sous verrou ; une erreur de persistance s'affiche dans le footer
fn dispatch(app: &mut App, store: &SharedStore, action: impl Into<coinboard::store::Action>) {
    let result = lock(store).dispatch(action);
    if let Err(e) = result {
        error!(error = ?e, "Dispatch failed");
        app.set_status(format!("Error: {:#}", e));
    }
}

/// Ouvre un formulaire d'authentification sur un état vierge
///
/// L'erreur de la tentative précédente est effacée ; le formulaire de
/// reset repart aussi d'un statut idle.
fn start_auth_input(app: &mut App, store: &SharedStore, kind: InputKind) {
    let action = match kind {
        InputKind::PasswordResetEmail => AuthAction::ResetPasswordResetStatus,
        _ => AuthAction::ClearError,
    };
    dispatch(app, store, action);
    app.start_input(kind);
}

/// Esc en saisie : le formulaire et son message d'erreur disparaissent
fn cancel_input(app: &mut App, store: &SharedStore) {
    app.cancel_input();
    dispatch(app, store, AuthAction::ClearError);
}

fn send(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) {
    if command_tx.send(command).is_err() {
        error!("Worker channel closed, command dropped");
    }
}

/// Suppression confirmée : lot du portfolio ou entrée de la watchlist
fn delete_selected(app: &mut App, store: &SharedStore) {
    let action = {
        let state = lock(store);
        match app.current_screen {
            Screen::Portfolio => state
                .user
                .portfolio
                .get(app.selected_index)
                .map(|item| UserAction::RemovePortfolioItem(item.id.clone())),
            Screen::Watchlist => selected_coin_id(app, &state).map(UserAction::ToggleWatchlist),
            _ => None,
        }
    };
    if let Some(action) = action {
        info!(?action, "User confirmed delete");
        dispatch(app, store, action);
        let len = selectable_len(app, &lock(store));
        app.clamp_selection(len);
    }
}

/// Soumission complète d'un formulaire
fn handle_submission(
    app: &mut App,
    store: &SharedStore,
    submission: Submission,
    command_tx: &mpsc::Sender<AppCommand>,
) {
    match submission {
        Submission::Login { email, password } => {
            app.set_status("Signing in...");
            send(command_tx, AppCommand::Login { email, password });
        }
        Submission::Register { name, email, password } => {
            app.set_status("Creating account...");
            send(command_tx, AppCommand::Register { name, email, password });
        }
        Submission::PasswordReset { email } => {
            app.set_status("Sending reset link...");
            send(command_tx, AppCommand::PasswordReset { email });
        }
        Submission::AddPortfolioItem(item) => {
            info!(coin = %item.coin_id, amount = item.amount, "User added portfolio item");
            dispatch(app, store, UserAction::AddPortfolioItem(item));
        }
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode saisie passe avant tout le reste
/// - Les confirmations (quit, delete) sont annulées par toute autre touche
fn handle_event(app: &mut App, store: &SharedStore, event: Event, command_tx: &mpsc::Sender<AppCommand>) {
    use coinboard::ui::events::{
        get_char_from_event, get_tab_digit, is_add_event, is_backspace_event, is_backtab_event,
        is_char_event, is_delete_event, is_down_event, is_enter_event, is_escape_event,
        is_left_event, is_quit_event, is_right_event, is_space_event, is_tab_event,
        is_text_char_event, is_up_event,
    };

    if !matches!(event, Event::Key(_)) {
        return;
    }

    // ========================================
    // Mode saisie
    // ========================================
    if app.is_in_input_mode() {
        match event {
            _ if is_escape_event(&event) => {
                debug!("User cancelled input");
                cancel_input(app, store);
            }
            _ if is_enter_event(&event) => {
                let submission = {
                    let state = lock(store);
                    app.submit_input(&state.crypto)
                };
                if let Some(submission) = submission {
                    handle_submission(app, store, submission, command_tx);
                }
            }
            _ if is_backspace_event(&event) => app.backspace(),
            _ if is_text_char_event(&event) => {
                if let Some(c) = get_char_from_event(&event) {
                    app.append_char(c);
                }
            }
            _ => {}
        }
        return;
    }

    let screen = app.current_screen;
    let authenticated = lock(store).auth.is_authenticated;

    match event {
        // 'q' : confirmation en deux temps
        _ if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.cancel_delete();
                app.request_quit();
            }
        }
        _ if app.is_awaiting_quit_confirmation() => app.cancel_quit(),

        // 'd' : suppression en deux temps (portfolio, watchlist)
        _ if is_delete_event(&event) && matches!(screen, Screen::Portfolio | Screen::Watchlist) => {
            if app.is_awaiting_delete_confirmation() {
                app.cancel_delete();
                delete_selected(app, store);
            } else if selectable_len(app, &lock(store)) > 0 {
                info!("User requested delete (awaiting confirmation)");
                app.request_delete();
            }
        }
        _ if app.is_awaiting_delete_confirmation() => app.cancel_delete(),

        // Onglets
        _ if is_tab_event(&event) => {
            leave_detail(app, store);
            app.next_tab();
            ensure_loaded(app, store, command_tx);
        }
        _ if is_backtab_event(&event) => {
            leave_detail(app, store);
            app.previous_tab();
            ensure_loaded(app, store, command_tx);
        }
        _ if get_tab_digit(&event).is_some() => {
            if let Some(screen) = get_tab_digit(&event).and_then(|i| Screen::TABS.get(i).copied()) {
                leave_detail(app, store);
                app.show(screen);
                ensure_loaded(app, store, command_tx);
            }
        }

        // Sélection
        _ if is_up_event(&event) => app.navigate_up(),
        _ if is_down_event(&event) => {
            let len = selectable_len(app, &lock(store));
            app.navigate_down(len);
        }

        // Pagination du marché
        _ if is_left_event(&event) && screen == Screen::Markets => {
            let total = lock(store).crypto.coins.len();
            app.previous_page(total);
        }
        _ if is_right_event(&event) && screen == Screen::Markets => {
            let total = lock(store).crypto.coins.len();
            app.next_page(total);
        }

        // Enter : détail d'un coin, ou bascule d'un réglage
        _ if (is_enter_event(&event) || is_space_event(&event)) && screen == Screen::Settings => {
            if let Some(item) = SettingsItem::ALL.get(app.selected_index) {
                let patch = item.toggle_patch(&lock(store).user.settings);
                info!(setting = item.label(), "User toggled setting");
                dispatch(app, store, UserAction::UpdateSettings(patch));
            }
        }
        _ if is_enter_event(&event) && matches!(screen, Screen::Markets | Screen::Watchlist) => {
            let selected = selected_coin_id(app, &lock(store));
            if let Some(id) = selected {
                info!(coin = %id, "User opened coin detail");
                app.open_detail(id.clone());
                send(command_tx, AppCommand::FetchCoin(id));
            }
        }
        _ if is_escape_event(&event) => {
            if screen == Screen::CoinDetail {
                debug!("User left coin detail");
                leave_detail(app, store);
            } else {
                app.clear_status();
            }
        }

        // Watchlist
        _ if is_char_event(&event, 'w') => {
            // Verrou relâché avant le dispatch (Mutex non réentrant)
            let selected = selected_coin_id(app, &lock(store));
            if let Some(id) = selected {
                info!(coin = %id, "User toggled watchlist");
                dispatch(app, store, UserAction::ToggleWatchlist(id));
                let len = selectable_len(app, &lock(store));
                app.clamp_selection(len);
            }
        }
        _ if is_char_event(&event, 't') && matches!(screen, Screen::Markets | Screen::Watchlist) => {
            app.cycle_change_filter();
        }

        // Formulaires
        _ if is_add_event(&event) && screen == Screen::Portfolio => app.start_input(InputKind::PortfolioCoin),
        _ if is_char_event(&event, 'c') && screen == Screen::CoinDetail => {
            app.start_input(InputKind::ConverterAmount)
        }
        _ if is_char_event(&event, 'u') && screen == Screen::Settings => {
            if authenticated {
                send(command_tx, AppCommand::Logout);
            } else {
                start_auth_input(app, store, InputKind::LoginEmail);
            }
        }
        _ if is_char_event(&event, 'n') && screen == Screen::Settings && !authenticated => {
            start_auth_input(app, store, InputKind::RegisterName)
        }
        _ if is_char_event(&event, 'f') && screen == Screen::Settings && !authenticated => {
            start_auth_input(app, store, InputKind::PasswordResetEmail)
        }

        // Rafraîchissement
        _ if is_char_event(&event, 'r') => {
            let command = match screen {
                Screen::Exchanges => AppCommand::FetchExchanges,
                Screen::Community => AppCommand::FetchCommunity,
                Screen::CoinDetail => match app.detail_coin_id.clone() {
                    Some(id) => AppCommand::FetchCoin(id),
                    None => return,
                },
                _ => AppCommand::LoadMarket,
            };
            debug!(command = command_label(&command), "User requested refresh");
            send(command_tx, command);
        }

        _ => {}
    }
}

// ============================================================================
// Setup et Restore du Terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Raw mode : pas d'écho, pas de buffering ligne par ligne
    enable_raw_mode()?;

    // Alternate screen : l'écran précédent est restauré en sortie
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinboard::models::RequestStatus;

    fn shared_store() -> SharedStore {
        Store::new(UserService::new(Arc::new(MemoryStore::new()))).into_shared()
    }

    #[test]
    fn test_cancel_input_clears_auth_error() {
        let store = shared_store();
        let mut app = App::default();
        lock(&store).dispatch(AuthAction::LoginRejected("Invalid credentials".to_string())).unwrap();
        app.start_input(InputKind::LoginEmail);

        cancel_input(&mut app, &store);

        assert!(!app.is_in_input_mode());
        assert_eq!(lock(&store).auth.error, None);
    }

    #[test]
    fn test_password_reset_form_starts_idle() {
        let store = shared_store();
        let mut app = App::default();
        lock(&store).dispatch(AuthAction::PasswordResetFulfilled).unwrap();
        assert_eq!(lock(&store).auth.password_reset_status, RequestStatus::Succeeded);

        start_auth_input(&mut app, &store, InputKind::PasswordResetEmail);

        assert!(app.is_in_input_mode());
        assert_eq!(lock(&store).auth.password_reset_status, RequestStatus::Idle);
    }

    #[test]
    fn test_login_form_clears_previous_error() {
        let store = shared_store();
        let mut app = App::default();
        lock(&store).dispatch(AuthAction::RegisterRejected("Email already exists".to_string())).unwrap();

        start_auth_input(&mut app, &store, InputKind::LoginEmail);

        assert_eq!(lock(&store).auth.error, None);
        assert_eq!(app.input.as_ref().map(|input| input.kind.clone()), Some(InputKind::LoginEmail));
    }
}

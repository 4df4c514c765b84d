// ============================================================================
// Dashboard - Rendu de l'interface
// ============================================================================
// Dessine l'interface TUI avec les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones (header, contenu, footer)
// 3. Widgets : Block, Paragraph, Table, Tabs, Sparkline
// 4. Rendu "immédiat" : tout est redessiné à chaque frame depuis l'état
//
// Le rendu ne fait que LIRE App et Store, il ne modifie rien.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table, TableState, Tabs, Wrap},
    Frame,
};

use crate::app::{page_tokens, App, PageToken, Screen, SettingsItem};
use crate::models::{ChangeWindow, Coin, HistoricalPoint, MarketHighlights, RequestStatus, Theme};
use crate::store::Store;
use crate::ui::format::{format_compact, format_currency, format_percent, format_price, format_signed_currency};

// ============================================================================
// Palette (dépend du thème)
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Palette {
    accent: Color,
    text: Color,
    muted: Color,
    up: Color,
    down: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: Color::Cyan,
                text: Color::White,
                muted: Color::Gray,
                up: Color::Green,
                down: Color::Red,
            },
            Theme::Dark => Self {
                accent: Color::Magenta,
                text: Color::Gray,
                muted: Color::DarkGray,
                up: Color::LightGreen,
                down: Color::LightRed,
            },
        }
    }

    fn change(&self, value: f64) -> Style {
        Style::default().fg(if value >= 0.0 { self.up } else { self.down })
    }

    fn block<'a>(&self, title: impl Into<Line<'a>>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(title)
    }

    fn key(&self) -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App, store: &Store) {
    let palette = Palette::for_theme(store.theme());
    let chunks = create_layout(frame.size());

    render_header(frame, app, store, &palette, chunks[0]);

    match app.current_screen {
        Screen::Markets => render_markets(frame, app, store, &palette, chunks[1]),
        Screen::CoinDetail => render_coin_detail(frame, app, store, &palette, chunks[1]),
        Screen::Exchanges => render_exchanges(frame, app, store, &palette, chunks[1]),
        Screen::Community => render_community(frame, app, store, &palette, chunks[1]),
        Screen::Watchlist => render_watchlist(frame, app, store, &palette, chunks[1]),
        Screen::Portfolio => render_portfolio(frame, app, store, &palette, chunks[1]),
        Screen::Settings => render_settings(frame, app, store, &palette, chunks[1]),
    }

    render_footer(frame, app, store, &palette, chunks[2]);
}

/// Header, contenu, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header : stats globales + onglets
            Constraint::Min(0),    // Contenu
            Constraint::Length(4), // Footer : message + raccourcis
        ])
        .split(area)
        .to_vec()
}

/// Message centré dans un bloc (chargement, liste vide, erreur)
fn render_message(frame: &mut Frame, block: Block, message: &str, style: Style, area: Rect) {
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(message.to_string(), style))])
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Le chargement n'est affiché que tant qu'il n'y a rien d'autre à montrer
fn is_loading(status: RequestStatus, is_empty: bool) -> bool {
    is_empty && matches!(status, RequestStatus::Idle | RequestStatus::Loading)
}

// ============================================================================
// Header : stats globales + onglets
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let block = palette.block(" CoinBoard ").title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let mut stats = match &store.crypto.global_stats {
        Some(stats) => Line::from(vec![
            Span::styled("Cryptos: ", Style::default().fg(palette.muted)),
            Span::raw(format!("{}  ", stats.active_cryptos)),
            Span::styled("Market Cap: ", Style::default().fg(palette.muted)),
            Span::raw(format!("{}  ", format_currency(stats.total_market_cap, 0))),
            Span::styled("24h Vol: ", Style::default().fg(palette.muted)),
            Span::raw(format!("{}  ", format_currency(stats.total_volume_24h, 0))),
            Span::styled("Dominance: ", Style::default().fg(palette.muted)),
            Span::raw(format!("BTC {:.1}%  ETH {:.1}%", stats.btc_dominance, stats.eth_dominance)),
        ]),
        None => Line::from(Span::styled("Loading market stats...", Style::default().fg(palette.muted))),
    };

    let session = match &store.auth.user {
        Some(user) => format!("  [{}]", user.name),
        None => "  [guest]".to_string(),
    };
    stats.spans.push(Span::styled(session, Style::default().fg(palette.accent)));
    frame.render_widget(Paragraph::new(stats).alignment(Alignment::Center), rows[0]);

    let titles: Vec<Line> = Screen::TABS
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{} {}", i + 1, screen.label())))
        .collect();
    let selected = Screen::TABS.iter().position(|s| *s == app.current_screen);
    let tabs = Tabs::new(titles)
        .select(selected.unwrap_or(usize::MAX))
        .style(Style::default().fg(palette.text))
        .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .divider("|");
    frame.render_widget(tabs, rows[1]);
}

// ============================================================================
// Markets
// ============================================================================

fn render_markets(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_highlights(frame, store.crypto.highlights.as_ref(), palette, chunks[0]);

    let crypto = &store.crypto;
    let title = format!(" Cryptocurrencies  [{}] ", app.change_filter.label());
    let block = palette.block(title);

    if is_loading(crypto.status, crypto.coins.is_empty()) {
        render_message(frame, block, "Loading coins...", Style::default().fg(palette.muted), chunks[1]);
        return;
    }
    if crypto.coins.is_empty() {
        let message = crypto.error.as_deref().unwrap_or("No coins available");
        render_message(frame, block, message, Style::default().fg(palette.down), chunks[1]);
        return;
    }

    let range = app.visible_range(crypto.coins.len());
    let coins = &crypto.coins[range];
    render_coin_table(frame, app, store, coins, palette, block, chunks[1]);

    let pages = app.page_count(crypto.coins.len());
    let mut spans = vec![Span::styled("Page ", Style::default().fg(palette.muted))];
    for token in page_tokens(app.page, pages) {
        match token {
            PageToken::Page(page) if page == app.page => spans.push(Span::styled(
                format!(" {} ", page),
                Style::default().fg(palette.accent).add_modifier(Modifier::REVERSED | Modifier::BOLD),
            )),
            PageToken::Page(page) => spans.push(Span::raw(format!(" {} ", page))),
            PageToken::Ellipsis => spans.push(Span::styled(" … ", Style::default().fg(palette.muted))),
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), chunks[2]);
}

/// Tableau de coins partagé par Markets et Watchlist
fn render_coin_table(
    frame: &mut Frame,
    app: &App,
    store: &Store,
    coins: &[Coin],
    palette: &Palette,
    block: Block,
    area: Rect,
) {
    let windows: Vec<ChangeWindow> = [ChangeWindow::OneHour, ChangeWindow::OneDay, ChangeWindow::SevenDays]
        .into_iter()
        .filter(|w| app.change_filter.shows(*w))
        .collect();

    let mut header = vec!["", "#", "Name", "Price"];
    header.extend(windows.iter().map(|w| w.label()));
    header.extend(["Market Cap", "Volume (24h)", "Supply"]);

    let rows: Vec<Row> = coins
        .iter()
        .map(|coin| {
            let star = if store.user.is_watched(&coin.id) { "★" } else { "☆" };
            let mut cells = vec![
                Cell::from(star).style(Style::default().fg(Color::Yellow)),
                Cell::from(coin.rank.to_string()),
                Cell::from(format!("{} {}", coin.name, coin.symbol)),
                Cell::from(format_price(coin.price)),
            ];
            for window in &windows {
                let change = coin.percent_change(*window);
                cells.push(Cell::from(format_percent(change)).style(palette.change(change)));
            }
            cells.push(Cell::from(format_currency(coin.market_cap, 0)));
            cells.push(Cell::from(format_currency(coin.volume_24h, 0)));
            cells.push(Cell::from(format!("{} {}", format_compact(coin.circulating_supply), coin.symbol)));
            Row::new(cells).style(Style::default().fg(palette.text))
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(14),
    ];
    widths.extend(windows.iter().map(|_| Constraint::Length(10)));
    widths.extend([Constraint::Length(20), Constraint::Length(18), Constraint::Length(14)]);

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)))
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Cinq cartes : market cap, index, fear & greed, altcoin season, RSI
fn render_highlights(frame: &mut Frame, highlights: Option<&MarketHighlights>, palette: &Palette, area: Rect) {
    let Some(h) = highlights else {
        render_message(
            frame,
            palette.block(" Highlights "),
            "Loading highlights...",
            Style::default().fg(palette.muted),
            area,
        );
        return;
    };

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let card = |title: &'static str, value: String, detail: Line<'static>| {
        Paragraph::new(vec![Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))), detail])
            .block(palette.block(title))
            .alignment(Alignment::Center)
    };

    frame.render_widget(
        card(
            " Market Cap ",
            format_compact(h.market_cap.value),
            Line::from(Span::styled(format!("{:+.2}%", h.market_cap.change), palette.change(h.market_cap.change))),
        ),
        cards[0],
    );
    frame.render_widget(
        card(
            " CMC100 ",
            format!("{:.2}", h.top_index.value),
            Line::from(Span::styled(format!("{:+.2}%", h.top_index.change), palette.change(h.top_index.change))),
        ),
        cards[1],
    );
    frame.render_widget(
        card(
            " Fear & Greed ",
            format!("{:.0}", h.fear_and_greed.value),
            Line::from(h.fear_and_greed.sentiment.clone()),
        ),
        cards[2],
    );
    frame.render_widget(
        card(
            " Altcoin Season ",
            format!("{:.0}/100", h.altcoin_season.value),
            Line::from(h.altcoin_season.status.clone()),
        ),
        cards[3],
    );
    frame.render_widget(
        card(
            " Crypto RSI ",
            format!("{:.2}", h.crypto_rsi.value),
            Line::from(h.crypto_rsi.status.clone()),
        ),
        cards[4],
    );
}

// ============================================================================
// Détail d'un coin
// ============================================================================

/// Normalise un historique de prix pour le widget Sparkline (u64)
fn sparkline_data(history: &[HistoricalPoint]) -> Vec<u64> {
    let min = history.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = history.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);
    history
        .iter()
        .map(|p| (((p.price - min) / span) * 100.0).round() as u64 + 1)
        .collect()
}

fn render_coin_detail(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let crypto = &store.crypto;
    let block = palette.block(" Coin ");

    let Some(coin) = crypto.selected_coin.as_ref() else {
        let (message, color) = match crypto.detail_status {
            RequestStatus::Failed => (
                crypto.error.clone().unwrap_or_else(|| "Failed to load coin".to_string()),
                palette.down,
            ),
            RequestStatus::Succeeded => (
                format!("Coin '{}' not found", app.detail_coin_id.as_deref().unwrap_or("?")),
                palette.muted,
            ),
            _ => ("Loading coin...".to_string(), palette.muted),
        };
        render_message(frame, block, &message, Style::default().fg(color), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(5), Constraint::Length(4)])
        .split(area);

    let star = if store.user.is_watched(&coin.id) { "★ watched" } else { "☆ not watched" };
    let muted = Style::default().fg(palette.muted);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("#{} {} ({})  ", coin.rank, coin.name, coin.symbol), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(star, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(format_price(coin.price), Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format_percent(coin.percent_change_24h), palette.change(coin.percent_change_24h)),
            Span::styled(" (24h)", muted),
        ]),
        Line::from(vec![
            Span::styled("1h ", muted),
            Span::styled(format_percent(coin.percent_change_1h), palette.change(coin.percent_change_1h)),
            Span::styled("   7d ", muted),
            Span::styled(format_percent(coin.percent_change_7d), palette.change(coin.percent_change_7d)),
        ]),
        Line::from(vec![Span::styled("Market Cap      ", muted), Span::raw(format_price(coin.market_cap))]),
        Line::from(vec![Span::styled("Volume (24h)    ", muted), Span::raw(format_price(coin.volume_24h))]),
        Line::from(vec![
            Span::styled("Circulating     ", muted),
            Span::raw(format!("{} {}", format_compact(coin.circulating_supply), coin.symbol)),
        ]),
    ];
    if !coin.tags.is_empty() {
        lines.push(Line::from(vec![Span::styled("Tags            ", muted), Span::raw(coin.tags.join(", "))]));
    }
    if let Some(description) = &coin.description {
        lines.push(Line::from(Span::styled(description.clone(), muted)));
    }
    let info = Paragraph::new(lines)
        .block(palette.block(format!(" {} ", coin.name)))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, chunks[0]);

    let data = sparkline_data(&coin.history);
    let sparkline = Sparkline::default()
        .block(palette.block(format!(" Price history ({} days) ", coin.history.len().saturating_sub(1))))
        .data(&data)
        .style(palette.change(coin.percent_change_7d));
    frame.render_widget(sparkline, chunks[1]);

    let usd = coin.to_usd(app.converter_amount);
    let converter = Paragraph::new(vec![
        Line::from(format!("{} {} = {}", app.converter_amount, coin.symbol, format_price(usd))),
        Line::from(Span::styled(
            format!("{} = {:.6} {}", format_price(1000.0), coin.from_usd(1000.0), coin.symbol),
            muted,
        )),
    ])
    .block(palette.block(" Converter "));
    frame.render_widget(converter, chunks[2]);
}

// ============================================================================
// Exchanges
// ============================================================================

fn render_exchanges(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let crypto = &store.crypto;
    let block = palette.block(" Top Cryptocurrency Spot Exchanges ");

    if is_loading(crypto.exchanges_status, crypto.exchanges.is_empty()) {
        render_message(frame, block, "Loading exchanges...", Style::default().fg(palette.muted), area);
        return;
    }
    if crypto.exchanges.is_empty() {
        let message = crypto.error.as_deref().unwrap_or("No exchanges available");
        render_message(frame, block, message, Style::default().fg(palette.down), area);
        return;
    }

    let rows: Vec<Row> = crypto
        .exchanges
        .iter()
        .map(|exchange| {
            Row::new(vec![
                Cell::from(exchange.rank.to_string()),
                Cell::from(exchange.name.clone()),
                Cell::from(format!("{:.1}", exchange.score)),
                Cell::from(format_currency(exchange.volume_24h, 0)),
                Cell::from(format_compact(exchange.avg_liquidity)),
                Cell::from(format_compact(exchange.weekly_visits as f64)),
                Cell::from(exchange.markets.to_string()),
                Cell::from(exchange.coins.to_string()),
                Cell::from(exchange.fiat_list()),
            ])
            .style(Style::default().fg(palette.text))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Min(14),
    ];
    let header = Row::new(["#", "Exchange", "Score", "Volume (24h)", "Liquidity", "Visits", "Markets", "Coins", "Fiat"])
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

// ============================================================================
// Community
// ============================================================================

fn render_community(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let community = &store.community;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let block = palette.block(" Community ");
    if is_loading(community.status, community.posts.is_empty()) {
        render_message(frame, block, "Loading posts...", Style::default().fg(palette.muted), chunks[0]);
    } else if community.posts.is_empty() {
        let message = community.error.as_deref().unwrap_or("No posts yet");
        render_message(frame, block, message, Style::default().fg(palette.muted), chunks[0]);
    } else {
        let mut lines = Vec::new();
        for (index, post) in community.posts.iter().enumerate() {
            let selected = index == app.selected_index;
            let name_style = if selected {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            };
            let verified = if post.author.is_verified { " ✔" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}", post.author.name, verified), name_style),
                Span::styled(format!(" {} · {}", post.author.handle, post.timestamp), Style::default().fg(palette.muted)),
            ]));
            lines.push(Line::from(Span::styled(post.content.clone(), Style::default().fg(palette.text))));
            if post.image.is_some() {
                lines.push(Line::from(Span::styled("[image]", Style::default().fg(palette.muted))));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "♥ {}  💬 {}  ⟳ {}   {}",
                    format_compact(post.likes as f64),
                    format_compact(post.comments as f64),
                    format_compact(post.reposts as f64),
                    post.coins.iter().map(|c| format!("${}", c)).collect::<Vec<_>>().join(" "),
                ),
                Style::default().fg(palette.muted),
            )));
            lines.push(Line::from(""));
        }
        let feed = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(feed, chunks[0]);
    }

    let topics: Vec<Line> = community
        .trending_topics
        .iter()
        .map(|topic| {
            let marker = if topic.is_trending { "🔥 " } else { "   " };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(topic.name.clone(), Style::default().fg(palette.text)),
                Span::styled(format!("  {} posts", format_compact(topic.posts_count as f64)), Style::default().fg(palette.muted)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(topics).block(palette.block(" Trending ")), chunks[1]);
}

// ============================================================================
// Watchlist
// ============================================================================

fn render_watchlist(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let block = palette.block(" ★ Watchlist ");
    let coins: Vec<Coin> = store.crypto.watchlist_coins(&store.user.watchlist).cloned().collect();

    if is_loading(store.crypto.status, store.crypto.coins.is_empty()) {
        render_message(frame, block, "Loading coins...", Style::default().fg(palette.muted), area);
        return;
    }
    if coins.is_empty() {
        render_message(
            frame,
            block,
            "Your watchlist is empty. Press [w] on a coin to watch it.",
            Style::default().fg(palette.muted),
            area,
        );
        return;
    }
    render_coin_table(frame, app, store, &coins, palette, block, area);
}

// ============================================================================
// Portfolio
// ============================================================================

fn render_portfolio(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let summary = store.portfolio_summary();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let totals = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Balance  ", Style::default().fg(palette.muted)),
            Span::styled(format_price(summary.total_balance), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Profit   ", Style::default().fg(palette.muted)),
            Span::styled(
                format!(
                    "{} ({})",
                    format_signed_currency(summary.total_profit),
                    format_percent(summary.total_profit_percent)
                ),
                palette.change(summary.total_profit),
            ),
            Span::styled(format!("   cost {}", format_price(summary.total_cost)), Style::default().fg(palette.muted)),
        ]),
    ])
    .block(palette.block(" My Portfolio "));
    frame.render_widget(totals, chunks[0]);

    let block = palette.block(" Holdings ");
    if summary.positions.is_empty() {
        render_message(
            frame,
            block,
            "No holdings yet. Press [a] to add a transaction.",
            Style::default().fg(palette.muted),
            chunks[1],
        );
        return;
    }

    let rows: Vec<Row> = summary
        .positions
        .iter()
        .map(|position| {
            let name = match (&position.coin_name, &position.coin_symbol) {
                (Some(name), Some(symbol)) => format!("{} {}", name, symbol),
                _ => position.item.coin_id.clone(),
            };
            Row::new(vec![
                Cell::from(name),
                Cell::from(format_price(position.current_price)),
                Cell::from(format!("{}", position.item.amount)),
                Cell::from(format_price(position.item.avg_buy_price)),
                Cell::from(format_price(position.current_value)),
                Cell::from(format!(
                    "{} ({:.2}%)",
                    format_signed_currency(position.profit),
                    position.profit_percent
                ))
                .style(palette.change(position.profit)),
            ])
            .style(Style::default().fg(palette.text))
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Min(22),
    ];
    let header = Row::new(["Asset", "Price", "Holdings", "Avg. Buy", "Value", "Profit/Loss"])
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}

// ============================================================================
// Settings
// ============================================================================

fn render_settings(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let settings = &store.user.settings;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let rows: Vec<Row> = SettingsItem::ALL
        .iter()
        .map(|item| {
            Row::new(vec![Cell::from(item.label()), Cell::from(item.value(settings))])
                .style(Style::default().fg(palette.text))
        })
        .collect();
    let table = Table::new(rows, [Constraint::Min(18), Constraint::Length(10)])
        .block(palette.block(" Preferences "))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, chunks[0], &mut state);

    let muted = Style::default().fg(palette.muted);
    let mut lines = vec![
        Line::from(vec![Span::styled("Name      ", muted), Span::raw(settings.display_name.clone())]),
        Line::from(vec![Span::styled("Email     ", muted), Span::raw(settings.email.clone())]),
        Line::from(vec![
            Span::styled("2FA       ", muted),
            Span::raw(if settings.security.two_factor_enabled { "enabled" } else { "disabled" }),
        ]),
        Line::from(vec![
            Span::styled("Password  ", muted),
            Span::raw(format!("changed {}", settings.security.last_password_change)),
        ]),
        Line::from(""),
    ];

    let auth = &store.auth;
    match &auth.user {
        Some(user) => lines.push(Line::from(vec![
            Span::styled("Signed in ", muted),
            Span::styled(format!("{} <{}>", user.name, user.email), Style::default().fg(palette.up)),
        ])),
        None => lines.push(Line::from(Span::styled("Not signed in", muted))),
    }
    if auth.status.is_pending() {
        lines.push(Line::from(Span::styled("Signing in...", muted)));
    }
    match auth.password_reset_status {
        RequestStatus::Loading => lines.push(Line::from(Span::styled("Sending reset link...", muted))),
        RequestStatus::Succeeded => {
            lines.push(Line::from(Span::styled("Reset link sent, check your inbox", Style::default().fg(palette.up))))
        }
        _ => {}
    }
    if let Some(error) = &auth.error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(palette.down))));
    }

    frame.render_widget(
        Paragraph::new(lines).block(palette.block(" Account ")).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

// ============================================================================
// Footer : saisie, confirmations, raccourcis
// ============================================================================

fn shortcuts_for(screen: Screen, authenticated: bool) -> Vec<(&'static str, &'static str)> {
    let mut keys = vec![("q", "Quit"), ("Tab/1-6", "Screens"), ("↑↓", "Move")];
    match screen {
        Screen::Markets => keys.extend([("←→", "Page"), ("Enter", "Details"), ("w", "Watch"), ("t", "Columns")]),
        Screen::CoinDetail => keys.extend([("Esc", "Back"), ("w", "Watch"), ("c", "Convert")]),
        Screen::Watchlist => keys.extend([("Enter", "Details"), ("d", "Remove")]),
        Screen::Portfolio => keys.extend([("a", "Add"), ("d", "Delete")]),
        Screen::Settings => {
            keys.push(("Enter", "Toggle"));
            if authenticated {
                keys.push(("u", "Logout"));
            } else {
                keys.extend([("u", "Login"), ("n", "Register"), ("f", "Reset password")]);
            }
        }
        Screen::Exchanges | Screen::Community => {}
    }
    keys.push(("r", "Refresh"));
    keys
}

fn render_footer(frame: &mut Frame, app: &App, store: &Store, palette: &Palette, area: Rect) {
    let block = palette.block("");

    if let Some(input) = &app.input {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let input_line = Line::from(vec![
            Span::styled(input.kind.prompt(), Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
            Span::raw(input.display()),
            Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        let help_line = Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Confirm  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel  "),
            Span::styled(app.status_message.clone().unwrap_or_default(), Style::default().fg(palette.down)),
        ]);
        frame.render_widget(Paragraph::new(vec![input_line, help_line]).block(block), area);
        return;
    }

    let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let blink = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);

    let first_line = if app.is_awaiting_delete_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", warning),
            Span::styled("[d]", blink),
            Span::styled(" à nouveau pour supprimer, ou autre touche pour annuler ⚠", warning),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", warning),
            Span::styled("[q]", blink),
            Span::styled(" à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠", warning),
        ])
    } else {
        Line::from(Span::styled(
            app.status_message.clone().unwrap_or_default(),
            Style::default().fg(palette.text),
        ))
    };

    let mut spans = Vec::new();
    for (key, label) in shortcuts_for(app.current_screen, store.auth.is_authenticated) {
        spans.push(Span::styled(format!("[{}]", key), palette.key()));
        spans.push(Span::raw(format!(" {}  ", label)));
    }

    let paragraph = Paragraph::new(vec![first_line, Line::from(spans)])
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::models::coin::fixtures::coin;
    use crate::models::market::fixtures::highlights;
    use crate::store::{fixtures, CryptoAction};

    fn draw(app: &App, store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|frame| render(frame, app, store)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_sparkline_data_is_normalized() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let history: Vec<HistoricalPoint> = [10.0, 20.0, 15.0]
            .iter()
            .map(|&price| HistoricalPoint { date: day, price })
            .collect();
        assert_eq!(sparkline_data(&history), vec![1, 101, 51]);
        assert!(sparkline_data(&[]).is_empty());
    }

    #[test]
    fn test_render_every_screen() {
        let mut store = fixtures::store();
        store
            .dispatch(CryptoAction::FetchCoinsFulfilled(vec![coin("bitcoin", 1, 64230.5)]))
            .unwrap();
        store.dispatch(CryptoAction::FetchHighlightsFulfilled(highlights())).unwrap();

        let mut app = App::default();
        let markets = draw(&app, &store);
        assert!(markets.contains("$64,230.50"));
        assert!(markets.contains("Fear"));

        for screen in Screen::TABS {
            app.show(screen);
            draw(&app, &store);
        }

        app.open_detail("bitcoin");
        assert!(draw(&app, &store).contains("Loading coin"));
    }

    #[test]
    fn test_shortcuts_follow_session() {
        let guest = shortcuts_for(Screen::Settings, false);
        assert!(guest.contains(&("u", "Login")));
        let member = shortcuts_for(Screen::Settings, true);
        assert!(member.contains(&("u", "Logout")));
    }
}

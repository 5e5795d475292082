//! TUI Dashboard using ratatui.

use chrono::{DateTime, Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use trading_core::format::format_price;
use trading_core::types::{SignalKind, Timeframe};
use trading_signals::{InstrumentReport, PassReport, SignalRationale, Thresholds};

/// What the dashboard draws on each tick.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub timeframe: Timeframe,
    /// Latest pass; `None` until the first one completes
    pub report: Option<PassReport>,
    pub thresholds: Thresholds,
    pub rsi_period: usize,
}

/// Color for a signal cell.
pub fn signal_color(signal: SignalKind) -> Color {
    match signal {
        SignalKind::StrongBuy => Color::LightGreen,
        SignalKind::Buy => Color::Cyan,
        SignalKind::Overbought => Color::LightRed,
        SignalKind::Hold => Color::Gray,
        SignalKind::Unavailable | SignalKind::Error => Color::White,
    }
}

fn price_cell(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), format_price)
}

fn rsi_cell(record: &InstrumentReport) -> String {
    match record.snapshot.and_then(|s| s.rsi) {
        Some(rsi) => format!("{rsi:.2}"),
        None => "-".to_string(),
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
    table: TableState,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self {
            refresh_ms,
            table: TableState::default().with_selected(Some(0)),
        }
    }

    /// Index of the highlighted row.
    pub fn selected(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }

    /// Run the dashboard until the user quits.
    pub fn run<F>(&mut self, mut get_state: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut get_state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<F>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        get_state: &mut F,
    ) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        loop {
            let state = get_state();
            let rows = state.report.as_ref().map_or(0, |r| r.records.len());
            terminal.draw(|f| self.ui(f, &state))?;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        // Raw mode swallows SIGINT
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Down | KeyCode::Char('j') => self.select_next(rows),
                        KeyCode::Up | KeyCode::Char('k') => self.select_previous(rows),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Move the highlight down, wrapping at the end.
    pub fn select_next(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        self.table.select(Some((self.selected() + 1) % rows));
    }

    /// Move the highlight up, wrapping at the start.
    pub fn select_previous(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        let current = self.selected().min(rows - 1);
        self.table.select(Some((current + rows - 1) % rows));
    }

    /// Draw one frame.
    pub fn ui(&mut self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Min(8),     // Signals
                Constraint::Length(10), // Rationale
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);

        match &state.report {
            Some(report) if report.critical_failure => {
                self.render_critical(frame, chunks[1].union(chunks[2]))
            }
            Some(report) => {
                self.render_signals(frame, chunks[1], state, report);
                self.render_rationale(frame, chunks[2], state, report);
            }
            None => {
                let waiting = Paragraph::new(format!(
                    "Analyzing futures on the {} timeframe...",
                    state.timeframe.label()
                ))
                .block(Block::default().borders(Borders::ALL).title("Signals"));
                frame.render_widget(waiting, chunks[1].union(chunks[2]));
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let mut spans = vec![
            Span::styled(
                "Futures Signal Monitor",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(state.timeframe.label(), Style::default().fg(Color::Cyan)),
        ];

        if let Some(report) = &state.report {
            spans.push(Span::raw(format!(
                " | Last refreshed: {}",
                local_time(report.finished_at)
            )));
            spans.push(Span::raw(format!(
                " | Next in {} min",
                report.next_refresh_in.as_secs() / 60
            )));
        }
        spans.push(Span::raw(" | ↑/↓ select, 'q' to quit"));

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("System"));
        frame.render_widget(header, area);
    }

    fn render_critical(&self, frame: &mut Frame, area: Rect) {
        let notice = Paragraph::new(
            "Could not fetch data from Binance for ANY coin. This could be a temporary \
             widespread API issue or an IP block. Waiting for the next refresh cycle.",
        )
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Critical"),
        );
        frame.render_widget(notice, area);
    }

    fn render_signals(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &DashboardState,
        report: &PassReport,
    ) {
        let rsi_header = format!("RSI ({})", state.rsi_period);
        let header_cells = ["Coin", "Price", rsi_header.as_str(), "Signal"]
            .into_iter()
            .map(|h| Cell::from(h.to_string()).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = report.records.iter().map(|record| {
            Row::new(vec![
                Cell::from(record.symbol.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(price_cell(record.price)),
                Cell::from(rsi_cell(record)),
                Cell::from(record.signal.label()).style(
                    Style::default()
                        .fg(signal_color(record.signal))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(20),
                Constraint::Percentage(30),
            ],
        )
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Signals (pass {}, {} failed)",
            report.pass,
            report.failed_count()
        )));

        frame.render_stateful_widget(table, area, &mut self.table);
    }

    fn render_rationale(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &DashboardState,
        report: &PassReport,
    ) {
        let block = Block::default().borders(Borders::ALL).title("Signal Rationale");

        let Some(record) = report.records.get(self.selected()) else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let lines = match record
            .snapshot
            .and_then(|s| SignalRationale::from_snapshot(&s, &state.thresholds))
        {
            Some(r) => rationale_lines(&record.symbol, &r, &state.thresholds),
            None => vec![Line::from(format!(
                "{}: {}",
                record.symbol,
                record
                    .error
                    .as_deref()
                    .unwrap_or("Not enough candles for indicators yet")
            ))],
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn rationale_lines(symbol: &str, r: &SignalRationale, t: &Thresholds) -> Vec<Line<'static>> {
    let check = |ok: bool| {
        if ok {
            Span::styled("✔ ", Style::default().fg(Color::Green))
        } else {
            Span::styled("✘ ", Style::default().fg(Color::Red))
        }
    };

    vec![
        Line::from(Span::styled(
            symbol.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            check(r.rsi_below_buy),
            Span::raw(format!("RSI {:.2} < {}", r.rsi, t.buy_rsi)),
        ]),
        Line::from(vec![
            check(r.price_above_fast),
            Span::raw(format!("Price {:.4} > SMA fast {:.4}", r.price, r.sma_fast)),
        ]),
        Line::from(vec![
            check(r.fast_above_slow),
            Span::raw(format!(
                "SMA fast {:.4} > SMA slow {:.4} (strong buy also needs RSI < {})",
                r.sma_fast, r.sma_slow, t.strong_buy_rsi
            )),
        ]),
    ]
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use trading_core::types::IndicatorSnapshot;

    fn record(symbol: &str, signal: SignalKind, rsi: Option<f64>) -> InstrumentReport {
        let snapshot = rsi.map(|rsi| IndicatorSnapshot {
            open_time: 0,
            price: 100.0,
            rsi: Some(rsi),
            sma_fast: Some(99.0),
            sma_slow: Some(98.0),
        });
        InstrumentReport {
            symbol: symbol.to_string(),
            price: Some(100.0),
            snapshot,
            signal,
            fetched: signal != SignalKind::Error,
            notified: false,
            error: None,
        }
    }

    fn state(records: Vec<InstrumentReport>, critical: bool) -> DashboardState {
        DashboardState {
            timeframe: Timeframe::Hour1,
            report: Some(PassReport {
                pass: 3,
                timeframe: Timeframe::Hour1,
                started_at: Utc::now(),
                finished_at: Utc::now(),
                records,
                critical_failure: critical,
                next_refresh_in: Duration::from_secs(300),
            }),
            thresholds: Thresholds::default(),
            rsi_period: 14,
        }
    }

    fn draw(dashboard: &mut Dashboard, state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| dashboard.ui(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_signal_colors() {
        assert_eq!(signal_color(SignalKind::Buy), Color::Cyan);
        assert_eq!(signal_color(SignalKind::StrongBuy), Color::LightGreen);
        assert_eq!(signal_color(SignalKind::Overbought), Color::LightRed);
        assert_eq!(signal_color(SignalKind::Hold), Color::Gray);
    }

    #[test]
    fn test_table_renders_rows() {
        let mut dashboard = Dashboard::new(250);
        let screen = draw(
            &mut dashboard,
            &state(
                vec![
                    record("BTCUSDT", SignalKind::StrongBuy, Some(25.5)),
                    record("ETHUSDT", SignalKind::Error, None),
                ],
                false,
            ),
        );

        assert!(screen.contains("RSI (14)"));
        assert!(screen.contains("BTCUSDT"));
        assert!(screen.contains("STRONG BUY"));
        assert!(screen.contains("25.50"));
        assert!(screen.contains("$100.00"));
        assert!(screen.contains("Signal Rationale"));
    }

    #[test]
    fn test_critical_notice_replaces_table() {
        let mut dashboard = Dashboard::new(250);
        let screen = draw(
            &mut dashboard,
            &state(vec![record("BTCUSDT", SignalKind::Error, None)], true),
        );

        assert!(screen.contains("Could not fetch data"));
        assert!(!screen.contains("RSI (14)"));
    }

    #[test]
    fn test_waiting_before_first_pass() {
        let mut dashboard = Dashboard::new(250);
        let screen = draw(&mut dashboard, &DashboardState::default());
        assert!(screen.contains("Analyzing futures"));
    }

    #[test]
    fn test_selection_wraps() {
        let mut dashboard = Dashboard::new(250);
        assert_eq!(dashboard.selected(), 0);

        dashboard.select_previous(3);
        assert_eq!(dashboard.selected(), 2);
        dashboard.select_next(3);
        assert_eq!(dashboard.selected(), 0);
        dashboard.select_next(3);
        assert_eq!(dashboard.selected(), 1);

        dashboard.select_next(0);
        assert_eq!(dashboard.selected(), 1);
    }

    #[test]
    fn test_price_and_rsi_cells() {
        assert_eq!(price_cell(Some(37050.456)), "$37,050.46");
        assert_eq!(price_cell(Some(1234567.899)), "$1,234,567.90");
        assert_eq!(price_cell(None), "-");
        assert_eq!(rsi_cell(&record("X", SignalKind::Error, None)), "-");
    }
}

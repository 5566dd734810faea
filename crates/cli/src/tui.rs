//! Interactive terminal front end for the recommender view.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mood_types::ContractError;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use recommender_view::theme::{BRAND_COLOR, ERROR_COLOR};
use recommender_view::{BodyView, RecommenderView, ResultContent, ResultView, Rgb, ViewModel};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const EMPTY_TEXT_NOTICE: &str = "Please describe your mood first.";

pub struct TuiApp {
    view: RecommenderView,
    notice: Option<String>,
    tick: usize,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(view: RecommenderView) -> Self {
        Self {
            view,
            notice: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn view(&self) -> &RecommenderView {
        &self.view
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.view.toggle_clustering(),
            KeyCode::Backspace => self.view.pop_char(),
            KeyCode::Char(c) if !ctrl => {
                self.notice = None;
                self.view.push_char(c);
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        // Same as a disabled button: nothing happens while loading
        if !self.view.state().submit_enabled() {
            return;
        }
        match self.view.submit() {
            Ok(_) => self.notice = None,
            Err(ContractError::EmptyUserText) => self.notice = Some(EMPTY_TEXT_NOTICE.to_string()),
            Err(err) => self.notice = Some(err.to_string()),
        }
    }
}

pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> Result<()> {
    loop {
        app.view.poll_events();
        terminal.draw(|frame| draw(frame, app))?;

        if app.should_quit {
            break;
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        app.tick = app.tick.wrapping_add(1);
    }

    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn draw(frame: &mut Frame, app: &TuiApp) {
    let model = app.view.render();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(frame.size());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            model.header.title,
            Style::default().fg(color(BRAND_COLOR)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(model.header.subtitle, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(header, chunks[0]);

    let input_text = if model.form.user_text.is_empty() {
        Span::styled(model.form.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(model.form.user_text.as_str())
    };
    let input_block = Block::default()
        .title("How are you feeling?")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(
        Paragraph::new(Line::from(input_text))
            .block(input_block)
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    frame.render_widget(Paragraph::new(form_controls(&model, app.notice.as_deref())), chunks[2]);

    let body_block = Block::default().title("Recommendations").borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(body_text(&model, app.tick))
            .block(body_block)
            .wrap(Wrap { trim: false }),
        chunks[3],
    );

    let status = app
        .view
        .service_status()
        .map(str::to_string)
        .unwrap_or_else(|| "Checking service...".to_string());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(status, Style::default().fg(Color::DarkGray)),
            Span::styled("  ·  Tab: clustering  Enter: submit  Esc: quit", Style::default().fg(Color::DarkGray)),
        ])),
        chunks[4],
    );
}

fn form_controls<'a>(model: &'a ViewModel, notice: Option<&'a str>) -> Text<'a> {
    let checkbox = if model.form.use_clustering { "[x]" } else { "[ ]" };
    let clustering = Line::from(vec![
        Span::styled(checkbox, Style::default().fg(color(BRAND_COLOR))),
        Span::raw(" "),
        Span::raw(model.form.clustering_label),
    ]);

    let submit_style = if model.form.submit_enabled {
        Style::default()
            .fg(Color::White)
            .bg(color(BRAND_COLOR))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut submit = vec![Span::styled(format!(" {} ", model.form.submit_label), submit_style)];
    if let Some(notice) = notice {
        submit.push(Span::raw("  "));
        submit.push(Span::styled(notice, Style::default().fg(Color::Yellow)));
    }

    Text::from(vec![clustering, Line::from(submit)])
}

fn body_text(model: &ViewModel, tick: usize) -> Text<'_> {
    match &model.body {
        BodyView::Blank => Text::from(Line::from(Span::styled(
            "Results will appear here.",
            Style::default().fg(Color::DarkGray),
        ))),
        BodyView::Loading { caption } => {
            let spinner = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
            Text::from(vec![
                Line::from(Span::styled(spinner, Style::default().fg(color(BRAND_COLOR)))),
                Line::from(Span::styled(*caption, Style::default().fg(Color::Gray))),
            ])
        }
        BodyView::Error { message } => Text::from(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(color(ERROR_COLOR)),
        ))),
        BodyView::Result(result) => result_text(result),
    }
}

fn result_text(result: &ResultView) -> Text<'_> {
    let badge = &result.badge;
    let mut lines = vec![
        Line::from(Span::styled(
            badge.heading(),
            Style::default().fg(color(badge.accent)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("artwork: {}", badge.image_url),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    match &result.content {
        ResultContent::NoRecommendations { message } => {
            lines.push(Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(color(ERROR_COLOR)).add_modifier(Modifier::BOLD),
            )));
        }
        ResultContent::Songs(rows) => {
            for row in rows {
                lines.push(Line::from(vec![
                    Span::styled("♪ ", Style::default().fg(color(BRAND_COLOR))),
                    Span::styled(row.heading(), Style::default().add_modifier(Modifier::BOLD)),
                ]));
                let artist = match &row.language {
                    Some(language) => format!("   {} ({})", row.artist, language),
                    None => format!("   {}", row.artist),
                };
                lines.push(Line::from(Span::styled(artist, Style::default().fg(Color::Gray))));
            }
        }
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mood_client::{RecommendationService, Result as ClientResult};
    use mood_types::{HealthStatus, RecommendationResult, RequestPayload, Song};
    use ratatui::backend::TestBackend;
    use recommender_view::Phase;
    use std::sync::Arc;

    struct CannedService;

    #[async_trait]
    impl RecommendationService for CannedService {
        async fn recommend(&self, _payload: RequestPayload) -> ClientResult<RecommendationResult> {
            Ok(RecommendationResult {
                emotion: "happy".to_string(),
                recommendations: vec![Song::new("Good as Hell", "Lizzo"), Song::new("Dynamite", "BTS")],
                message: None,
            })
        }

        async fn health(&self) -> ClientResult<HealthStatus> {
            Ok(HealthStatus { status: "healthy".to_string(), message: None })
        }
    }

    fn app() -> TuiApp {
        TuiApp::new(RecommenderView::new(Arc::new(CannedService)))
    }

    fn press(app: &mut TuiApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn enter_with_empty_text_shows_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.view().phase(), Phase::Idle);
        assert_eq!(app.notice.as_deref(), Some(EMPTY_TEXT_NOTICE));
        assert!(screen(&app).contains(EMPTY_TEXT_NOTICE));
    }

    #[tokio::test]
    async fn typing_and_toggling() {
        let mut app = app();
        for c in "blue".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Tab);

        assert_eq!(app.view().state().user_text(), "blu");
        assert!(!app.view().state().use_clustering());
        let screen = screen(&app);
        assert!(screen.contains("[ ] Use advanced clustering"));
        assert!(screen.contains("blu"));
    }

    #[tokio::test]
    async fn submit_then_render_results() {
        let mut app = app();
        for c in "on top of the world".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view().phase(), Phase::Submitting);
        assert!(screen(&app).contains("Analyzing your mood"));

        // A second Enter while loading is ignored
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view.state().latest_ticket().map(|t| t.id()), Some(1));

        assert_eq!(app.view.wait_until_settled().await, Phase::Success);
        let screen = screen(&app);
        assert!(screen.contains("Detected Mood: Happy"));
        assert!(screen.contains("1. Good as Hell"));
        assert!(screen.contains("2. Dynamite"));
    }

    #[test]
    fn escape_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}

//! Ratatui-based interactive form.
//!
//! A single screen: a profile panel with five fixed-choice selectors and a
//! results panel. Each submission runs one synchronous encode→predict cycle
//! against the shared read-only bundle; there is no background work.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};
use tracing::info;

use crate::encoder::FeatureEncoder;
use crate::metrics::PipelineMetrics;
use crate::models::bundle::ModelBundle;
use crate::models::inference::predict_all;
use crate::types::prediction::{PredictionResult, ScoreBand, ScoreBandThresholds};
use crate::types::profile::{AgeBracket, IncomeBracket, Profile, RaceCode, SchoolType, StateCode};

/// Start the interactive form.
pub fn run(
    bundle: &ModelBundle,
    encoder: &FeatureEncoder,
    thresholds: &ScoreBandThresholds,
    metrics: &PipelineMetrics,
) -> Result<()> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;

    let mut app = App::new(bundle, encoder, thresholds, metrics);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(anyhow::anyhow!("failed to enter alternate screen: {e}"));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

const FIELD_COUNT: usize = 5;

struct App<'a> {
    bundle: &'a ModelBundle,
    encoder: &'a FeatureEncoder,
    thresholds: &'a ScoreBandThresholds,
    metrics: &'a PipelineMetrics,
    profile: Profile,
    selected_field: usize,
    result: Option<PredictionResult>,
    status: String,
}

impl<'a> App<'a> {
    fn new(
        bundle: &'a ModelBundle,
        encoder: &'a FeatureEncoder,
        thresholds: &'a ScoreBandThresholds,
        metrics: &'a PipelineMetrics,
    ) -> Self {
        Self {
            bundle,
            encoder,
            thresholds,
            metrics,
            profile: Profile::default(),
            selected_field: 0,
            result: None,
            status: "Preencha o perfil e pressione Enter para simular.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .context("terminal draw error")?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100)).context("event poll error")? {
                continue;
            }

            match event::read().context("event read error")? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter | KeyCode::Char('s') => self.simulate(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => self.profile.age = cycle(&AgeBracket::ALL, self.profile.age, delta),
            1 => self.profile.school = cycle(&SchoolType::ALL, self.profile.school, delta),
            2 => self.profile.race = cycle(&RaceCode::ALL, self.profile.race, delta),
            3 => self.profile.state = cycle(&StateCode::ALL, self.profile.state, delta),
            4 => self.profile.income = cycle(&IncomeBracket::ALL, self.profile.income, delta),
            _ => {}
        }
    }

    /// One synchronous encode→predict cycle for the current profile.
    fn simulate(&mut self) {
        let start = Instant::now();
        let features = self.encoder.encode(&self.profile, &self.bundle.scaler);

        match predict_all(&features, self.bundle, self.thresholds) {
            Ok(result) => {
                self.metrics.record_prediction(start.elapsed(), &result);
                info!(
                    request_id = %result.request_id,
                    average = result.average,
                    "Prediction served"
                );
                self.status = format!("Notas simuladas (média {:.1}).", result.average);
                self.result = Some(result);
            }
            Err(err) => {
                // The whole batch fails: never show a partial result.
                self.metrics.record_failure();
                self.result = None;
                self.status = format!("Erro: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("Simulador ENEM", Style::default().fg(Color::Cyan)),
                Span::raw(" — notas previstas a partir do seu perfil"),
            ]),
            Line::from(Span::styled(
                format!(
                    "modelos: {} | colunas de treino: {}",
                    self.bundle.model_count(),
                    self.encoder.width(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(0)])
            .split(area);

        self.draw_profile(frame, chunks[0]);
        self.draw_results(frame, chunks[1]);
    }

    fn draw_profile(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Idade: {}", self.profile.age.label())),
            ListItem::new(format!("Tipo de Escola: {}", self.profile.school.label())),
            ListItem::new(format!("Cor/Raça: {}", self.profile.race.label())),
            ListItem::new(format!("Estado: {}", self.profile.state.label())),
            ListItem::new(format!("Renda Familiar: {}", self.profile.income.label())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Perfil").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Notas Previstas")
            .borders(Borders::ALL);

        let Some(result) = &self.result else {
            let hint = Paragraph::new("Sem simulação ainda.")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(hint, area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        for subject_score in &result.scores {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<18}", subject_score.subject.name())),
                Span::styled(
                    format!("{:>6.1}", subject_score.score),
                    Style::default().fg(band_color(subject_score.band)),
                ),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw(format!("{:<18}", "Média Geral")),
            Span::styled(
                format!("{:>6.1}", result.average),
                Style::default()
                    .fg(band_color(result.average_band))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            band_message(result.average_band),
            Style::default().fg(band_color(result.average_band)),
        )));

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ campo  ←/→ valor  Enter simular  q sair";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i32) -> T {
    let len = all.len() as i32;
    let index = all.iter().position(|v| *v == current).unwrap_or(0) as i32;
    all[(index + delta).rem_euclid(len) as usize]
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Good => Color::Cyan,
        ScoreBand::NeedsImprovement => Color::Yellow,
    }
}

fn band_message(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Excellent => "Excelente! Notas muito boas para universidades concorridas.",
        ScoreBand::Good => "Bom desempenho! Você tem chances em várias universidades.",
        ScoreBand::NeedsImprovement => "Continue estudando! Há potencial para melhorar.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle(&StateCode::ALL, StateCode::Go, 1), StateCode::Sp);
        assert_eq!(cycle(&StateCode::ALL, StateCode::Sp, -1), StateCode::Go);
        assert_eq!(cycle(&SchoolType::ALL, SchoolType::Public, 1), SchoolType::Private);
    }

    #[test]
    fn test_band_messages_cover_all_bands() {
        assert!(band_message(ScoreBand::Excellent).starts_with("Excelente"));
        assert!(band_message(ScoreBand::Good).starts_with("Bom"));
        assert!(band_message(ScoreBand::NeedsImprovement).starts_with("Continue"));
    }
}

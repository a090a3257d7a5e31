//! Display sinks: the terminal preview and a headless log.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glowgrid_animations::DisplaySink;
use glowgrid_core::{GRID_HEIGHT, GRID_WIDTH, NormalizedFrame};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::{debug, info};

/// One LED, two terminal columns wide so it comes out roughly square.
const LED: &str = "██";

/// Draws every frame into the terminal as a grid of truecolor blocks.
pub struct TerminalSink {
    terminal: DefaultTerminal,
    width: usize,
    height: usize,
}

impl TerminalSink {
    pub fn new(terminal: DefaultTerminal) -> Self {
        Self {
            terminal,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }

    fn draw(&mut self, grid: &NormalizedFrame) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, grid))?;
        Ok(())
    }
}

impl DisplaySink for TerminalSink {
    type Error = color_eyre::Report;

    fn show(&mut self, frame: &NormalizedFrame) -> color_eyre::Result<()> {
        self.width = frame.width();
        self.height = frame.height();
        Ok(self.draw(frame)?)
    }

    fn clear(&mut self) -> color_eyre::Result<()> {
        let cleared = NormalizedFrame::cleared(self.width, self.height);
        Ok(self.draw(&cleared)?)
    }
}

/// Renders the LED grid centered, with the key help underneath.
fn render(frame: &mut Frame, grid: &NormalizedFrame) {
    let brightness = grid.brightness();
    let leds: Vec<Line> = grid
        .rows()
        .map(|row| {
            row.iter()
                .map(|px| {
                    let lit = px.scaled(brightness);
                    Span::styled(LED, Style::new().fg(Color::Rgb(lit.0, lit.1, lit.2)))
                })
                .collect::<Vec<_>>()
                .into()
        })
        .collect();

    let [_, middle, _, footer] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(grid.height() as u16 + 2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [_, centre, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(grid.width() as u16 * 2 + 2),
        Constraint::Fill(1),
    ])
    .areas(middle);

    let panel = Paragraph::new(leds)
        .alignment(Alignment::Center)
        .block(Block::bordered().title(" glowgrid ").dark_gray());
    frame.render_widget(panel, centre);

    let help = Line::from(vec![
        "q".bold(),
        " quit  ".dark_gray(),
        format!("brightness {brightness:.2}").dark_gray(),
    ])
    .centered();
    frame.render_widget(help, footer);
}

/// Drain pending terminal events and report whether a quit key was pressed.
pub fn quit_requested() -> io::Result<bool> {
    let mut quit = false;
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => quit |= is_quit_key(key),
            _ => {}
        }
    }
    Ok(quit)
}

fn is_quit_key(key: KeyEvent) -> bool {
    matches!(
        (key.modifiers, key.code),
        (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C'))
    )
}

/// Logs a summary of every frame instead of drawing it.
#[derive(Debug, Default)]
pub struct LogSink {
    frames: u64,
}

impl LogSink {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DisplaySink for LogSink {
    type Error = color_eyre::Report;

    fn show(&mut self, frame: &NormalizedFrame) -> color_eyre::Result<()> {
        self.frames += 1;
        debug!(
            frame = self.frames,
            brightness = frame.brightness(),
            max_channel_sum = frame.max_channel_sum(),
            "frame"
        );
        Ok(())
    }

    fn clear(&mut self) -> color_eyre::Result<()> {
        info!(frames = self.frames, "display cleared");
        Ok(())
    }
}

//! Sound board UI: pick a cue, hear it.

use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    DefaultTerminal, Frame,
};
use saavy_sfx::{engine::lifecycle::ContextState, Cue, SoundEngine};

/// Lines of trigger history kept on screen
const HISTORY_LEN: usize = 6;

pub struct SoundBoard {
    engine: SoundEngine,
    list_state: ListState,
    history: VecDeque<String>,
    should_quit: bool,
}

impl SoundBoard {
    pub fn new(engine: SoundEngine) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            engine,
            list_state,
            history: VecDeque::with_capacity(HISTORY_LEN),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            // ~60fps so the pending counter stays live
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_mute(),
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                self.list_state.select(Some(index));
                self.trigger(Cue::ALL[index]);
            }
            KeyCode::Up => self.list_state.select_previous(),
            KeyCode::Down => self.list_state.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(cue) = self.selected() {
                    self.trigger(cue);
                }
            }
            _ => {}
        }
    }

    fn selected(&self) -> Option<Cue> {
        self.list_state
            .selected()
            .and_then(|i| Cue::ALL.get(i).copied())
    }

    fn trigger(&mut self, cue: Cue) {
        self.engine.play(cue);

        let note = if self.engine.is_muted() {
            format!("{cue} (muted)")
        } else if cue == Cue::RotatingHacker {
            format!("{cue} → variant {}", self.engine.rotation_index())
        } else {
            cue.to_string()
        };
        self.log(note);
    }

    /// Click first, then mute, so the toggle itself is audible.
    fn toggle_mute(&mut self) {
        if self.engine.is_muted() {
            self.engine.set_muted(false);
            self.log("unmuted".to_string());
        } else {
            self.engine.play_click();
            self.engine.set_muted(true);
            self.log("muted".to_string());
        }
    }

    fn log(&mut self, line: String) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(line);
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                       // Status bar
                Constraint::Min(10),                         // Cue list
                Constraint::Length(HISTORY_LEN as u16 + 2),  // History
                Constraint::Length(1),                       // Help bar
            ])
            .split(frame.area());

        self.render_status(frame, chunks[0]);
        self.render_cues(frame, chunks[1]);
        self.render_history(frame, chunks[2]);

        let help = Paragraph::new(" [1-8] Play  [↑↓/Enter] Select  [M] Mute  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let (output, output_color) = match self.engine.context_state() {
            ContextState::Ready => ("output ready", Color::Green),
            ContextState::Uninitialized => ("output idle", Color::Yellow),
            ContextState::Unavailable => ("no audio output", Color::Red),
        };
        let (mute, mute_color) = if self.engine.is_muted() {
            ("🔇 muted", Color::Yellow)
        } else {
            ("🔊 sound on", Color::Cyan)
        };

        let line = Line::from(vec![
            Span::styled(format!(" {output}  "), Style::default().fg(output_color)),
            Span::styled(format!("{mute}  "), Style::default().fg(mute_color)),
            Span::styled(
                format!("rotation {}  ", self.engine.rotation_index()),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("pending {}", self.engine.pending()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let status = Paragraph::new(line).block(
            Block::default().title(" saavy-sfx ").borders(Borders::ALL),
        );
        frame.render_widget(status, area);
    }

    fn render_cues(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Cue::ALL
            .iter()
            .enumerate()
            .map(|(i, cue)| {
                let steps = match cue.steps().len() {
                    0 => "rotating, 1/s".to_string(),
                    1 => "1 step".to_string(),
                    n => format!("{n} steps"),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Cyan)),
                    Span::raw(format!("{:<20}", cue.name())),
                    Span::styled(steps, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(" Cues ").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .history
            .iter()
            .map(|entry| Line::from(format!(" {entry}")))
            .collect();

        let history = Paragraph::new(lines)
            .block(Block::default().title(" Played ").borders(Borders::ALL));
        frame.render_widget(history, area);
    }
}

//! The application shell: event loop, input dispatch, rendering.

use anyhow::Result;
use crossterm::event::{self as term_event, Event as TermEvent, KeyCode, KeyEventKind};
use fable_core::{PcgRng, Session};
use fable_runtime::{RuntimeError, RuntimeHandle};
use ratatui::layout::{Constraint, Direction, Layout};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{self, Duration};
use tracing::{debug, warn};

use crate::menu::{self, MenuEntry, Screen};
use crate::terminal::Tui;
use crate::widgets;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Per-binary presentation options.
#[derive(Clone, Copy, Debug)]
pub struct AppOptions {
    pub title: &'static str,
    /// Draw the world as a positioned map canvas instead of a plain list.
    pub show_map: bool,
}

pub struct App {
    handle: RuntimeHandle,
    /// Latest session snapshot; the single source of truth for rendering.
    view: Session<PcgRng>,
    options: AppOptions,
    screen: Screen,
    cursor: usize,
    /// Last surfaced rule rejection, shown until the next action.
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    pub async fn new(handle: RuntimeHandle, options: AppOptions) -> Result<Self> {
        let view = handle.snapshot().await?;
        Ok(Self {
            handle,
            view,
            options,
            screen: Screen::Main,
            cursor: 0,
            notice: None,
            should_quit: false,
        })
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = self.handle.subscribe_events();
        self.render(terminal)?;

        while !self.should_quit {
            tokio::select! {
                result = events.recv() => match result {
                    Ok(event) => {
                        debug!(?event, "session event");
                        self.refresh().await?;
                        self.render(terminal)?;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "dropped stale session events");
                        self.refresh().await?;
                        self.render(terminal)?;
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = time::sleep(FRAME_INTERVAL) => {
                    if self.handle_input_tick().await? {
                        self.render(terminal)?;
                    }
                }
            }
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        self.view = self.handle.snapshot().await?;
        self.clamp_cursor();
        Ok(())
    }

    /// Poll for keyboard input; returns whether a redraw is needed.
    async fn handle_input_tick(&mut self) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }
        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                    KeyCode::Char('t') | KeyCode::Tab => self.toggle_screen(),
                    KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
                    KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
                    KeyCode::Enter | KeyCode::Char(' ') => self.activate().await?,
                    _ => return Ok(false),
                }
                Ok(true)
            }
            TermEvent::Resize(_, _) => Ok(true),
            _ => Ok(false),
        }
    }

    fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::SkillTree,
            Screen::SkillTree => Screen::Main,
        };
        self.cursor = 0;
    }

    fn entries(&self) -> Vec<MenuEntry> {
        menu::entries(&self.view, self.screen)
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.entries().len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    fn clamp_cursor(&mut self) {
        let len = self.entries().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Apply the selected entry's command through the runtime.
    async fn activate(&mut self) -> Result<()> {
        let entries = self.entries();
        let Some(entry) = entries.get(self.cursor) else {
            return Ok(());
        };
        if !entry.enabled {
            return Ok(());
        }
        self.notice = None;
        match self.handle.apply(entry.command).await {
            Ok(_) => self.refresh().await?,
            Err(RuntimeError::Core(err)) if err.is_silent() => {
                debug!(%err, "command rejected");
            }
            Err(RuntimeError::Core(err)) => {
                self.notice = Some(err.to_string());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let entries = self.entries();
        terminal.draw(|frame| {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(30)])
                .split(frame.area());

            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(13), Constraint::Min(5)])
                .split(columns[0]);

            widgets::stats::render(frame, left[0], &self.view);
            widgets::menu_panel::render(
                frame,
                left[1],
                &self.view,
                self.screen,
                &entries,
                self.cursor,
                self.notice.as_deref(),
            );

            match self.screen {
                Screen::SkillTree => {
                    widgets::skill_tree::render(frame, columns[1], &self.view);
                }
                Screen::Main if self.options.show_map => {
                    let right = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Min(10), Constraint::Length(12)])
                        .split(columns[1]);
                    widgets::map::render(frame, right[0], &self.view, self.options.title);
                    widgets::journal::render(frame, right[1], &self.view);
                }
                Screen::Main => {
                    widgets::journal::render(frame, columns[1], &self.view);
                }
            }
        })?;
        Ok(())
    }
}

// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Every visual group gets one strip: a row of columns, each standing for a bucket of frames of
//! that trial. Clicking or dragging over a strip picks the first visible element of the frame
//! under the pointer, which stands in for a ray hit in the 3D view.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::config::KeyBindings;
use crate::model::{ElementHandle, GroupKind, LocalFrame, TrialOrdinal};
use crate::palette::TrialTheme;
use crate::select::SelectionMode;
use crate::session::{CycleReport, InputCycle, LinkedSession, SessionError};

const LABEL_WIDTH: u16 = 18;
const SLIDER_PAGE: f32 = 10.0;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const MASKED_COLOR: Color = Color::DarkGray;
const SLIDER_COLOR: Color = Color::Yellow;

/// Runs the interactive terminal UI until the quit key is pressed.
pub fn run(session: LinkedSession, keys: KeyBindings) -> io::Result<()> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, keys);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let header_area = layout[0];
    let strips_area = layout[1];
    let status_area = layout[2];

    frame.render_widget(Paragraph::new(header_line(app)), header_area);

    let block = Block::default().borders(Borders::ALL).title(" Trials ");
    let inner = block.inner(strips_area);
    frame.render_widget(block, strips_area);

    app.strips = strip_rows(inner, &app.session);
    for row in &app.strips {
        let line = strip_line(&app.session, row);
        frame.render_widget(Paragraph::new(line), Rect::new(inner.x, row.y, inner.width, 1));
    }

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    frame.render_widget(Paragraph::new(footer_help_line(&app.keys, &toast_suffix)), status_area);
}

// Header, strip, and footer rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Screen placement of one group strip, as of the last draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StripRow {
    trial: TrialOrdinal,
    kind: GroupKind,
    frame_count: usize,
    y: u16,
    /// First column of the frame cells.
    x: u16,
    width: u16,
}

impl StripRow {
    fn frame_at(&self, column: u16) -> Option<LocalFrame> {
        if column < self.x || column >= self.x + self.width || self.frame_count == 0 {
            return None;
        }
        let (start, _) = column_frames(column - self.x, self.width, self.frame_count);
        Some(LocalFrame::new(start))
    }
}

struct App {
    session: LinkedSession,
    keys: KeyBindings,
    strips: Vec<StripRow>,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(session: LinkedSession, keys: KeyBindings) -> Self {
        Self { session, keys, strips: Vec::new(), toast: None, should_quit: false }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.move_slider(-1.0),
            KeyCode::Right => self.move_slider(1.0),
            KeyCode::PageDown => self.move_slider(-SLIDER_PAGE),
            KeyCode::PageUp => self.move_slider(SLIDER_PAGE),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(ch) => self.handle_char(ch),
            _ => {}
        }
    }

    fn handle_char(&mut self, ch: char) {
        let keys = self.keys;
        if ch == keys.quit {
            self.should_quit = true;
        } else if ch == keys.click {
            self.set_mode(SelectionMode::Click);
        } else if ch == keys.brush {
            self.set_mode(SelectionMode::Brush);
        } else if ch == keys.slider {
            self.set_mode(SelectionMode::SliderRange);
        } else if ch == keys.clear {
            self.step(InputCycle { clear_pressed: true, ..InputCycle::default() });
        } else if ch == keys.alt {
            self.step(InputCycle { alt_pressed: true, ..InputCycle::default() });
        } else if ch == keys.mask {
            let result = self.session.mask_highlighted();
            self.report_masking("Masked", result);
        } else if ch == keys.unmask {
            let result = self.session.unmask_all();
            self.report_masking("Unmasked", result);
        } else if ch == keys.separate {
            if self.session.is_separated() {
                self.session.unseparate_trials();
                self.set_toast("Trials joined");
            } else {
                self.session.separate_trials();
                self.set_toast("Trials separated");
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (primary_down, brush_held) = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => (true, true),
            MouseEventKind::Drag(MouseButton::Left) => (false, true),
            _ => return,
        };
        let pick = self.pick_at(mouse.column, mouse.row);
        self.step(InputCycle { primary_down, brush_held, pick, ..InputCycle::default() });
    }

    fn pick_at(&self, column: u16, row: u16) -> Option<ElementHandle> {
        let strip = self.strips.iter().find(|strip| strip.y == row)?;
        let frame = strip.frame_at(column)?;
        self.session.element_at(strip.trial, strip.kind, frame)
    }

    fn set_mode(&mut self, mode: SelectionMode) {
        self.session.set_mode(mode);
        self.set_toast(format!("Mode: {mode}"));
    }

    fn move_slider(&mut self, delta: f32) {
        self.session.nudge_slider(delta);
        self.step(InputCycle::default());
    }

    fn step(&mut self, input: InputCycle) -> CycleReport {
        let report = self.session.step(&input);
        if report.slider_reset {
            self.set_toast("Selection cleared");
        }
        debug!("cycle: {report:?}");
        report
    }

    fn report_masking(&mut self, verb: &str, result: Result<usize, SessionError>) {
        match result {
            Ok(count) => self.set_toast(format!("{verb} {count} frames")),
            Err(err) => self.set_toast(format!("Masking failed: {err}")),
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;

//! Terminal-backed implementations of the engine collaborators.

use std::{
    io::stdout,
    process::{Command, Stdio},
};

use crossterm::{
    clipboard::CopyToClipboard,
    event::{self, Event, KeyCode, KeyEventKind},
};
use engine::{Clipboard, ConfirmPrompt, EngineError, UrlOpener};
use ratatui::buffer::Buffer;

use crate::ui::{self, Terminal};

/// Clipboard write through the OSC 52 escape sequence.
///
/// Works over SSH and inside multiplexers that forward OSC 52; the terminal
/// may still ignore it, which cannot be detected from here.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&mut self, value: &str) -> Result<(), EngineError> {
        let mut out = stdout();
        crossterm::execute!(out, CopyToClipboard::to_clipboard_from(value))
            .map_err(|err| EngineError::Clipboard(err.to_string()))
    }
}

/// Hands URLs to the platform opener.
#[derive(Debug, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open(&mut self, url: &str) -> Result<(), EngineError> {
        let mut command = opener_command(url);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(url, "opened portal");
        Ok(())
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(url);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}

/// Blocking yes/no popup drawn over the last rendered frame.
///
/// Runs its own draw/read loop until the user answers. `y` or Enter confirm,
/// `n` or Esc decline. Terminal errors count as a decline.
pub struct TerminalConfirm<'a> {
    terminal: &'a mut Terminal,
    backdrop: &'a Buffer,
}

impl<'a> TerminalConfirm<'a> {
    pub fn new(terminal: &'a mut Terminal, backdrop: &'a Buffer) -> Self {
        Self { terminal, backdrop }
    }

    fn ask(&mut self, message: &str) -> std::io::Result<bool> {
        loop {
            let backdrop = self.backdrop;
            self.terminal.draw(|frame| {
                let area = frame.area();
                frame.buffer_mut().merge(backdrop);
                ui::components::confirm::render(frame, area, message);
            })?;

            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('y' | 'Y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

impl ConfirmPrompt for TerminalConfirm<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        match self.ask(message) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!("confirm prompt failed: {err}");
                false
            }
        }
    }
}

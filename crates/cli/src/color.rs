// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help text and batch summaries.

use bw_core::BatchStatus;
use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

/// Palette roles, each backed by one 256-color code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Batch ids and help section titles
    Accent,
    /// Help literals
    Plain,
    /// Row counts, placeholders and hints
    Muted,
    Good,
    Bad,
    /// Pending or stopped: waiting on the server or the user
    Idle,
}

impl Tone {
    pub fn code(self) -> u8 {
        match self {
            Tone::Accent => 74,
            Tone::Plain => 250,
            Tone::Muted => 245,
            Tone::Good => 114,
            Tone::Bad => 167,
            Tone::Idle => 179,
        }
    }

    fn style(self) -> Style {
        Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(self.code()))))
    }

    pub fn for_status(status: BatchStatus) -> Self {
        match status {
            BatchStatus::Processing => Tone::Accent,
            BatchStatus::Completed => Tone::Good,
            BatchStatus::Failed => Tone::Bad,
            BatchStatus::Pending | BatchStatus::Stopped => Tone::Idle,
        }
    }
}

/// `NO_COLOR=1` wins over `COLOR=1`; otherwise color follows stdout being a TTY.
pub fn enabled() -> bool {
    let flag = |name| std::env::var(name).is_ok_and(|v| v == "1");
    match (flag("NO_COLOR"), flag("COLOR")) {
        (true, _) => false,
        (false, true) => true,
        (false, false) => std::io::stdout().is_terminal(),
    }
}

/// Clap help styles.
pub fn styles() -> Styles {
    if enabled() {
        Styles::styled()
            .header(Tone::Accent.style())
            .literal(Tone::Plain.style())
            .placeholder(Tone::Muted.style())
    } else {
        Styles::plain()
    }
}

pub fn paint(tone: Tone, text: &str) -> String {
    if !enabled() {
        return text.to_owned();
    }
    format!("\x1b[38;5;{}m{text}\x1b[0m", tone.code())
}

pub fn status(status: BatchStatus) -> String {
    paint(Tone::for_status(status), status.as_str())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;

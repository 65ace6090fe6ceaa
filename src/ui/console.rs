//! Colored prompts and blocking confirmations
//!
//! Messages render as full-width banners: bold bright-white text on a
//! green (info) or blue (question) background. Coloring is disabled on
//! Windows since consoles there predate ANSI escape support.

use crate::core::error::{ReleaseError, ReleaseResult};
use anstyle::{AnsiColor, Color, Style};
use std::io::{self, BufRead, Write};

/// Terminal front-end for the release workflow
pub struct Console {
  colors_enabled: bool,
}

impl Console {
  pub fn new() -> Console {
    Console {
      colors_enabled: ansi_supported(),
    }
  }

  /// Print an informational banner (green background)
  pub fn info(&self, message: &str) {
    self.banner(message, AnsiColor::Green);
  }

  /// Print a question banner (blue background)
  pub fn question(&self, message: &str) {
    self.banner(message, AnsiColor::Blue);
  }

  /// Read one line from stdin, with trailing whitespace trimmed
  pub fn read_line(&self) -> ReleaseResult<String> {
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end().to_string())
  }

  /// Ask a Y/n question and fail with `UserAborted` on anything but yes
  ///
  /// Accepted answers: exactly `Y`, or `yes` in any case. The abort is a
  /// cancellation signal, not a retried prompt.
  pub fn confirm(&self, yes_no_question: &str) -> ReleaseResult<()> {
    self.question(&format!("{} Y/n", yes_no_question));
    let input = self.read_line()?;
    if is_affirmative(&input) {
      Ok(())
    } else {
      println!("Process aborted.");
      Err(ReleaseError::UserAborted)
    }
  }

  /// Ask the operator to perform an out-of-band action, then gate on
  /// a mandatory confirmation
  pub fn request_manual_action(&self, instructions: &str) -> ReleaseResult<()> {
    self.question(instructions);
    self.confirm("Done?")
  }

  fn banner(&self, message: &str, background: AnsiColor) {
    if self.colors_enabled {
      let style = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::BrightWhite)))
        .bg_color(Some(Color::Ansi(background)));
      println!("{}{}{}", style.render(), message, style.render_reset());
    } else {
      println!("{}", message);
    }
  }
}

impl Default for Console {
  fn default() -> Self {
    Console::new()
  }
}

fn ansi_supported() -> bool {
  !cfg!(windows)
}

/// Whether a confirmation answer counts as yes
pub(crate) fn is_affirmative(input: &str) -> bool {
  input == "Y" || input.eq_ignore_ascii_case("yes")
}

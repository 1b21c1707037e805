//! Terminal rendering of a widget transcript.
//!
//! Output is append-only like the transcript itself. The one exception is a
//! placeholder that was the last line printed and has since been removed: on
//! an ANSI terminal that line is erased before the reply is printed, so the
//! reply takes its place.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::io::{self, Write};

use chatbox::{Entry, EntryId, Transcript};

/// Cursor up one line, then clear it.
const ERASE_PREVIOUS_LINE: &str = "\x1b[1A\x1b[2K";

/// Format one bubble as a single terminal line.
#[must_use]
pub fn format_entry(entry: &Entry) -> String {
    format!("{:>3} │ {}", entry.message.sender.label(), entry.message.text)
}

pub struct TranscriptPrinter {
    ansi: bool,
    /// Handle of the newest entry printed so far.
    high_water: Option<EntryId>,
    /// Placeholder currently occupying the last printed line.
    trailing_placeholder: Option<EntryId>,
}

impl TranscriptPrinter {
    #[must_use]
    pub fn new(ansi: bool) -> Self {
        Self { ansi, high_water: None, trailing_placeholder: None }
    }

    /// Print every entry appended since the last call.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn sync(&mut self, transcript: &Transcript, out: &mut impl Write) -> io::Result<()> {
        if let Some(id) = self.trailing_placeholder {
            if transcript.get(id).is_none() {
                if self.ansi {
                    write!(out, "{ERASE_PREVIOUS_LINE}")?;
                }
                self.trailing_placeholder = None;
            }
        }

        let seen = self.high_water;
        let fresh = transcript
            .iter()
            .filter(|e| seen.is_none_or(|seen| e.id > seen));
        for entry in fresh {
            writeln!(out, "{}", format_entry(entry))?;
            self.high_water = Some(entry.id);
            self.trailing_placeholder = entry.is_placeholder().then_some(entry.id);
        }
        out.flush()
    }
}

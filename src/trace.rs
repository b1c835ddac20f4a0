/*
 * Duesboard, resident dues at a glance
 * Copyright (C) 2019-2020 Adrien 'Litarvan' Navratil
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use std::fmt;
use std::io::Write;

use log::{info, error};

/// Progress notes shown to the user while loading and under the login form.
///
/// This is not the program log, even if every note also ends up there.
#[derive(Default, Debug)]
pub struct Trace {
    notes: Vec<String>,
    echo: bool
}

impl Trace {
    /// A trace that also prints each note as soon as it is taken
    pub fn live() -> Self {
        Trace {
            notes: Vec::new(),
            echo: true
        }
    }

    pub fn note<S: Into<String>>(&mut self, note: S) {
        let note = note.into();
        info!("{}", note);

        self.push(note);
    }

    pub fn error(&mut self, message: &str) {
        error!("Fetch error : {}", message);

        self.push(format!("Error: {}", message));
    }

    fn push(&mut self, note: String) {
        if self.echo {
            let mut out = std::io::stdout();
            let _ = writeln!(out, "{}", note).and_then(|_| out.flush());
        }

        self.notes.push(note);
    }

    #[cfg(test)]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.notes.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::Trace;

    #[test]
    fn notes_are_kept_in_order() {
        let mut trace = Trace::default();
        assert!(trace.is_empty());

        trace.note("Fetching data...");
        trace.note(format!("Processed {} users", 3));
        trace.error("boom");

        assert_eq!(trace.notes(), &["Fetching data...", "Processed 3 users", "Error: boom"]);
        assert_eq!(trace.to_string(), "Fetching data...\nProcessed 3 users\nError: boom");
    }
}

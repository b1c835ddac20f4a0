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
use std::error::Error;

/// Errors shown to the user, everything else is turned into one of these
#[derive(PartialEq, Clone, Debug)]
pub enum BoardError {
    LoadFailure { message: String }, // Terminal for this run, the program must be restarted
    AuthFailure
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BoardError::*;

        match self {
            LoadFailure { message } => write!(f, "Error loading data: {}", message),
            AuthFailure => write!(f, "Invalid credentials")
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::BoardError;

    #[test]
    fn messages() {
        let load = BoardError::LoadFailure { message: "HTTP error! status: 500".to_string() };

        assert_eq!(load.to_string(), "Error loading data: HTTP error! status: 500");
        assert_eq!(BoardError::AuthFailure.to_string(), "Invalid credentials");
    }
}

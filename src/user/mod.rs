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
use crate::sheet::columns::ColumnMap;
use crate::sheet::gviz::Row;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub flat_number: String,
    pub display_name: String,
    pub username: String,
    pub outstanding_amount: String,
    pub total_outstanding_amount: String,
    pub password: String // Plaintext, as published in the sheet
}

impl UserRecord {
    pub fn from_row(row: &Row, columns: &ColumnMap) -> Self {
        UserRecord {
            flat_number: row.text(columns.flat_number),
            display_name: row.text(columns.display_name),
            username: row.text(columns.username),
            outstanding_amount: row.text(columns.outstanding_amount),
            total_outstanding_amount: row.text(columns.total_outstanding_amount),
            password: row.text(columns.password)
        }
    }

    /// Only records with both credentials can ever log in
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Display for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} ({})", self.display_name, self.flat_number)
    }
}

/// Users loaded from the sheet, in row order. Duplicated usernames are kept.
#[derive(Default, Debug)]
pub struct Directory {
    users: Vec<UserRecord>
}

impl Directory {
    pub fn from_rows(rows: &[Row], columns: &ColumnMap) -> Self {
        Directory {
            users: rows.iter()
                .map(|row| UserRecord::from_row(row, columns))
                .filter(UserRecord::has_credentials)
                .collect()
        }
    }

    /// First user whose username and password are both exactly equal
    pub fn find(&self, username: &str, password: &str) -> Option<&UserRecord> {
        self.users.iter()
            .find(|u| u.username == username && u.password == password)
    }

    #[cfg(test)]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

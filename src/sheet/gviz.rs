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
use serde_derive::Deserialize;
use serde_json::Value;

// `/*O_o*/\ngoogle.visualization.Query.setResponse(` and `);`
pub const PREFIX_LEN: usize = 47;
pub const SUFFIX_LEN: usize = 2;

/// Strips the visualization wrapper around the JSON payload.
///
/// Only lengths are considered, the wrapper content itself is never checked.
/// A body too short to hold both ends yields an empty string.
pub fn unwrap_payload(body: &str) -> &str {
    let start = body.char_indices()
        .nth(PREFIX_LEN)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    let rest = &body[start..];

    let count = rest.chars().count();
    if count <= SUFFIX_LEN {
        return "";
    }

    let end = rest.char_indices()
        .nth(count - SUFFIX_LEN)
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    &rest[..end]
}

#[derive(Deserialize, Debug)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<QueryMessage>,
    pub table: Option<Table>
}

#[derive(Deserialize, Debug)]
pub struct QueryMessage {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    pub detailed_message: Option<String>
}

#[derive(Deserialize, Debug)]
pub struct Table {
    pub rows: Vec<Row>
}

#[derive(Deserialize, Debug)]
pub struct Row {
    pub c: Vec<Option<Cell>>
}

#[derive(Deserialize, Debug)]
pub struct Cell {
    #[serde(default)]
    pub v: Value
}

impl Row {
    /// Text of the cell at `index`, empty when the cell is absent or null
    pub fn text(&self, index: usize) -> String {
        match self.c.get(index) {
            Some(Some(cell)) => cell_text(&cell.v),
            _ => String::new()
        }
    }
}

impl QueryMessage {
    pub fn summary(&self) -> String {
        let mut result = if self.message.is_empty() {
            self.reason.clone()
        } else {
            self.message.clone()
        };

        if let Some(detail) = &self.detailed_message {
            if !detail.is_empty() && detail != &result {
                result += &format!(" ({})", detail);
            }
        }

        result
    }
}

/// Renders a cell value the way the sheet shows it, falsy values become empty
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i == 0 { String::new() } else { i.to_string() }
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f != 0.0 => float_text(f),
                    _ => String::new()
                }
            }
        },
        other => other.to_string()
    }
}

// Same text as the sheet's own number rendering: plain decimal between 1e-6
// and 1e21, exponent form with an explicit sign outside of it
fn float_text(f: f64) -> String {
    let magnitude = f.abs();
    if magnitude >= 1e-6 && magnitude < 1e21 {
        // f64 Display drops the trailing '.0' of whole numbers
        return f.to_string();
    }

    let exp = format!("{:e}", f);
    match exp.find('e') {
        Some(i) if !exp[i + 1..].starts_with('-') => format!("{}e+{}", &exp[..i], &exp[i + 1..]),
        _ => exp
    }
}

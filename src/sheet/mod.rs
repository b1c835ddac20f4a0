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
use failure::Fail;
use log::{info, debug};
use serde::de::Error as _;

use crate::trace::Trace;
use crate::user::Directory;

pub mod columns;
pub mod gviz;

use columns::ColumnMap;
use gviz::QueryResponse;

pub type LoadResult<T> = Result<T, LoadError>;

pub fn sheet_url(base_url: &str, sheet_id: &str) -> String {
    format!("{}/{}/gviz/tq?tqx=out:json", base_url.trim_end_matches('/'), sheet_id)
}

/// Fetches the published sheet and builds the user directory out of it.
///
/// Progress goes to `trace`, failures are returned untouched so the caller
/// decides how to show them.
pub async fn load_directory(
    base_url: &str,
    sheet_id: &str,
    columns: &ColumnMap,
    trace: &mut Trace
) -> LoadResult<Directory> {
    let url = sheet_url(base_url, sheet_id);

    trace.note("Fetching data...");
    debug!("Requesting '{}'", url);

    let res = reqwest::get(&url).await?;
    let status = res.status().as_u16();
    let body = res.text().await?;

    load_from_response(status, &body, columns, trace)
}

/// Everything the loader does once the HTTP exchange is over
pub fn load_from_response(status: u16, body: &str, columns: &ColumnMap, trace: &mut Trace) -> LoadResult<Directory> {
    if !(200..300).contains(&status) {
        return Err(LoadError::BadStatus { status, response: body.to_string() });
    }

    trace.note("Received response...");

    let json = gviz::unwrap_payload(body);
    let response: QueryResponse = serde_json::from_str(json)
        .map_err(|e| LoadError::ParseError { error: e, response: body.to_string() })?;

    let table = match response.table {
        Some(t) => t,
        None => {
            if response.status.as_deref() == Some("error") || !response.errors.is_empty() {
                let messages: Vec<String> = response.errors.iter()
                    .map(|e| e.summary())
                    .collect();

                return Err(LoadError::QueryError { message: messages.join(", ") });
            }

            return Err(LoadError::ParseError {
                error: serde_json::Error::missing_field("table"),
                response: body.to_string()
            });
        }
    };

    trace.note("Parsed JSON data...");

    let directory = Directory::from_rows(&table.rows, columns);
    info!("Kept {} users out of {} rows", directory.len(), table.rows.len());

    trace.note(format!("Processed {} users", directory.len()));

    Ok(directory)
}

#[derive(Debug, Fail)]
pub enum LoadError {
    #[fail(display = "{}", error)]
    HttpError {
        error: reqwest::Error
    },

    #[fail(display = "HTTP error! status: {}", status)]
    BadStatus {
        status: u16,
        response: String
    },

    #[fail(display = "Query error: {}", message)]
    QueryError {
        message: String
    },

    #[fail(display = "{}", error)]
    ParseError {
        error: serde_json::Error,
        response: String
    }
}

impl LoadError {
    pub fn to_detailed_string(&self) -> String {
        use LoadError::*;

        let mut result = String::new();
        result += &self.to_string();

        match self {
            HttpError { error } => {
                if let Some(url) = error.url() {
                    result += &format!(", while requesting '{}'", url);
                }
            },
            BadStatus { response, .. } => {
                result += &format!(". Remote answered :\n{}", response);
            },
            ParseError { response, .. } => {
                result += &format!(". Serde dropped this error while parsing response :\n{}", response);
            },
            QueryError { .. } => {}
        }

        result
    }
}

from_error!(reqwest::Error, LoadError, LoadError::HttpError);

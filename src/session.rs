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
use log::{info, warn};

use crate::error::BoardError;
use crate::sheet::LoadResult;
use crate::trace::Trace;
use crate::user::{Directory, UserRecord};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum View {
    Loading,
    Unauthenticated,
    Authenticated
}

/// Login state for this run of the program, nothing of it is ever saved
#[derive(Default, Debug)]
pub struct Session {
    current_user: Option<UserRecord>, // Only 'Some' once logged
    last_error: Option<BoardError>
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.current_user.as_ref()
    }

    pub fn last_error(&self) -> Option<&BoardError> {
        self.last_error.as_ref()
    }
}

pub struct Board {
    directory: Directory,
    session: Session,
    loading: bool,
    trace: Trace
}

impl Board {
    pub fn new(trace: Trace) -> Self {
        Board {
            directory: Directory::default(),
            session: Session::default(),
            loading: true,
            trace
        }
    }

    pub fn view(&self) -> View {
        if self.loading {
            View::Loading
        } else if self.session.is_authenticated() {
            View::Authenticated
        } else {
            View::Unauthenticated
        }
    }

    /// Ends the loading phase. Called once, the directory is never reloaded.
    pub fn finish_loading(&mut self, result: LoadResult<Directory>) {
        if !self.loading {
            warn!("Directory was already loaded, ignoring another load result");
            return;
        }

        match result {
            Ok(directory) => {
                info!("User directory loaded, {} users can log in", directory.len());

                self.directory = directory;
                self.session.last_error = None;
            },
            Err(e) => {
                warn!("{}", e.to_detailed_string());

                let message = e.to_string();
                self.trace.error(&message);
                self.session.last_error = Some(BoardError::LoadFailure { message });
            }
        }

        self.loading = false;
    }

    /// Checks the credentials against the directory, only from the login form
    pub fn submit_login(&mut self, username: &str, password: &str) -> View {
        if self.view() != View::Unauthenticated {
            warn!("Login submitted while {:?}, ignoring it", self.view());
            return self.view();
        }

        self.session.last_error = None;

        match self.directory.find(username, password) {
            Some(user) => {
                info!("User '{}' logged in", user);

                self.session.current_user = Some(user.clone());
            },
            None => {
                info!("Failed login attempt for username '{}'", username);

                self.session.last_error = Some(BoardError::AuthFailure);
            }
        }

        self.view()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut Trace {
        &mut self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{self, columns::ColumnMap};

    const PREFIX: &str = "/*O_o*/\ngoogle.visualization.Query.setResponse(";
    const JANE: &str = r#"{"table":{"rows":[{"c":[{"v":"A-1"},{"v":"Jane"},{"v":"jane1"},{"v":"500"},{"v":null},{"v":"1500"},{"v":"pw1"}]}]}}"#;

    fn loaded(status: u16, json: &str) -> Board {
        let mut board = Board::new(Trace::default());
        let body = format!("{}{});", PREFIX, json);

        let result = sheet::load_from_response(status, &body, &ColumnMap::SHEET, board.trace_mut());
        board.finish_loading(result);

        board
    }

    #[test]
    fn starts_loading() {
        let board = Board::new(Trace::default());

        assert_eq!(board.view(), View::Loading);
        assert!(board.session().current_user().is_none());
        assert!(board.session().last_error().is_none());
    }

    #[test]
    fn login_is_ignored_while_loading() {
        let mut board = Board::new(Trace::default());

        assert_eq!(board.submit_login("jane1", "pw1"), View::Loading);
        assert!(board.session().last_error().is_none());
    }

    #[test]
    fn successful_login() {
        let mut board = loaded(200, JANE);
        assert_eq!(board.view(), View::Unauthenticated);

        assert_eq!(board.submit_login("jane1", "pw1"), View::Authenticated);

        let user = board.session().current_user().unwrap();
        assert_eq!(user.display_name, "Jane");
        assert_eq!(user.flat_number, "A-1");
        assert_eq!(user.outstanding_amount, "500");
        assert_eq!(user.total_outstanding_amount, "1500");
        assert!(board.session().last_error().is_none());
    }

    #[test]
    fn failed_login_then_retry() {
        let mut board = loaded(200, JANE);

        assert_eq!(board.submit_login("JANE1", "pw1"), View::Unauthenticated);
        assert_eq!(board.session().last_error(), Some(&BoardError::AuthFailure));
        assert_eq!(board.session().last_error().unwrap().to_string(), "Invalid credentials");

        assert_eq!(board.submit_login("", ""), View::Unauthenticated);
        assert_eq!(board.session().last_error(), Some(&BoardError::AuthFailure));

        assert_eq!(board.submit_login("jane1", "pw1"), View::Authenticated);
        assert!(board.session().last_error().is_none());
    }

    #[test]
    fn no_way_back_once_logged() {
        let mut board = loaded(200, JANE);
        board.submit_login("jane1", "pw1");

        assert_eq!(board.submit_login("nobody", "nothing"), View::Authenticated);
        assert_eq!(board.session().current_user().unwrap().username, "jane1");
        assert!(board.session().last_error().is_none());
    }

    #[test]
    fn server_error_ends_loading() {
        let mut board = Board::new(Trace::default());
        let result = sheet::load_from_response(500, "", &ColumnMap::SHEET, board.trace_mut());
        board.finish_loading(result);

        assert_eq!(board.view(), View::Unauthenticated);

        let error = board.session().last_error().unwrap().to_string();
        assert!(error.starts_with("Error loading data: "));
        assert!(error.contains("status: 500"));
        assert_eq!(board.trace().notes(), &["Error: HTTP error! status: 500"]);
    }

    #[test]
    fn unparseable_body_leaves_directory_empty() {
        let mut board = loaded(200, "<html>");

        assert_eq!(board.view(), View::Unauthenticated);
        assert!(board.directory().is_empty());

        let error = board.session().last_error().unwrap().to_string();
        let parse_message = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err().to_string();
        assert!(error.contains(&parse_message));

        assert_eq!(board.submit_login("jane1", "pw1"), View::Unauthenticated);
        assert_eq!(board.session().last_error(), Some(&BoardError::AuthFailure));
    }

    #[test]
    fn second_load_is_ignored() {
        let mut board = loaded(200, JANE);
        board.finish_loading(Ok(Directory::default()));

        assert_eq!(board.directory().len(), 1);
    }

    #[actix_rt::test]
    async fn unreachable_sheet_ends_loading() {
        let mut board = Board::new(Trace::default());

        // Nothing listens on port 1
        let result = sheet::load_directory("http://127.0.0.1:1", "x", &ColumnMap::SHEET, board.trace_mut()).await;
        assert!(matches!(result, Err(sheet::LoadError::HttpError { .. })));

        board.finish_loading(result);

        assert_eq!(board.view(), View::Unauthenticated);
        assert!(board.directory().is_empty());

        let error = board.session().last_error().unwrap().to_string();
        assert!(error.starts_with("Error loading data: "));
        assert!(error.contains("/x/gviz/tq?tqx=out:json"));

        let notes = board.trace().notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], "Fetching data...");
        assert!(notes[1].starts_with("Error: "));

        assert_eq!(board.submit_login("jane1", "pw1"), View::Unauthenticated);
    }
}

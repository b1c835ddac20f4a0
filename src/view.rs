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
use std::io;

use log::info;

use crate::session::{Board, View};
use crate::trace::Trace;
use crate::user::UserRecord;

pub const CURRENCY: &str = "₹";

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Action {
    Contact,
    Payment,
    Quit
}

impl Action {
    pub fn parse(input: &str) -> Option<Action> {
        match input.trim().to_lowercase().as_str() {
            "c" | "contact" => Some(Action::Contact),
            "p" | "payment" => Some(Action::Payment),
            "q" | "quit" => Some(Action::Quit),
            _ => None
        }
    }
}

pub fn render(board: &Board) -> String {
    match board.view() {
        View::Loading => render_loading(board.trace()),
        View::Unauthenticated => render_login(board),
        View::Authenticated => match board.session().current_user() {
            Some(user) => render_dashboard(user),
            None => render_login(board) // Authenticated always has a user
        }
    }
}

pub fn render_loading(trace: &Trace) -> String {
    let mut result = "Loading user data...".to_string();

    if !trace.is_empty() {
        result += &format!("\n{}", trace);
    }

    result
}

fn render_login(board: &Board) -> String {
    let mut result = "===== User Login =====".to_string();

    if let Some(e) = board.session().last_error() {
        result += &format!("\n! {}", e);
    }

    if !board.trace().is_empty() {
        result += &format!("\n\n{}", board.trace());
    }

    result
}

pub fn render_dashboard(user: &UserRecord) -> String {
    let fields = [
        ("Name:", user.display_name.clone()),
        ("Flat No:", user.flat_number.clone()),
        ("Outstanding:", format!("{}{}", CURRENCY, user.outstanding_amount)),
        ("Total Outstanding:", format!("{}{}", CURRENCY, user.total_outstanding_amount))
    ];

    let mut result = "===== User Dashboard =====".to_string();
    for (label, value) in fields.iter() {
        result += &format!("\n{:<19}{}", label, value);
    }

    result += "\n\n[c] Contact   [p] Payment   [q] Quit";
    result
}

/// Hands the contact link or the payment asset to the system opener
pub fn open_action(action: Action, contact_url: &str, payment_asset: &str) -> io::Result<()> {
    let target = match action {
        Action::Contact => contact_url,
        Action::Payment => payment_asset,
        Action::Quit => return Ok(())
    };

    info!("Opening {:?} target '{}'", action, target);
    open::that(target)
}

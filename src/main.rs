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
use std::io::{self, BufRead, Write};

use log::{info, warn, error, Level};
use fern::colors::{ColoredLevelConfig, Color};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;

const VERSION: &str = "0.1.0";

#[macro_use]
mod macros;

mod utils;

mod config;
mod error;
mod session;
mod sheet;
mod trace;
mod user;
mod view;

use config::CONFIG;
use session::{Board, View};
use trace::Trace;
use utils::is_env_enable;
use view::Action;

#[actix_rt::main]
async fn main() {
    let is_debug = is_env_enable("DUESBOARD_DEBUG");

    if let Err(e) = setup_logger(is_debug) {
        eprintln!("Couldn't initialize logger : {}", e);
        return;
    }

    info!("Duesboard v{}", VERSION);
    info!("---------------------------------------------------");

    let mut board = Board::new(Trace::live());
    println!("{}", view::render_loading(board.trace()));

    let result = sheet::load_directory(
        &CONFIG.sheet_base_url,
        &CONFIG.sheet_id,
        &CONFIG.columns,
        board.trace_mut()
    ).await;
    board.finish_loading(result);

    if let Err(e) = run(&mut board) {
        error!("Terminal error, leaving : {}", e);
    }
}

fn run(board: &mut Board) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("\n{}\n", view::render(board));

        match board.view() {
            View::Unauthenticated => {
                let username = match prompt(&mut input, "Username: ")? {
                    Some(u) => u,
                    None => return Ok(())
                };
                // Piped input has nothing to hide, only a terminal echoes
                let password = if io::stdin().is_tty() {
                    read_password("Password: ")?
                } else {
                    prompt(&mut input, "Password: ")?
                };
                let password = match password {
                    Some(p) => p,
                    None => return Ok(())
                };

                board.submit_login(&username, &password);
            },
            View::Authenticated => {
                let line = match prompt(&mut input, "> ")? {
                    Some(l) => l,
                    None => return Ok(())
                };

                match Action::parse(&line) {
                    Some(Action::Quit) => return Ok(()),
                    Some(action) => {
                        if let Err(e) = view::open_action(action, &CONFIG.contact_url, &CONFIG.payment_asset) {
                            warn!("Couldn't open {:?} : {}", action, e);
                            println!("Couldn't open it : {}", e);
                        }
                    },
                    None => println!("Unknown action '{}'", line.trim())
                }
            },
            // The directory is loaded before the first render of this loop
            View::Loading => return Ok(())
        }
    }
}

/// Reads one line, without its line break. `None` once input is closed.
fn prompt<R: BufRead>(input: &mut R, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Some(line))
}

#[derive(PartialEq, Eq, Debug)]
enum Keystroke {
    Typed,
    Submit,
    Cancel
}

/// Same as `prompt`, but typed characters are not echoed
fn read_password(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden();
    let restored = terminal::disable_raw_mode();

    // Enter isn't echoed either in raw mode
    println!();

    let password = result?;
    restored?;

    Ok(password)
}

fn read_hidden() -> io::Result<Option<String>> {
    let mut password = String::new();

    loop {
        if let Event::Key(key) = event::read()? {
            match apply_key(&mut password, key) {
                Keystroke::Typed => {},
                Keystroke::Submit => return Ok(Some(password)),
                Keystroke::Cancel => return Ok(None)
            }
        }
    }
}

fn apply_key(password: &mut String, key: KeyEvent) -> Keystroke {
    if key.kind == KeyEventKind::Release {
        return Keystroke::Typed;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => Keystroke::Submit,
        KeyCode::Char('c') | KeyCode::Char('d') if control => Keystroke::Cancel,
        KeyCode::Char(c) if !control => {
            password.push(c);
            Keystroke::Typed
        },
        KeyCode::Backspace => {
            password.pop();
            Keystroke::Typed
        },
        _ => Keystroke::Typed
    }
}

fn setup_logger(debug: bool) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let file_log = fern::Dispatch::new()
        .format(move |out, message, record| {
            let pad = " ".repeat((30i16 - record.target().len() as i16).max(0) as usize);
            let level_pad = if record.level() == Level::Error { "" } else { " " };

            out.finish(format_args!(
                "{} [{}{}] [{}]{} | {}",
                chrono::Local::now().format("[%Y-%m-%d] (%H:%M:%S%.3f)"),
                record.level(),
                level_pad,
                record.target(),
                pad,
                message
            ))
        })
        .chain(fern::log_file("duesboard.log")?);

    let mut base = fern::Dispatch::new()
        .chain(file_log);

    if debug {
        // The terminal belongs to the screens, logs only go there when asked
        let stderr_log = fern::Dispatch::new()
            .format(move |out, message, record| {
                let target = record.target();
                let mut target_with_pad = " ".repeat((30i16 - target.len() as i16).max(0) as usize) + target;

                if record.level() != Level::Error {
                    target_with_pad = " ".to_owned() + &target_with_pad;
                }

                out.finish(format_args!(
                    "{} {} {} > {}",
                    chrono::Local::now().format("[%Y-%m-%d] (%H:%M:%S%.3f)"),
                    colors.color(record.level()),
                    target_with_pad,
                    message
                ))
            })
            .chain(std::io::stderr());

        base = base
            .chain(stderr_log)
            .level(log::LevelFilter::Info)
            .level_for("duesboard", log::LevelFilter::Trace);
    } else {
        base = base
            .level(log::LevelFilter::Info)
            .level_for("reqwest", log::LevelFilter::Warn)
            .level_for("hyper", log::LevelFilter::Warn);
    }

    base.apply()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{prompt, apply_key, Keystroke};

    fn type_keys(keys: &[KeyEvent]) -> (String, Vec<Keystroke>) {
        let mut password = String::new();
        let outcomes = keys.iter()
            .map(|k| apply_key(&mut password, *k))
            .collect();

        (password, outcomes)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn prompt_keeps_everything_but_the_line_break() {
        let mut input = Cursor::new(" jane1 \r\npw1\n");

        assert_eq!(prompt(&mut input, "").unwrap(), Some(" jane1 ".to_string()));
        assert_eq!(prompt(&mut input, "").unwrap(), Some("pw1".to_string()));
        assert_eq!(prompt(&mut input, "").unwrap(), None);
    }

    #[test]
    fn empty_line_is_an_empty_answer() {
        let mut input = Cursor::new("\n");

        assert_eq!(prompt(&mut input, "").unwrap(), Some(String::new()));
    }

    #[test]
    fn hidden_input_keeps_spaces_and_case() {
        let (password, outcomes) = type_keys(&[
            key(KeyCode::Char(' ')),
            KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT),
            key(KeyCode::Char('w')),
            key(KeyCode::Char(' ')),
            key(KeyCode::Enter)
        ]);

        assert_eq!(password, " Pw ");
        assert_eq!(outcomes.last(), Some(&Keystroke::Submit));
    }

    #[test]
    fn hidden_input_handles_backspace() {
        let (password, _) = type_keys(&[
            key(KeyCode::Backspace),
            key(KeyCode::Char('p')),
            key(KeyCode::Char('x')),
            key(KeyCode::Backspace),
            key(KeyCode::Char('w'))
        ]);

        assert_eq!(password, "pw");
    }

    #[test]
    fn key_releases_are_ignored() {
        let (password, _) = type_keys(&[
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release),
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release)
        ]);

        assert_eq!(password, "");
    }

    #[test]
    fn control_keys_cancel_or_are_dropped() {
        let mut password = String::new();

        assert_eq!(apply_key(&mut password, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)), Keystroke::Typed);
        assert_eq!(password, "");
        assert_eq!(apply_key(&mut password, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Keystroke::Cancel);
        assert_eq!(apply_key(&mut password, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)), Keystroke::Cancel);
    }
}

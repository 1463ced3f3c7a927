//! Interactive console menus.
//!
//! [`App`] reads choices line by line from any [`BufRead`] and writes prompts
//! and results to any [`Write`], so a session can be scripted in tests just as
//! it is driven from a terminal.

use std::io::{BufRead, Write};

use chirp_core::error::{FeedError, Result};
use chirp_data::Feed;
use tracing::debug;

use crate::render::{render_recent, render_stats};

const MAIN_MENU: &str = "\
You need to register or login to use the app!
    1. Register
    2. Login
    3. Exit";

const SESSION_MENU: &str = "\
    1. Post a message
    2. Post a reply
    3. Dashboard
    4. Statistics
    5. Logout";

const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Whether the caller should keep looping or the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    feed: Feed,
    recent: usize,
}

impl App {
    /// `recent` is how many messages the dashboard shows.
    pub fn new(feed: Feed, recent: usize) -> Self {
        Self { feed, recent }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Run the main menu until the user exits or the input ends.
    ///
    /// Input mistakes are printed and the menu continues; storage failures
    /// are returned.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to Chirp!")?;

        loop {
            writeln!(out, "{MAIN_MENU}")?;
            let Some(choice) = prompt(input, out, "Enter your choice (1-3): ")? else {
                break;
            };
            debug!(choice = %choice, "main menu");

            let flow = match choice.trim() {
                "1" => self.register(input, out)?,
                "2" => self.login(input, out)?,
                "3" => break,
                _ => {
                    writeln!(out, "{INVALID_CHOICE}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    fn register<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<Flow> {
        let Some(username) = prompt(input, out, "Enter a username: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = prompt(input, out, "Enter a password: ")? else {
            return Ok(Flow::Exit);
        };

        match self.feed.register(&username, &password) {
            Ok(()) => writeln!(out, "Registration successful!")?,
            Err(e) => report(out, e)?,
        }
        Ok(Flow::Continue)
    }

    fn login<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<Flow> {
        let Some(username) = prompt(input, out, "Enter your username: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = prompt(input, out, "Enter your password: ")? else {
            return Ok(Flow::Exit);
        };

        match self.feed.login(&username, &password) {
            Ok(user) => {
                writeln!(out, "Login successful!")?;
                writeln!(out, "Welcome, {user}!")?;
                self.user_session(&user, input, out)
            }
            Err(e) => {
                report(out, e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn user_session<R: BufRead, W: Write>(
        &self,
        user: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        loop {
            writeln!(out, "{SESSION_MENU}")?;
            let Some(choice) = prompt(input, out, "Enter your choice (1-5): ")? else {
                return Ok(Flow::Exit);
            };
            debug!(user, choice = %choice, "session menu");

            let flow = match choice.trim() {
                "1" => self.post_message(user, input, out)?,
                "2" => self.post_reply(user, input, out)?,
                "3" => {
                    let recent = self.feed.list_recent(self.recent)?;
                    write!(out, "{}", render_recent(&recent))?;
                    Flow::Continue
                }
                "4" => {
                    let stats = self.feed.stats()?;
                    write!(out, "{}", render_stats(&stats))?;
                    Flow::Continue
                }
                "5" => {
                    writeln!(out, "Logged out.")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    writeln!(out, "{INVALID_CHOICE}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn post_message<R: BufRead, W: Write>(
        &self,
        user: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        let Some(body) = prompt(input, out, "Enter your message (max. 300 characters): ")? else {
            return Ok(Flow::Exit);
        };

        match self.feed.post_message(user, &body) {
            Ok(message) => writeln!(out, "Message posted successfully! (ID: {})", message.id)?,
            Err(e) => report(out, e)?,
        }
        Ok(Flow::Continue)
    }

    fn post_reply<R: BufRead, W: Write>(
        &self,
        user: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        let Some(raw_id) = prompt(
            input,
            out,
            "Enter the ID of the message you want to reply to: ",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Ok(message_id) = raw_id.trim().parse::<u64>() else {
            writeln!(out, "Invalid message ID.")?;
            return Ok(Flow::Continue);
        };

        let Some(body) = prompt(input, out, "Enter your reply (max. 300 characters): ")? else {
            return Ok(Flow::Exit);
        };

        match self.feed.post_reply(message_id, user, &body) {
            Ok(_) => writeln!(out, "Reply posted successfully!")?,
            Err(e) => report(out, e)?,
        }
        Ok(Flow::Continue)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Print `text`, then read one line. `None` means the input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Print recoverable errors; hand everything else back to the caller.
fn report<W: Write>(out: &mut W, err: FeedError) -> Result<()> {
    if err.is_recoverable() {
        writeln!(out, "{err}")?;
        Ok(())
    } else {
        Err(err)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

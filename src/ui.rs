// UI layer: runs the selected command and prints the outcome as plain
// lines. Server rejections are printed and end the command normally;
// transport and local faults are returned to `main`.

use crate::account;
use crate::api::ApiClient;
use crate::cli::Command;
use crate::error::CourierResult;
use crate::resources::{self, UserProfile, UserSummary};
use crate::session::SessionStore;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::io::Write;
use std::time::Duration;

/// Run one command against the API, writing output to `out`.
pub fn run<W: Write>(command: Command, api: &ApiClient, session: &mut SessionStore, out: &mut W) -> Result<()> {
    match command {
        Command::Login(credentials) => {
            let res = with_spinner("Logging in...", || account::login(api, session, &credentials));
            match report(res, out)? {
                Some(()) => writeln!(out, "Login successful")?,
                None => writeln!(out, "Login failed")?,
            }
        }
        Command::Signup(profile) => {
            let res = with_spinner("Signing up...", || account::signup(api, &profile));
            match report(res, out)? {
                Some(()) => writeln!(out, "Signup successful")?,
                None => writeln!(out, "Signup failed")?,
            }
        }
        Command::GetSelf => {
            let res = with_spinner("Fetching profile...", || resources::get_self(api, session));
            if let Some(user) = report(res, out)? {
                print_welcome(&user, out)?;
            }
        }
        Command::ListUsers => {
            // The listing is the one endpoint checked locally before calling.
            if session.load()?.is_none() {
                writeln!(out, "You must be logged in to get users")?;
                return Ok(());
            }
            let res = with_spinner("Fetching users...", || resources::list_users(api, session));
            if let Some(users) = report(res, out)? {
                for user in &users {
                    print_summary(user, out)?;
                }
            }
        }
        Command::GetUserById(id) => {
            let res = with_spinner("Fetching user...", || resources::get_user_by_id(api, session, &id));
            if let Some(user) = report(res, out)? {
                print_profile(&user, out)?;
            }
        }
        Command::GetUserByUsername(username) => {
            let res = with_spinner("Fetching user...", || {
                resources::get_user_by_username(api, session, &username)
            });
            if let Some(user) = report(res, out)? {
                print_profile(&user, out)?;
            }
        }
        Command::Logout => {
            account::logout(session)?;
            writeln!(out, "Logout successful")?;
        }
        Command::ListParcels => {
            let res = with_spinner("Fetching parcels...", || resources::list_parcels(api, session));
            if let Some(parcels) = report(res, out)? {
                for parcel in &parcels {
                    writeln!(out, "{}", parcel)?;
                }
            }
        }
    }
    Ok(())
}

/// Print a rejection's message and turn it into `None`; pass other
/// errors through.
fn report<T, W: Write>(res: CourierResult<T>, out: &mut W) -> Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_rejection() => {
            // Displays as the server's message.
            writeln!(out, "{}", e)?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Show a spinner on stderr while `f` runs. indicatif hides it when stderr
/// is not a terminal.
fn with_spinner<T>(msg: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let value = f();
    spinner.finish_and_clear();
    value
}

/// Ids come back as numbers or strings; strings print without quotes.
fn display_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_welcome<W: Write>(user: &UserProfile, out: &mut W) -> Result<()> {
    writeln!(out, "Welcome {}!", user.username)?;
    writeln!(out, "Your id is {}", display_id(&user.id))?;
    writeln!(out, "Your email is {}", user.email)?;
    writeln!(out, "Your role is {}", user.role)?;
    writeln!(out, "Your created at is {}", user.created_at)?;
    writeln!(out, "Your updated at is {}", user.updated_at)?;
    Ok(())
}

fn print_profile<W: Write>(user: &UserProfile, out: &mut W) -> Result<()> {
    writeln!(out, "User id is {}", display_id(&user.id))?;
    writeln!(out, "User username is {}", user.username)?;
    writeln!(out, "User email is {}", user.email)?;
    writeln!(out, "User role is {}", user.role)?;
    writeln!(out, "User created at is {}", user.created_at)?;
    writeln!(out, "User updated at is {}", user.updated_at)?;
    Ok(())
}

fn print_summary<W: Write>(user: &UserSummary, out: &mut W) -> Result<()> {
    writeln!(out, "User id: {}", display_id(&user.id))?;
    writeln!(out, "User username: {}", user.username)?;
    writeln!(out, "User email: {}", user.email)?;
    writeln!(out, "User Admin role: {}", user.is_admin)?;
    writeln!(out)?;
    Ok(())
}

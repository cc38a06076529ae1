// Command line surface. Flags are parsed by clap and then resolved once
// into a single `Command`; the UI layer matches on that.

use crate::account::{Credentials, SignupProfile};
use crate::api::DEFAULT_BASE_URL;
use crate::session::default_token_path;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

/// Command-line client for the Safe Courier API
#[derive(Parser, Debug)]
#[command(name = "safe-courier", version, about, long_about = None)]
pub struct Cli {
    /// Login to Safe Courier
    #[arg(short = 'l', long = "login", num_args = 2, value_names = ["USER", "PASS"])]
    pub login: Option<Vec<String>>,

    /// Signup to Safe Courier
    #[arg(
        short = 's',
        long = "signup",
        num_args = 5,
        value_names = ["USER", "EMAIL", "PASS", "FIRST", "LAST"]
    )]
    pub signup: Option<Vec<String>>,

    /// Get the logged-in user's info
    #[arg(short = 'g', long = "get-user")]
    pub get_user: bool,

    /// Get all users
    #[arg(short = 'u', long = "get-users")]
    pub get_users: bool,

    /// Get user by id
    #[arg(short = 'i', long = "get-user-by-id", value_name = "ID")]
    pub get_user_by_id: Option<String>,

    /// Get user by username
    #[arg(short = 'n', long = "get-user-by-username", value_name = "NAME")]
    pub get_user_by_username: Option<String>,

    /// Get all parcels
    #[arg(short = 'p', long = "get-parcels")]
    pub get_parcels: bool,

    /// Logout
    #[arg(short = 'o', long = "logout")]
    pub logout: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// API base URL, including the version prefix
    #[arg(long, env = "SAFE_COURIER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Token file [default: ~/.safe_courier_token]
    #[arg(long, env = "SAFE_COURIER_TOKEN_FILE", value_name = "PATH")]
    pub token_file: Option<PathBuf>,
}

/// The one operation a run performs.
#[derive(Debug, Clone)]
pub enum Command {
    Login(Credentials),
    Signup(SignupProfile),
    GetSelf,
    ListUsers,
    GetUserById(String),
    GetUserByUsername(String),
    Logout,
    ListParcels,
}

/// Where the client talks to and where it keeps its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token_file: PathBuf,
}

impl Cli {
    /// Resolve the flags into one command. When several are given the first
    /// in this order wins: login, signup, get-user, get-users,
    /// get-user-by-id, get-user-by-username, logout, get-parcels.
    pub fn selected_command(&self) -> Option<Command> {
        if let Some([username, password]) = self.login.as_deref() {
            return Some(Command::Login(Credentials {
                username: username.clone(),
                password: password.clone(),
            }));
        }
        if let Some([username, email, password, first_name, last_name]) = self.signup.as_deref() {
            return Some(Command::Signup(SignupProfile {
                username: username.clone(),
                email: email.clone(),
                password: password.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
            }));
        }
        if self.get_user {
            return Some(Command::GetSelf);
        }
        if self.get_users {
            return Some(Command::ListUsers);
        }
        if let Some(id) = &self.get_user_by_id {
            return Some(Command::GetUserById(id.clone()));
        }
        if let Some(name) = &self.get_user_by_username {
            return Some(Command::GetUserByUsername(name.clone()));
        }
        if self.logout {
            return Some(Command::Logout);
        }
        if self.get_parcels {
            return Some(Command::ListParcels);
        }
        None
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            token_file: self.token_file.clone().unwrap_or_else(default_token_path),
        }
    }

    /// Default log level; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

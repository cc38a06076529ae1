// Library root
// -----------
// The binary (`main.rs`) parses flags and hands the resolved command to
// `ui::run`. Everything that talks to the network or the token file lives
// in the library so it can be tested without a terminal.
//
// Module responsibilities:
// - `api`: blocking HTTP gateway to the Safe Courier backend.
// - `session`: bearer-token file plus its in-memory copy.
// - `account`: login, signup and logout.
// - `resources`: user lookups and parcel listing.
// - `cli`: clap flags, resolved into a single `Command`.
// - `ui`: runs a `Command` and prints the result.
pub mod account;
pub mod api;
pub mod cli;
pub mod error;
pub mod resources;
pub mod session;
pub mod ui;

#[cfg(test)]
mod testing;

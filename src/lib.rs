//! Board-game client whose moves are decided by an external authority.
//!
//! Pointer input becomes board cells ([`board::geometry`]), drags are
//! tracked by [`interaction::drag`], and every released drag is submitted
//! to a [`authority::MoveAuthority`] before the local board changes
//! ([`interaction::coordinator`]).

pub mod authority;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod interaction;
pub mod script;
pub mod server;
pub mod session;

//! JSON Lines persistence for the trade log and chat transcript.
//!
//! Records are appended to daily files (`trades_2024-05-01.jsonl`) and read
//! back at startup so history survives restarts.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{PersistenceError, PersistenceResult};
pub use reader::read_recent;
pub use writer::JsonLinesWriter;

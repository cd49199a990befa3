//! Chat assistant for the Flare trading dashboard.
//!
//! Messages are matched against an ordered list of regex intents
//! ([`parse_intent`]); [`ChatBot`] turns the intent into a reply, executing
//! simulated trades and bridge quotes on the way.

pub mod bot;
pub mod error;
pub mod intent;
mod replies;

pub use bot::{ChatBot, ChatReply};
pub use error::{ChatError, ChatResult};
pub use intent::{parse_intent, Intent};

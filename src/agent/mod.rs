//! Model-backed agents and the conversation they share during a run.

mod chat;
mod error;
mod roster;
mod session;
mod types;

#[allow(unused_imports)]
pub use chat::{ChatAgent, MAX_TOOL_ROUNDS};
#[allow(unused_imports)]
pub use error::AgentError;
#[allow(unused_imports)]
pub use roster::AgentRoster;
#[allow(unused_imports)]
pub use session::AgentSession;
#[allow(unused_imports)]
pub use types::{Agent, DynAgent};

#[cfg(test)]
mod tests;

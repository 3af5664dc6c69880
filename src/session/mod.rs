//! Session persistence and the authentication check that guards a run.

pub mod guard;
pub mod store;

pub use guard::{OperatorSignal, SessionGuard, SessionState, StdinSignal};
pub use store::SessionStore;

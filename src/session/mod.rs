//! Session persistence and the authentication state machine.

pub mod machine;
pub mod store;

pub use machine::{AuthBackend, AuthOutcome, SessionMachine, SessionState};
pub use store::SessionStore;

//! Screen state machines.
//!
//! Screens hold render data and return requests for the host to run;
//! they never perform I/O on their own except through the `async`
//! convenience methods that take the session store explicitly.

pub mod documents;
pub mod login;
pub mod shell;

pub use documents::{DocumentScreen, DocumentsView, FetchGeneration, FetchRequest};
pub use login::{LoginRequest, LoginScreen};
pub use shell::{Route, Screen, Shell, route_for};

use client_core::screens::{FetchRequest, Shell};

use common::BearerToken;

/// Everything the renderer reads.
#[derive(Debug)]
pub struct AppState {
    pub shell: Shell,
    pub should_quit: bool,
}

impl AppState {
    /// Mount the screen for `token`, returning the first fetch if a session
    /// was restored.
    pub fn start(token: Option<&BearerToken>) -> (Self, Option<FetchRequest>) {
        let (shell, fetch) = Shell::start(token);
        (
            Self {
                shell,
                should_quit: false,
            },
            fetch,
        )
    }
}

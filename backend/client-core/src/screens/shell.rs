//! Routing between the two screens based on session presence.

use super::documents::{DocumentScreen, FetchGeneration, FetchRequest};
use super::login::LoginScreen;

use crate::error::ClientError;

use common::BearerToken;
use models::DocumentList;

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Documents,
}

/// Documents when a token exists, Login otherwise.
pub fn route_for(token: Option<&BearerToken>) -> Route {
    match token {
        Some(_) => Route::Documents,
        None => Route::Login,
    }
}

#[derive(Debug)]
pub enum Screen {
    Login(LoginScreen),
    Documents(DocumentScreen),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Login(_) => Route::Login,
            Screen::Documents(_) => Route::Documents,
        }
    }
}

#[derive(Debug)]
pub struct Shell {
    screen: Screen,
}

impl Shell {
    /// Mount the screen matching `token`, returning the first fetch if the
    /// session is already authenticated.
    pub fn start(token: Option<&BearerToken>) -> (Self, Option<FetchRequest>) {
        let mut shell = Self {
            screen: Screen::Login(LoginScreen::new()),
        };
        let fetch = shell.sync(token);
        (shell, fetch)
    }

    /// Re-route after a session change.
    ///
    /// Switching screens always mounts a fresh one, so state from a previous
    /// visit (typed fields, errors, lists) never leaks into the next.
    pub fn sync(&mut self, token: Option<&BearerToken>) -> Option<FetchRequest> {
        match (route_for(token), self.screen.route()) {
            (Route::Login, Route::Login) => None,
            (Route::Login, Route::Documents) => {
                info!("Session ended, showing login screen");
                self.screen = Screen::Login(LoginScreen::new());
                None
            }
            (Route::Documents, Route::Documents) => self
                .documents_mut()
                .and_then(|documents| documents.observe_token(token)),
            (Route::Documents, Route::Login) => {
                info!("Session active, showing document screen");
                let mut documents = DocumentScreen::new();
                let fetch = documents.observe_token(token);
                self.screen = Screen::Documents(documents);
                fetch
            }
        }
    }

    /// Hand a fetch outcome to the document screen. Returns false when no
    /// current screen claims it.
    pub fn apply_fetch(
        &mut self,
        generation: &FetchGeneration,
        result: Result<DocumentList, ClientError>,
    ) -> bool {
        match &mut self.screen {
            Screen::Documents(documents) => documents.apply(generation, result),
            Screen::Login(_) => false,
        }
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn login_mut(&mut self) -> Option<&mut LoginScreen> {
        match &mut self.screen {
            Screen::Login(login) => Some(login),
            Screen::Documents(_) => None,
        }
    }

    pub fn documents_mut(&mut self) -> Option<&mut DocumentScreen> {
        match &mut self.screen {
            Screen::Documents(documents) => Some(documents),
            Screen::Login(_) => None,
        }
    }
}

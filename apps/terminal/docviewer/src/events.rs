//! Events fed into [`crate::update::update`].

use client_core::error::ClientError;
use client_core::screens::FetchGeneration;

use common::BearerToken;
use models::DocumentList;

use crossterm::event::Event;
use uuid::Uuid;

#[derive(Debug)]
pub enum UiEvent {
    /// Raw terminal input (keys, resize).
    Terminal(Event),

    /// The session token was set or cleared.
    SessionChanged(Option<BearerToken>),

    /// A login started by the screen with id `screen` completed.
    LoginFinished {
        screen: Uuid,
        result: Result<(), ClientError>,
    },

    /// A document fetch completed.
    FetchFinished {
        generation: FetchGeneration,
        result: Result<DocumentList, ClientError>,
    },
}

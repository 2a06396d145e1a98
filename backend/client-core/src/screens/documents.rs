//! Document screen state.
//!
//! A fetch is tagged with a [`FetchGeneration`]: the screen instance plus the
//! token it was dispatched with. Results are applied only while that
//! generation is still current, so a late response for an old token or a
//! screen that was left is dropped.

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::SessionStore;

use common::BearerToken;
use models::{Document, DocumentList};

use log::{debug, info, warn};
use uuid::Uuid;

pub const TITLE: &str = "Liste des documents";
pub const LOADING_MESSAGE: &str = "Chargement des documents…";
pub const LOGOUT_LABEL: &str = "Se déconnecter";
pub const LINK_LABEL: &str = "Voir";

/// Identity of one dispatched fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchGeneration {
    screen: Uuid,
    token: BearerToken,
}

impl FetchGeneration {
    pub fn screen(&self) -> Uuid {
        self.screen
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }
}

/// A fetch the host must run and report back through
/// [`DocumentScreen::apply`].
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub generation: FetchGeneration,
}

impl FetchRequest {
    pub fn token(&self) -> &BearerToken {
        &self.generation.token
    }

    /// Run the fetch. Does not touch any screen.
    pub async fn execute(&self, api: &ApiClient) -> Result<DocumentList, ClientError> {
        api.list_documents(self.token()).await
    }
}

/// What the screen shows, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentsView<'a> {
    Error(&'a str),
    Loading,
    Loaded(&'a [Document]),
}

#[derive(Debug)]
pub struct DocumentScreen {
    instance: Uuid,
    generation: Option<FetchGeneration>,
    error: Option<String>,
    documents: Option<Vec<Document>>,
    selected: usize,
    fetches_issued: usize,
}

impl Default for DocumentScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentScreen {
    pub fn new() -> Self {
        Self {
            instance: Uuid::new_v4(),
            generation: None,
            error: None,
            documents: None,
            selected: 0,
            fetches_issued: 0,
        }
    }

    pub fn instance(&self) -> Uuid {
        self.instance
    }

    /// React to the current session token.
    ///
    /// Returns a fetch exactly when a token is present and differs from the
    /// one the current generation was issued for. An absent token retires
    /// the current generation.
    pub fn observe_token(&mut self, token: Option<&BearerToken>) -> Option<FetchRequest> {
        let Some(token) = token else {
            if self.generation.take().is_some() {
                debug!("Token cleared, retiring document fetch generation");
            }
            return None;
        };

        if matches!(&self.generation, Some(current) if current.token == *token) {
            return None;
        }

        let generation = FetchGeneration {
            screen: self.instance,
            token: token.clone(),
        };

        self.generation = Some(generation.clone());
        self.error = None;
        self.documents = None;
        self.selected = 0;
        self.fetches_issued += 1;

        debug!("Dispatching document fetch #{}", self.fetches_issued);
        Some(FetchRequest { generation })
    }

    /// Apply a fetch outcome. Returns false when the outcome was stale and
    /// therefore dropped.
    pub fn apply(
        &mut self,
        generation: &FetchGeneration,
        result: Result<DocumentList, ClientError>,
    ) -> bool {
        if self.generation.as_ref() != Some(generation) {
            debug!("Dropping stale document fetch result");
            return false;
        }

        match result {
            Ok(list) => {
                info!("Loaded {} documents", list.len());
                self.documents = Some(list.documents);
            }
            Err(e) => {
                warn!("Document fetch failed ({}): {}", e.error_category(), e);
                self.error = Some(e.user_message());
            }
        }

        true
    }

    /// Sign out. The shell swaps this screen for the login screen once the
    /// session change is observed.
    pub fn logout(&mut self, session: &SessionStore) {
        self.generation = None;
        session.logout();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let count = self.documents.as_ref().map_or(0, Vec::len);
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_document(&self) -> Option<&Document> {
        match self.view() {
            DocumentsView::Loaded(documents) => documents.get(self.selected),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Render data
    // ------------------------------------------------------------------

    pub fn view(&self) -> DocumentsView<'_> {
        if let Some(error) = &self.error {
            return DocumentsView::Error(error);
        }
        match &self.documents {
            None => DocumentsView::Loading,
            Some(documents) => DocumentsView::Loaded(documents),
        }
    }

    pub fn current_generation(&self) -> Option<&FetchGeneration> {
        self.generation.as_ref()
    }

    /// Number of fetches this screen has dispatched.
    pub fn fetches_issued(&self) -> usize {
        self.fetches_issued
    }
}

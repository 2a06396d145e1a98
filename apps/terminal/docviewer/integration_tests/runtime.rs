//! Drives the reducer and effect runner against mocked endpoints, without a
//! terminal.

use docviewer::effects::UiEffect;
use docviewer::events::UiEvent;
use docviewer::runtime::{EffectRunner, InboxReceiver, SessionWatcher, inbox};
use docviewer::state::AppState;
use docviewer::update::update;

use client_core::api::ApiClient;
use client_core::config::AppConfig;
use client_core::screens::{DocumentsView, Route};
use client_core::session::SessionStore;
use client_core::storage::{KeyValueStorage, MemoryStorage};
use client_core::{PROJECT_ID, TOKEN_STORAGE_KEY};

use models::Document;

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH_PATH: &str = "/authentification/get-token";
const DOCUMENTS_PATH: &str = "/documents/download/";

/// Reducer, effect runner and session wired together like the TUI runtime.
struct Harness {
    state: AppState,
    runner: EffectRunner,
    inbox_rx: InboxReceiver,
    watcher: SessionWatcher,
    storage: Arc<MemoryStorage>,
}

impl Harness {
    fn start(server: &MockServer, storage: MemoryStorage) -> Self {
        let mut config = AppConfig::default();
        config.endpoints.auth_url = format!("{}{}", server.uri(), AUTH_PATH);
        config.endpoints.documents_url =
            format!("{}{}?project_id={}", server.uri(), DOCUMENTS_PATH, PROJECT_ID);

        let storage = Arc::new(storage);
        let api = ApiClient::new(&config).expect("Failed to build API client");
        let session = Arc::new(SessionStore::restore(api, storage.clone()));

        let watcher = SessionWatcher::new(session.subscribe());
        let (mut state, fetch) = AppState::start(session.token().as_ref());
        let (inbox_tx, inbox_rx) = inbox();
        let runner = EffectRunner::new(session, inbox_tx);
        runner.execute_all(&mut state, fetch.map(UiEffect::Fetch).into_iter().collect());

        Self {
            state,
            runner,
            inbox_rx,
            watcher,
            storage,
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        let effects = update(&mut self.state, event);
        self.runner.execute_all(&mut self.state, effects);
    }

    fn press(&mut self, key: KeyEvent) {
        self.dispatch(UiEvent::Terminal(Event::Key(key)));
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    /// Wait for the next task outcome and apply it, followed by any session
    /// change it caused.
    async fn settle_next(&mut self) {
        let event = self.inbox_rx.recv().await.expect("Inbox closed");
        self.dispatch(event);
        self.sync_session();
    }

    fn sync_session(&mut self) {
        if let Some(event) = self.watcher.poll() {
            self.dispatch(event);
        }
    }
}

async fn mount_auth(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_documents(server: &MockServer, token: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the whole sign-in path from key presses to a loaded list.
///
/// **WHY THIS MATTERS**: Exercises the inbox and session watch together,
/// exactly as the event loop does.
#[tokio::test]
async fn given_login_keys_when_runtime_settles_then_documents_loaded() {
    // GIVEN: Endpoints issuing T1 and listing one document for it
    let server = MockServer::start().await;
    mount_auth(&server, json!({ "access_token": "T1" })).await;
    mount_documents(
        &server,
        "T1",
        json!({ "documents": [{ "filename": "a.pdf", "url": "http://x/a.pdf" }] }),
    )
    .await;
    let mut harness = Harness::start(&server, MemoryStorage::new());
    assert_eq!(harness.state.shell.route(), Route::Login);

    // WHEN: Typing credentials and pressing Enter
    harness.type_text("a@b.com");
    harness.press(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    harness.type_text("x");
    harness.press(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    harness.settle_next().await;

    // THEN: The token is persisted and the document screen is fetching
    assert_eq!(
        harness.storage.get(TOKEN_STORAGE_KEY).unwrap().as_deref(),
        Some("T1")
    );
    assert_eq!(harness.state.shell.route(), Route::Documents);

    // WHEN: The fetch completes
    harness.settle_next().await;

    // THEN: One row is shown
    let documents = harness.state.shell.documents_mut().unwrap();
    assert_eq!(
        documents.view(),
        DocumentsView::Loaded(&[Document::new("a.pdf", "http://x/a.pdf")])
    );
}

/// **VALUE**: Verifies a response without a token keeps the login screen with
/// the fixed message.
#[tokio::test]
async fn given_response_without_token_when_runtime_settles_then_login_shows_message() {
    let server = MockServer::start().await;
    mount_auth(&server, json!({})).await;
    let mut harness = Harness::start(&server, MemoryStorage::new());

    harness.type_text("a@b.com");
    harness.press(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    harness.type_text("x");
    harness.press(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    harness.settle_next().await;

    let login = harness.state.shell.login_mut().expect("Should stay on login");
    assert_eq!(login.error(), Some("Token absent de la réponse."));
    assert!(!login.is_submitting());
}

/// **VALUE**: Verifies a restored session fetches at start and Ctrl+L logs out.
///
/// **BUG THIS CATCHES**: Would catch the logout effect clearing memory but
/// leaving the persisted token behind.
#[tokio::test]
async fn given_restored_session_when_logging_out_then_storage_cleared_and_login_shown() {
    // GIVEN: A persisted T1
    let server = MockServer::start().await;
    mount_documents(&server, "T1", json!({ "documents": [] })).await;
    let mut harness = Harness::start(
        &server,
        MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T1")]),
    );
    assert_eq!(harness.state.shell.route(), Route::Documents);
    harness.settle_next().await;
    assert_eq!(
        harness.state.shell.documents_mut().unwrap().view(),
        DocumentsView::Loaded(&[])
    );

    // WHEN: Pressing Ctrl+L
    harness.press(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
    harness.sync_session();

    // THEN: Signed out everywhere
    assert_eq!(harness.state.shell.route(), Route::Login);
    assert_eq!(harness.storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
}

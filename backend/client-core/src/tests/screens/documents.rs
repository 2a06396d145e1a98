// Unit tests for the document screen state machine

use crate::error::ClientError;
use crate::screens::documents::{DocumentScreen, DocumentsView};

use common::BearerToken;
use models::{Document, DocumentList};

fn token(raw: &str) -> BearerToken {
    BearerToken::from_non_empty(raw.to_string()).unwrap()
}

fn list(names: &[&str]) -> DocumentList {
    DocumentList {
        documents: names
            .iter()
            .map(|name| Document::new(*name, format!("https://files.example/{name}")))
            .collect(),
    }
}

/// **VALUE**: Verifies exactly one fetch per distinct token.
///
/// **WHY THIS MATTERS**: Re-renders must not hammer the listing endpoint.
///
/// **BUG THIS CATCHES**: Would catch a fetch on every observation.
#[test]
fn given_same_token_observed_twice_when_observing_then_only_one_fetch() {
    // GIVEN: A fresh document screen
    let mut screen = DocumentScreen::new();
    let t1 = token("T1");

    // WHEN: Observing the same token twice
    let first = screen.observe_token(Some(&t1));
    let second = screen.observe_token(Some(&t1));

    // THEN: Only the first observation fetches
    let first = first.expect("first observation should fetch");
    assert_eq!(first.token(), &t1);
    assert_eq!(first.generation.screen(), screen.instance());
    assert!(second.is_none());
    assert_eq!(screen.fetches_issued(), 1);
}

/// **VALUE**: Verifies a new token triggers a new fetch and resets state.
#[test]
fn given_loaded_list_when_token_changes_then_refetches_from_loading() {
    let mut screen = DocumentScreen::new();
    let first = screen.observe_token(Some(&token("T1"))).unwrap();
    assert!(screen.apply(&first.generation, Ok(list(&["a.pdf"]))));

    let second = screen.observe_token(Some(&token("T2")));

    assert!(second.is_some());
    assert_eq!(screen.fetches_issued(), 2);
    assert_eq!(screen.view(), DocumentsView::Loading);
}

/// **VALUE**: Verifies no fetch happens without a token.
#[test]
fn given_no_token_when_observing_then_no_fetch() {
    let mut screen = DocumentScreen::new();

    assert!(screen.observe_token(None).is_none());
    assert_eq!(screen.fetches_issued(), 0);
    assert!(screen.current_generation().is_none());
}

/// **VALUE**: Verifies a result for an older token is dropped.
///
/// **BUG THIS CATCHES**: Would catch a slow response for the previous user
/// overwriting the current user's list.
#[test]
fn given_token_replaced_when_old_result_arrives_then_result_dropped() {
    // GIVEN: A fetch for T1 superseded by a fetch for T2
    let mut screen = DocumentScreen::new();
    let old = screen.observe_token(Some(&token("T1"))).unwrap();
    let new = screen.observe_token(Some(&token("T2"))).unwrap();

    // WHEN: The T1 result arrives late
    let applied = screen.apply(&old.generation, Ok(list(&["old.pdf"])));

    // THEN: It is ignored and the screen still waits for T2
    assert!(!applied);
    assert_eq!(screen.view(), DocumentsView::Loading);

    assert!(screen.apply(&new.generation, Ok(list(&["new.pdf"]))));
    assert_eq!(
        screen.view(),
        DocumentsView::Loaded(&[Document::new("new.pdf", "https://files.example/new.pdf")])
    );
}

/// **VALUE**: Verifies a result from another screen instance is dropped.
#[test]
fn given_result_from_other_screen_when_applying_then_result_dropped() {
    let mut previous = DocumentScreen::new();
    let stale = previous.observe_token(Some(&token("T1"))).unwrap();

    let mut current = DocumentScreen::new();
    let _fresh = current.observe_token(Some(&token("T1"))).unwrap();

    assert!(!current.apply(&stale.generation, Ok(list(&["a.pdf"]))));
    assert_eq!(current.view(), DocumentsView::Loading);
}

/// **VALUE**: Verifies the error message takes priority in the view.
#[test]
fn given_failed_fetch_when_viewing_then_shows_server_message() {
    let mut screen = DocumentScreen::new();
    let request = screen.observe_token(Some(&token("T1"))).unwrap();

    screen.apply(
        &request.generation,
        Err(ClientError::from_response(401, br#"{"message": "expired"}"#)),
    );

    assert_eq!(screen.view(), DocumentsView::Error("expired"));
    assert!(screen.selected_document().is_none());
}

/// **VALUE**: Verifies an empty list is Loaded, not Loading.
#[test]
fn given_empty_list_when_viewing_then_loaded_with_no_rows() {
    let mut screen = DocumentScreen::new();
    let request = screen.observe_token(Some(&token("T1"))).unwrap();

    screen.apply(&request.generation, Ok(DocumentList::default()));

    assert_eq!(screen.view(), DocumentsView::Loaded(&[]));
}

/// **VALUE**: Verifies selection stays inside the list bounds.
#[test]
fn given_loaded_list_when_moving_selection_then_clamped_to_bounds() {
    let mut screen = DocumentScreen::new();
    let request = screen.observe_token(Some(&token("T1"))).unwrap();
    screen.apply(&request.generation, Ok(list(&["a.pdf", "b.pdf"])));

    screen.select_previous();
    assert_eq!(screen.selected_index(), 0);

    screen.select_next();
    screen.select_next();
    assert_eq!(screen.selected_index(), 1);
    assert_eq!(
        screen.selected_document().map(|d| d.filename.as_str()),
        Some("b.pdf")
    );
}

/// **VALUE**: Verifies an absent token retires the current generation.
#[test]
fn given_token_cleared_when_result_arrives_then_result_dropped() {
    let mut screen = DocumentScreen::new();
    let request = screen.observe_token(Some(&token("T1"))).unwrap();

    screen.observe_token(None);

    assert!(!screen.apply(&request.generation, Ok(list(&["a.pdf"]))));
}

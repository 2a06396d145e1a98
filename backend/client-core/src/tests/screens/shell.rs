// Unit tests for routing between screens

use crate::screens::shell::{Route, Screen, Shell, route_for};

use common::BearerToken;
use models::DocumentList;

fn token(raw: &str) -> BearerToken {
    BearerToken::from_non_empty(raw.to_string()).unwrap()
}

/// **VALUE**: Verifies the route depends only on token presence.
#[test]
fn given_token_presence_when_routing_then_documents_iff_token() {
    assert_eq!(route_for(None), Route::Login);
    assert_eq!(route_for(Some(&token("T1"))), Route::Documents);
}

/// **VALUE**: Verifies a restored session starts on documents with a fetch.
///
/// **WHY THIS MATTERS**: A returning user should not see the login form.
#[test]
fn given_restored_token_when_starting_then_documents_screen_with_fetch() {
    let t1 = token("T1");

    let (shell, fetch) = Shell::start(Some(&t1));

    assert_eq!(shell.route(), Route::Documents);
    assert_eq!(fetch.map(|f| f.token().clone()), Some(t1));
}

/// **VALUE**: Verifies a fresh start without a token shows login.
#[test]
fn given_no_token_when_starting_then_login_screen_without_fetch() {
    let (shell, fetch) = Shell::start(None);

    assert_eq!(shell.route(), Route::Login);
    assert!(fetch.is_none());
    assert!(matches!(shell.screen(), Screen::Login(_)));
}

/// **VALUE**: Verifies login then logout round-trips through fresh screens.
///
/// **BUG THIS CATCHES**: Would catch typed credentials surviving a logout.
#[test]
fn given_session_changes_when_syncing_then_fresh_screen_mounted() {
    // GIVEN: A login screen with typed text
    let (mut shell, _) = Shell::start(None);
    shell.login_mut().unwrap().set_username("a@b.co");

    // WHEN: A token appears
    let fetch = shell.sync(Some(&token("T1")));

    // THEN: Documents are shown and fetched
    assert_eq!(shell.route(), Route::Documents);
    assert!(fetch.is_some());

    // WHEN: The token is cleared
    assert!(shell.sync(None).is_none());

    // THEN: A blank login screen is mounted
    assert_eq!(shell.route(), Route::Login);
    assert_eq!(shell.login_mut().unwrap().username(), "");
}

/// **VALUE**: Verifies re-syncing with the same token does not refetch.
#[test]
fn given_same_token_when_syncing_twice_then_no_second_fetch() {
    let t1 = token("T1");
    let (mut shell, first) = Shell::start(Some(&t1));
    assert!(first.is_some());

    assert!(shell.sync(Some(&t1)).is_none());
    assert!(shell.sync(Some(&token("T2"))).is_some());
}

/// **VALUE**: Verifies a fetch outcome after logout is not applied.
#[test]
fn given_logged_out_when_fetch_result_arrives_then_not_applied() {
    let (mut shell, fetch) = Shell::start(Some(&token("T1")));
    let fetch = fetch.unwrap();

    shell.sync(None);

    assert!(!shell.apply_fetch(&fetch.generation, Ok(DocumentList::default())));
    assert_eq!(shell.route(), Route::Login);
}

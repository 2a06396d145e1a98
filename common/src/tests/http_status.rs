use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification boundaries.
///
/// **BUG THIS CATCHES**: Would catch off-by-one errors at 200/300/400/500/600.
#[test]
fn given_status_codes_when_classified_then_ranges_match() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());

    assert!(HttpStatusCode(401).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());
}

/// **VALUE**: Verifies the generic message used when the server supplies none.
///
/// **WHY THIS MATTERS**: This text is shown on screen when a response has no
/// `message` field.
#[test]
fn given_status_when_building_failure_message_then_includes_code() {
    assert_eq!(
        HttpStatusCode::from(500).failure_message(),
        "Request failed with status code 500"
    );
}

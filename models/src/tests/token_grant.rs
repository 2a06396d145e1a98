use crate::{ErrorBody, TokenGrant};

use serde_json::json;

/// **VALUE**: Verifies a grant with `access_token` yields that token.
#[test]
fn given_object_with_access_token_when_interpreted_then_token_is_returned() {
    let grant = TokenGrant::from_value(json!({"access_token": "T1", "token_type": "bearer"}));

    assert!(grant.has_token());
    assert_eq!(grant.into_token().unwrap().as_str(), "T1");
}

/// **VALUE**: Verifies every shape without a usable token yields no token.
///
/// **WHY THIS MATTERS**: Any response that does not carry a non-empty string
/// `access_token` must be treated as a missing-token failure.
///
/// **BUG THIS CATCHES**: Would catch empty strings, numbers or non-object
/// bodies being accepted as tokens.
#[test]
fn given_shapes_without_token_when_interpreted_then_no_token() {
    let shapes = [
        json!({}),
        json!({"access_token": ""}),
        json!({"access_token": 42}),
        json!({"access_token": null}),
        json!({"token": "T1"}),
        json!(["T1"]),
        json!("T1"),
        json!(null),
    ];

    for shape in shapes {
        let grant = TokenGrant::from_value(shape.clone());
        assert!(!grant.has_token(), "{shape} should carry no token");
        assert!(grant.into_token().is_none());
    }
}

/// **VALUE**: Verifies server-supplied error messages are extracted.
#[test]
fn given_error_body_with_message_when_parsed_then_message_is_available() {
    let body = ErrorBody::from_bytes(br#"{"message": "expired", "code": 401}"#);

    assert_eq!(body.message(), Some("expired"));
}

/// **VALUE**: Verifies bodies without a usable message yield none.
///
/// **BUG THIS CATCHES**: Would catch HTML error pages or empty messages being
/// shown instead of the generic failure text.
#[test]
fn given_bodies_without_message_when_parsed_then_no_message() {
    let bodies: [&[u8]; 5] = [
        b"",
        b"<html>Bad Gateway</html>",
        br#"{"message": ""}"#,
        br#"{"detail": "nope"}"#,
        br#"["expired"]"#,
    ];

    for body in bodies {
        assert!(ErrorBody::from_bytes(body).into_message().is_none());
    }
}

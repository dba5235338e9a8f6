use serde_json::json;
use wiremock::matchers::any;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::spawn_app;
use crate::helpers::spawn_app_with_unreachable_datastore;

#[tokio::test]
async fn join_ok() {
    let app = spawn_app().await;

    Mock::given(path("/rest/v1/waitlist"))
        .and(method("POST"))
        .and(header("Prefer", "return=minimal"))
        .and(body_json(json!([{ "alias": "john_doe", "email": "john@example.com" }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.datastore_server)
        .await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 200);

    // the overlay opens in its confirmation state
    let html = resp.text().await.unwrap();
    assert!(html.contains("ALIAS RESERVED!"));
    assert!(html.contains("john_doe@receiptIt.app"));
}

#[tokio::test]
async fn page_shell_keeps_alias_case() {
    let app = spawn_app().await;

    Mock::given(body_json(json!([{ "alias": "John.Doe", "email": "john@example.com" }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.datastore_server)
        .await;

    let resp = app
        .post_waitlist(&[("alias", "John.Doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 200);
}

/// Invalid input is answered with 400 and the first failing rule's message,
/// and never reaches the datastore
#[tokio::test]
async fn join_invalid() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.datastore_server)
        .await;

    for (form, msg) in [
        (vec![], "Please enter an alias"),
        (vec![("email", "john@example.com")], "Please enter an alias"),
        (
            vec![("alias", ""), ("email", "john@example.com")],
            "Please enter an alias",
        ),
        (
            vec![("alias", "john doe"), ("email", "john@example.com")],
            "Alias can only contain letters, numbers, dots, hyphens, and underscores",
        ),
        (
            vec![("alias", "john+doe"), ("email", "")],
            "Alias can only contain letters, numbers, dots, hyphens, and underscores",
        ),
        (vec![("alias", "john_doe")], "Please enter your email"),
        (
            vec![("alias", "john_doe"), ("email", "john@example")],
            "Please enter a valid email address",
        ),
        (
            vec![("alias", "john_doe"), ("email", "john @example.com")],
            "Please enter a valid email address",
        ),
    ] {
        let resp = app.post_waitlist(&form).await;
        assert_eq!(resp.status().as_u16(), 400, "{form:?}");
        let html = resp.text().await.unwrap();
        assert!(html.contains(msg), "{form:?} should say {msg:?}");
        assert!(!html.contains("ALIAS RESERVED!"));
    }
}

#[tokio::test]
async fn failed_join_keeps_typed_values() {
    let app = spawn_app().await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "not-an-email")])
        .await;
    assert_eq!(resp.status().as_u16(), 400);

    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"value="john_doe""#));
    assert!(html.contains(r#"value="not-an-email""#));
    // something was typed, so the floating CTA posts again instead of scrolling
    assert!(html.contains(r#"data-cta="resubmit""#));
}

#[tokio::test]
async fn alias_conflict() {
    let app = spawn_app().await;
    app.reject_inserts_on("waitlist_alias_key").await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 409);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("That alias is already taken"));
}

#[tokio::test]
async fn email_conflict() {
    let app = spawn_app().await;
    app.reject_inserts_on("waitlist_email_key").await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 409);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("You are already on the list"));
}

#[tokio::test]
async fn email_conflict_with_alias_in_the_address() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "details": "Key (email)=(alias.fan@example.com) already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint \"waitlist_email_key\"",
        })))
        .expect(1)
        .mount(&app.datastore_server)
        .await;

    let resp = app
        .post_waitlist(&[("alias", "email_fan"), ("email", "alias.fan@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 409);
    let html = resp.text().await.unwrap();
    assert!(html.contains("You are already on the list"));
    assert!(!html.contains("That alias is already taken"));
}

#[tokio::test]
async fn unattributed_conflict_blames_alias() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(409))
        .mount(&app.datastore_server)
        .await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 409);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("That alias is already taken"));
}

#[tokio::test]
async fn datastore_failure() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.datastore_server)
        .await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 500);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("Something went wrong. Please try again."));
}

#[tokio::test]
async fn unreachable_datastore_is_unexpected_error() {
    let app = spawn_app_with_unreachable_datastore().await;

    let resp = app
        .post_waitlist(&[("alias", "john_doe"), ("email", "john@example.com")])
        .await;
    assert_eq!(resp.status().as_u16(), 500);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("An unexpected error occurred. Please try again."));
}

#[tokio::test]
async fn retry_after_failure_succeeds() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.datastore_server)
        .await;
    app.accept_inserts().await;

    let form = [("alias", "john_doe"), ("email", "john@example.com")];
    assert_eq!(app.post_waitlist(&form).await.status().as_u16(), 500);
    assert_eq!(app.post_waitlist(&form).await.status().as_u16(), 200);
}

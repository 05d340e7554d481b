//! Message endpoints against a mock realm.

mod common;

use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use zulip_api_rs::{Anchor, Error, GetMessagesOptions, MessageUpdate, Narrow, PropagateMode, Recipient};

use common::{client, form, requests};

#[tokio::test]
async fn send_to_stream_returns_message_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "msg": "",
            "id": 4321
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client(&server)
        .messages()
        .send(&Recipient::stream("general", "lunch"), "Pizza today?")
        .await
        .unwrap();
    assert_eq!(id, 4321);

    let body = form(&requests(&server).await[0]);
    assert_eq!(body["type"], "stream");
    assert_eq!(body["to"], "general");
    assert_eq!(body["topic"], "lunch");
    assert_eq!(body["content"], "Pizza today?");
}

#[tokio::test]
async fn send_direct_encodes_recipient_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "success", "msg": "", "id": 1 })))
        .mount(&server)
        .await;

    client(&server)
        .messages()
        .send(&Recipient::direct(["iago@example.com", "hamlet@example.com"]), "hi")
        .await
        .unwrap();

    let body = form(&requests(&server).await[0]);
    assert_eq!(body["type"], "private");
    assert_eq!(body["to"], r#"["iago@example.com","hamlet@example.com"]"#);
}

#[tokio::test]
async fn send_without_recipients_sends_nothing() {
    let server = MockServer::start().await;
    let err = client(&server)
        .messages()
        .send(&Recipient::Direct(Vec::new()), "hello?")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRecipients(_)));
    assert!(requests(&server).await.is_empty());
}

#[tokio::test]
async fn send_to_missing_stream_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "result": "error",
            "msg": "Stream 'nowhere' does not exist",
            "code": "STREAM_DOES_NOT_EXIST"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .messages()
        .send(&Recipient::stream("nowhere", "x"), "hi")
        .await
        .unwrap_err();
    assert_eq!(err.api_message(), Some("Stream 'nowhere' does not exist"));
}

#[tokio::test]
async fn get_decodes_message_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/messages"))
        .and(query_param("anchor", "first_unread"))
        .and(query_param("num_before", "5"))
        .and(query_param("num_after", "5"))
        .and(query_param("narrow", r#"[["stream","general"]]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "msg": "",
            "found_anchor": true,
            "messages": [{
                "id": 10,
                "sender_id": 3,
                "sender_email": "iago@example.com",
                "sender_full_name": "Iago",
                "content": "<p>hi</p>",
                "subject": "lunch",
                "timestamp": 1700000000,
                "type": "stream",
                "stream_id": 7,
                "display_recipient": "general",
                "reactions": []
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .messages()
        .get(&GetMessagesOptions {
            anchor: Anchor::FirstUnread,
            num_before: 5,
            num_after: 5,
            narrow: Narrow::empty().stream("general"),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(page.found_anchor);
    assert_eq!(page.messages.len(), 1);
    let message = &page.messages[0];
    assert_eq!(message.topic, "lunch");
    assert_eq!(message.stream_id, Some(7));
    assert_eq!(message.timestamp.timestamp(), 1_700_000_000);
    assert!(message.extra.contains_key("reactions"));
}

#[tokio::test]
async fn render_returns_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/messages/render"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "msg": "",
            "rendered": "<p><strong>bold</strong></p>"
        })))
        .mount(&server)
        .await;

    let html = client(&server).messages().render("**bold**").await.unwrap();
    assert_eq!(html, "<p><strong>bold</strong></p>");
}

#[tokio::test]
async fn update_patches_topic_and_mode() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/messages/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "success", "msg": "" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .messages()
        .update(
            99,
            &MessageUpdate {
                topic: Some("dinner".into()),
                propagate_mode: Some(PropagateMode::ChangeAll),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let body = form(&requests(&server).await[0]);
    assert_eq!(body["topic"], "dinner");
    assert_eq!(body["propagate_mode"], "change_all");
    assert!(!body.contains_key("content"));
}

#[tokio::test]
async fn empty_update_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = client(&server)
        .messages()
        .update(99, &MessageUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingParameter(_)));
    assert!(requests(&server).await.is_empty());
}

#[tokio::test]
async fn delete_hits_message_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/messages/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "success", "msg": "" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).messages().delete(99).await.unwrap();
}

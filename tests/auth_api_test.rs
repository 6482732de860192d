//! End-to-end tests for the auth API over a loopback server with a spy
//! access control service.

use std::sync::Arc;

use auth_api::access::AuthFlags;
use auth_api::model::{ApiResponse, ResultCode};
use serde_json::{json, Value};

mod common;

use common::SpyAccessControl;

#[tokio::test]
async fn create_users_batch_reaches_facade_once_in_order() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("http://{addr}/users"))
        .json(&json!([{ "name": "alice" }, { "name": "bob" }]))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 200_000);

    let calls = spy.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, "create_users");
    assert_eq!(calls[0].payload[0]["name"], "alice");
    assert_eq!(calls[0].payload[1]["name"], "bob");
    drop(calls);

    shutdown.trigger();
}

#[tokio::test]
async fn malformed_single_body_never_reaches_facade() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .put(format!("http://{addr}/user"))
        .body("this is not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 400_001);
    assert!(body["info"].as_str().unwrap().contains("malformed"));
    assert_eq!(spy.call_count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn empty_body_never_reaches_facade() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client.put(format!("http://{addr}/user")).send().await.unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 400_001);
    assert_eq!(spy.call_count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn malformed_batch_element_never_reaches_facade() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    // second element has the wrong shape for a user name
    let res = client
        .post(format!("http://{addr}/users"))
        .json(&json!([{ "name": "alice" }, { "name": 42 }, { "name": "carol" }]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 400_001);
    assert_eq!(spy.call_count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn group_detail_passes_id_reference() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/usergroup/detail?id=g1&unrelated=zzz"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let calls = spy.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, "get_group");
    assert_eq!(calls[0].payload["id"], "g1");
    drop(calls);

    shutdown.trigger();
}

#[tokio::test]
async fn repeated_query_key_keeps_last_value_end_to_end() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    client
        .get(format!("http://{addr}/users?id=1&id=2"))
        .send()
        .await
        .unwrap();

    let calls = spy.calls.lock().unwrap();
    assert_eq!(calls[0].op, "get_users");
    assert_eq!(calls[0].payload["id"], "2");
    drop(calls);

    shutdown.trigger();
}

#[tokio::test]
async fn facade_code_passes_through_unchanged() {
    let spy = Arc::new(SpyAccessControl::new());
    spy.set_reply(ApiResponse::with_info(
        ResultCode::NOT_FOUND,
        "group g9 not found",
    ));
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/usergroup/detail?id=g9"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 404_001);
    assert_eq!(body["info"], "group g9 not found");

    shutdown.trigger();
}

#[tokio::test]
async fn token_header_propagates_to_facade_context() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    client
        .put(format!("http://{addr}/user/token/refresh"))
        .header("X-Auth-Token", "tok-42")
        .json(&json!({ "id": "u1" }))
        .send()
        .await
        .unwrap();

    let calls = spy.calls.lock().unwrap();
    assert_eq!(calls[0].op, "reset_user_token");
    assert_eq!(calls[0].token.as_deref(), Some("tok-42"));
    drop(calls);

    // the same request without the header reaches the facade anonymously
    client
        .put(format!("http://{addr}/user/token/refresh"))
        .json(&json!({ "id": "u1" }))
        .send()
        .await
        .unwrap();

    let calls = spy.calls.lock().unwrap();
    assert_eq!(calls[1].token, None);
    drop(calls);

    shutdown.trigger();
}

#[tokio::test]
async fn auth_status_reports_enforcement_flags() {
    let spy = Arc::new(SpyAccessControl::with_flags(AuthFlags {
        console_open: true,
        client_open: false,
    }));
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/auth/status"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 200_000);
    assert_eq!(body["options"]["auth"], "true");
    assert_eq!(body["options"]["console_open"], "true");
    assert_eq!(body["options"]["client_open"], "false");
    // status queries flags only; no operation call is recorded
    assert_eq!(spy.call_count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn strategy_batch_update_routes_to_facade() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .put(format!("http://{addr}/auth/strategies"))
        .json(&json!([
            { "id": "s1", "comment": "tighten" },
            { "id": "s2", "action": "READ_ONLY" }
        ]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let calls = spy.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, "update_strategies");
    assert_eq!(calls[0].payload[1]["action"], "READ_ONLY");
    drop(calls);

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_route_is_not_an_envelope_error() {
    let spy = Arc::new(SpyAccessControl::new());
    let (addr, shutdown) = common::spawn_server(spy.clone()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/no/such/route"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(spy.call_count(), 0);

    shutdown.trigger();
}

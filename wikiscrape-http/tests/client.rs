use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use wikiscrape_http::{HttpClient, HttpError, RequestOpts};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Serialize)]
struct Ping<'a> {
    msg: &'a str,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Pong {
    reply: String,
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/", server.uri()))
        .expect("valid base")
        .with_retries(2)
}

#[tokio::test]
async fn get_text_returns_html_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Nico_Ditch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ditch</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let html = client_for(&server)
        .get_text("wiki/Nico_Ditch", RequestOpts::default())
        .await
        .unwrap();
    assert_eq!(html, "<html>ditch</html>");
}

#[tokio::test]
async fn absolute_urls_bypass_the_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = HttpClient::new("https://en.wikipedia.org/").unwrap();
    let opts = RequestOpts {
        allow_absolute: true,
        ..Default::default()
    };
    let body = client
        .get_text(&format!("{}/elsewhere", server.uri()), opts)
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get_text("flaky", RequestOpts::default())
        .await
        .unwrap();
    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such page"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_text("missing", RequestOpts::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        HttpError::Api { message, .. } => assert_eq!(message, "no such page"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn post_json_sends_bearer_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(serde_json::json!({ "msg": "hi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": "hi" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&format!("{}/v1/", server.uri())).unwrap();
    let pong: Pong = client
        .post_json("echo", Some(" sk-test "), &Ping { msg: "hi" })
        .await
        .unwrap();
    assert_eq!(
        pong,
        Pong {
            reply: "hi".to_string()
        }
    );
}

#[tokio::test]
async fn undecodable_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_json::<Pong>("garbage", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Decode(_, ref snippet) if snippet == "not json"));
}

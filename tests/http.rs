use mockito::Matcher;
use nuntium::{
    Address, AoMessage, Channel, ChannelName, CountryIso, Credentials, NuntiumClient,
    NuntiumError, SendAo,
};
use serde_json::json;

// base64("acc/app:pw")
const BASIC_AUTH: &str = "Basic YWNjL2FwcDpwdw==";

fn client(server: &mockito::ServerGuard) -> NuntiumClient {
    let credentials = Credentials::new("acc", "app", "pw").unwrap();
    NuntiumClient::new(server.url(), credentials).unwrap()
}

#[tokio::test]
async fn create_channel_sends_configuration_pairs_and_basic_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/channels.json")
        .match_header("authorization", BASIC_AUTH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "name": "foo",
            "kind": "qst_server",
            "protocol": "sms",
            "configuration": [{"name": "password", "value": "bar"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "name": "foo",
                "kind": "qst_server",
                "protocol": "sms",
                "configuration": [{"name": "password", "value": "bar"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let channel = Channel::new(ChannelName::new("foo").unwrap(), "qst_server", "sms")
        .with_configuration("password", "bar");
    let created = client(&server)
        .create_channel(&channel)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.name.as_str(), "foo");
    assert_eq!(created.configuration["password"], "bar");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_country_sentinel_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/countries/zz.json")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#""invalid country""#)
        .create_async()
        .await;

    let found = client(&server)
        .get_country(&CountryIso::new("zz").unwrap())
        .await
        .unwrap();

    assert_eq!(found, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn send_ao_reads_nuntium_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/acc/app/send_ao")
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("to".into(), "sms://2".into()),
            Matcher::UrlEncoded("body".into(), "hi!".into()),
        ]))
        .with_status(200)
        .with_header("X-Nuntium-Id", "42")
        .with_header("X-Nuntium-Token", "tok")
        .with_header("X-Nuntium-Guid", "guid-1")
        .create_async()
        .await;

    let message = AoMessage::new(Address::new("sms://2").unwrap()).body("hi!");
    let sent = client(&server).send_ao(&SendAo::one(message)).await.unwrap();

    assert_eq!(sent.id.as_deref(), Some("42"));
    assert_eq!(sent.token.as_deref(), Some("tok"));
    assert_eq!(sent.guid.as_deref(), Some("guid-1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_ao_sends_token_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/acc/app/get_ao.json")
        .match_query(Matcher::UrlEncoded("token".into(), "tok".into()))
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body(r#"[{"guid": "g1", "token": "tok", "state": "queued"}]"#)
        .create_async()
        .await;

    let records = client(&server)
        .get_ao(&nuntium::AoToken::new("tok").unwrap())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].state.as_deref(), Some("queued"));
    mock.assert_async().await;
}

#[tokio::test]
async fn update_channel_rejection_is_http_status_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PUT", "/api/channels/foo.json")
        .with_status(422)
        .with_body(r#"{"kind": ["is not included in the list"]}"#)
        .create_async()
        .await;

    let channel = Channel::new(ChannelName::new("foo").unwrap(), "bogus", "sms");
    let err = client(&server).update_channel(&channel).await.unwrap_err();

    assert!(matches!(err, NuntiumError::HttpStatus { status: 422, .. }));
}

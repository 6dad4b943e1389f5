//! Integration tests for `JitbitClient` against a wiremock server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use jitbit::client::{JitbitClient, StatusCode};
use jitbit::config::Config;
use jitbit::diagnostics::{Level, MemoryDiagnostics};
use jitbit::error::JitbitError;
use jitbit::models::{
    AssetListParams, AssetUpdate, CustomFieldValue, NewAsset, NewComment, NewCompany, NewTicket,
    NewUser, Priority, TicketListMode, TicketListParams, TicketUpdate, UserListMode,
    UserListParams, UserUpdate,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::matchers::{any, basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERNAME: &str = "helpdesk-admin";
const PASSWORD: &str = "s3cret-pass";

// ============================================================================
// Test Utilities
// ============================================================================

fn test_config(server: &MockServer) -> Config {
    Config::new(server.uri(), USERNAME, PASSWORD).unwrap()
}

/// Accepts the credential check sent during construction.
async fn mount_credential_check(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/Authorization"))
        .and(basic_auth(USERNAME, PASSWORD))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Starts a server that accepts the credential check and returns a connected client.
async fn connected() -> (MockServer, JitbitClient, MemoryDiagnostics) {
    let server = MockServer::start().await;
    mount_credential_check(&server).await;
    let diagnostics = MemoryDiagnostics::new();
    let client = JitbitClient::with_diagnostics(&test_config(&server), Arc::new(diagnostics.clone()))
        .await
        .unwrap();
    (server, client, diagnostics)
}

/// Fails the test on drop if any further request reaches the server.
async fn forbid_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

fn assert_validation<T: std::fmt::Debug>(result: Result<T, JitbitError>, needle: &str) {
    let err = result.unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {err:?}");
    assert!(
        err.to_string().contains(needle),
        "{err} does not mention {needle}"
    );
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn test_construction_succeeds_when_credentials_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Authorization"))
        .and(basic_auth(USERNAME, PASSWORD))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = JitbitClient::new(&test_config(&server)).await.unwrap();
    assert_eq!(client.base_url(), server.uri());
}

#[tokio::test]
async fn test_construction_fails_when_credentials_rejected() {
    for status in [401u16, 403, 404, 500] {
        let server = MockServer::start().await;
        Mock::given(path("/api/Authorization"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let diagnostics = MemoryDiagnostics::new();
        let err = JitbitClient::with_diagnostics(&test_config(&server), Arc::new(diagnostics.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, JitbitError::Authentication { .. }), "{err:?}");
        assert!(err.to_string().contains(&status.to_string()));
        assert!(!err.to_string().contains(PASSWORD));
        assert_eq!(diagnostics.warnings().len(), 1);
    }
}

#[tokio::test]
async fn test_construction_fails_when_server_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = Config::new(format!("http://127.0.0.1:{port}"), USERNAME, PASSWORD).unwrap();
    let err = JitbitClient::new(&config).await.unwrap_err();

    assert!(matches!(err, JitbitError::Authentication { .. }), "{err:?}");
    assert!(err.to_string().contains("could not reach"), "{err}");
    assert!(!err.to_string().contains(PASSWORD));
}

/// Answers the construction-time credential check by hand, then stops
/// listening, so every later call fails at the transport level.
async fn client_for_vanished_server() -> (JitbitClient, MemoryDiagnostics) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accept = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        socket.shutdown().await.ok();
    });

    let config = Config::new(format!("http://{addr}"), USERNAME, PASSWORD).unwrap();
    let diagnostics = MemoryDiagnostics::new();
    let client = JitbitClient::with_diagnostics(&config, Arc::new(diagnostics.clone()))
        .await
        .unwrap();
    accept.await.unwrap();
    (client, diagnostics)
}

#[tokio::test]
async fn test_transport_failure_returns_null_equivalents() {
    let (client, diagnostics) = client_for_vanished_server().await;

    assert_eq!(client.get_ticket(7).await.unwrap(), None);
    assert_eq!(client.list_companies().await, None);
    let ticket = NewTicket::new(8, "Subject", "Body", Priority::Normal);
    assert_eq!(client.create_ticket(&ticket).await.unwrap(), None);
    assert!(!client.update_user(&UserUpdate::new(1)).await.unwrap());
    assert_eq!(client.add_subscriber(5, 9).await.unwrap(), None);

    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 5);
    for warning in &warnings {
        assert_eq!(warning.status, None);
        assert!(warning.message.starts_with("Request failed"), "{}", warning.message);
        assert!(!warning.message.contains(PASSWORD));
    }
    assert_eq!(warnings[0].endpoint, "Ticket");
    assert_eq!(warnings[3].endpoint, "UpdateUser");
}

#[tokio::test]
async fn test_short_password_leaves_diagnostics_intact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Authorization"))
        .and(basic_auth(USERNAME, "p"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/UpdateUser"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = Config::new(server.uri(), USERNAME, "p").unwrap();
    let diagnostics = MemoryDiagnostics::new();
    let client = JitbitClient::with_diagnostics(&config, Arc::new(diagnostics.clone()))
        .await
        .unwrap();

    assert!(!client.update_user(&UserUpdate::new(1)).await.unwrap());
    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message,
        "Jitbit update of user 1 failed, response code was 404, "
    );
}

// ============================================================================
// Tickets
// ============================================================================

#[tokio::test]
async fn test_list_tickets_sends_only_given_filters() {
    let (server, client, _) = connected().await;
    Mock::given(method("GET"))
        .and(path("/api/Tickets"))
        .and(query_param("mode", "handledbyme"))
        .and(query_param("statusId", "3"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"IssueID": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let params = TicketListParams::new()
        .with_mode(TicketListMode::HandledByMe)
        .with_status(3)
        .with_offset(1);
    let tickets = client.list_tickets(&params).await.unwrap();

    assert_eq!(tickets, Some(json!([{"IssueID": 1}])));
    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.url.query(), Some("mode=handledbyme&statusId=3&offset=1"));
}

#[tokio::test]
async fn test_list_tickets_rejects_offset_zero_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    let params = TicketListParams::new().with_offset(0);
    assert_validation(client.list_tickets(&params).await, "offset");
}

#[test]
fn test_ticket_mode_outside_set_is_rejected() {
    let err = "mine".parse::<TicketListMode>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("unanswered"));
}

#[tokio::test]
async fn test_get_ticket_decodes_object() {
    let (server, client, _) = connected().await;
    Mock::given(method("GET"))
        .and(path("/api/Ticket"))
        .and(query_param("id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 7, "subject": "x"}"#))
        .mount(&server)
        .await;

    let ticket = client.get_ticket(7).await.unwrap();
    assert_eq!(ticket, Some(json!({"id": 7, "subject": "x"})));
}

#[tokio::test]
async fn test_get_ticket_returns_none_on_404() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(path("/api/Ticket"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    assert_eq!(client.get_ticket(7).await.unwrap(), None);

    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].endpoint, "Ticket");
    assert_eq!(warnings[0].status, Some(404));
}

#[tokio::test]
async fn test_get_ticket_returns_none_on_invalid_json() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(path("/api/Ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    assert_eq!(client.get_ticket(7).await.unwrap(), None);
    assert!(diagnostics.warnings()[0].message.contains("invalid JSON"));
}

#[tokio::test]
async fn test_create_ticket_returns_numeric_id() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/Ticket"))
        .and(basic_auth(USERNAME, PASSWORD))
        .and(body_string_contains("categoryId=8"))
        .and(body_string_contains("subject=Printer+jam"))
        .and(body_string_contains("priorityId=1"))
        .and(body_string_contains("tags=hardware"))
        .respond_with(ResponseTemplate::new(200).set_body_string("4821"))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = NewTicket::new(8, "Printer jam", "Paper stuck in tray 2", Priority::High)
        .with_tag("hardware");
    let id = client.create_ticket(&ticket).await.unwrap();

    assert_eq!(id, Some(4821));
    let events = diagnostics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::Info);
}

#[tokio::test]
async fn test_create_ticket_returns_none_on_non_numeric_body() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/Ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Category not found"))
        .mount(&server)
        .await;

    let ticket = NewTicket::new(99, "Subject", "Body", Priority::Normal);
    assert_eq!(client.create_ticket(&ticket).await.unwrap(), None);

    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].endpoint, "Ticket");
    assert!(warnings[0].message.contains("Category not found"));
}

#[tokio::test]
async fn test_create_ticket_rejects_missing_fields_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    let cases = [
        (NewTicket::new(0, "s", "b", Priority::Normal), "category_id"),
        (NewTicket::new(1, "s", "", Priority::Normal), "body"),
        (NewTicket::new(1, " ", "b", Priority::Normal), "subject"),
    ];
    for (ticket, field) in cases {
        assert_validation(client.create_ticket(&ticket).await, field);
    }
    assert_validation("9".parse::<Priority>(), "priority");
}

#[tokio::test]
async fn test_update_ticket_reports_status() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/UpdateTicket"))
        .and(body_string_contains("id=5"))
        .and(body_string_contains("statusId=3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client
        .update_ticket(&TicketUpdate::new(5).with_status(3))
        .await
        .unwrap());
    assert_validation(client.update_ticket(&TicketUpdate::new(5)).await, "at least one");
}

#[tokio::test]
async fn test_set_custom_field_returns_remote_status() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/SetCustomField"))
        .and(body_string_contains("ticketId=5"))
        .and(body_string_contains("fieldId=12"))
        .and(body_string_contains("value=true"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/SetCustomField"))
        .and(body_string_contains("fieldId=13"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let ok = client
        .set_custom_field(5, 12, &CustomFieldValue::Bool(true))
        .await
        .unwrap();
    assert_eq!(ok, Some(StatusCode::OK));

    let bad = client
        .set_custom_field(5, 13, &CustomFieldValue::OptionId(4))
        .await
        .unwrap();
    assert_eq!(bad, Some(StatusCode::BAD_REQUEST));
    assert_eq!(diagnostics.warnings().len(), 1);
}

#[tokio::test]
async fn test_add_subscriber_returns_remote_status() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/AddSubscriber"))
        .and(body_string_contains("ticketId=5"))
        .and(body_string_contains("userId=9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_eq!(
        client.add_subscriber(5, 9).await.unwrap(),
        Some(StatusCode::OK)
    );
    assert_validation(client.add_subscriber(5, 0).await, "user_id");
}

#[tokio::test]
async fn test_merge_tickets_rejects_missing_id_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    assert_validation(client.merge_tickets(0, 5).await, "id");
    assert_validation(client.merge_tickets(5, 0).await, "id2");
    assert_validation(client.merge_tickets(5, 5).await, "itself");
}

#[tokio::test]
async fn test_merge_tickets_decodes_result() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/MergeTickets"))
        .and(body_string_contains("id=5"))
        .and(body_string_contains("id2=6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"merged": true})))
        .mount(&server)
        .await;

    assert_eq!(
        client.merge_tickets(5, 6).await.unwrap(),
        Some(json!({"merged": true}))
    );
}

#[tokio::test]
async fn test_add_comment() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/Comment"))
        .and(body_string_contains("forTechsOnly=true"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let comment = NewComment::new(5, "Checked the logs").techs_only();
    assert!(client.add_comment(&comment).await.unwrap());
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_list_users_sends_paging() {
    let (server, client, _) = connected().await;
    Mock::given(method("GET"))
        .and(path("/api/Users"))
        .and(query_param("count", "50"))
        .and(query_param("page", "2"))
        .and(query_param("listMode", "techs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"UserID": 3}])))
        .expect(1)
        .mount(&server)
        .await;

    let params = UserListParams::new()
        .with_count(50)
        .with_page(2)
        .with_list_mode(UserListMode::Techs);
    assert_eq!(
        client.list_users(&params).await.unwrap(),
        Some(json!([{"UserID": 3}]))
    );
}

#[tokio::test]
async fn test_list_users_rejects_page_zero_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    assert_validation(
        client.list_users(&UserListParams::new().with_page(0)).await,
        "page",
    );
    assert_validation("everyone".parse::<UserListMode>(), "list_mode");
}

#[tokio::test]
async fn test_get_user_by_email_encodes_address() {
    let (server, client, _) = connected().await;
    Mock::given(method("GET"))
        .and(path("/api/UserByEmail"))
        .and(query_param("email", "dalai+test@lama.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"UserID": 346})))
        .mount(&server)
        .await;

    assert_eq!(
        client.get_user_by_email("dalai+test@lama.org").await.unwrap(),
        Some(json!({"UserID": 346}))
    );
    assert_validation(client.get_user_by_email("").await, "email");
}

#[tokio::test]
async fn test_get_user_by_email_rejects_malformed_address_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    assert_validation(client.get_user_by_email("no-at-sign").await, "email");
    assert_validation(client.get_user_by_email("@lama.org").await, "email");
}

#[tokio::test]
async fn test_create_user_returns_id() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/CreateUser"))
        .and(body_string_contains("username=dlama"))
        .and(body_string_contains("company=Monastery"))
        .and(body_string_contains("sendWelcomeEmail=false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("346"))
        .mount(&server)
        .await;

    let user = NewUser::new("dlama", "password123", "dalai@lama.org")
        .with_name("Dalai", "Lama")
        .with_company("Monastery");
    assert_eq!(client.create_user(&user).await.unwrap(), Some(346));
}

#[tokio::test]
async fn test_create_user_500_reports_possible_duplicate() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/CreateUser"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let user = NewUser::new("dlama", "password123", "dalai@lama.org").with_name("Dalai", "Lama");
    assert_eq!(client.create_user(&user).await.unwrap(), None);

    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("already exists"));
    assert!(warnings[0].message.contains("Dalai Lama"));
    assert!(!warnings[0].message.contains("password123"));
}

#[tokio::test]
async fn test_update_user_true_on_200() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/UpdateUser"))
        .and(body_string_contains("userId=346"))
        .and(body_string_contains("username=username_new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let update = UserUpdate::new(346).with_username("username_new");
    assert!(client.update_user(&update).await.unwrap());
}

#[tokio::test]
async fn test_update_user_false_on_error_status() {
    for status in [404u16, 500] {
        let (server, client, diagnostics) = connected().await;
        Mock::given(method("POST"))
            .and(path("/api/UpdateUser"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        assert!(!client.update_user(&UserUpdate::new(346)).await.unwrap());
        assert_eq!(diagnostics.warnings()[0].status, Some(status));
    }
}

#[tokio::test]
async fn test_update_user_rejects_zero_id_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    assert_validation(client.update_user(&UserUpdate::new(0)).await, "user_id");
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn test_asset_writes() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/AssignAssetToUser"))
        .and(body_string_contains("assetId=4"))
        .and(body_string_contains("userId=9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/AddAssetToTicket"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    assert!(client.assign_asset_to_user(4, 9).await.unwrap());
    assert!(!client.add_asset_to_ticket(4, 5).await.unwrap());
}

#[tokio::test]
async fn test_create_asset_returns_id() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/Asset"))
        .and(body_string_contains("modelName=Latitude+7440"))
        .and(body_string_contains("manufacturer=Dell"))
        .and(body_string_contains("type=Laptop"))
        .and(body_string_contains("serialNumber=SN-42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("77"))
        .expect(1)
        .mount(&server)
        .await;

    let asset = NewAsset::new("Latitude 7440", "Dell", "Laptop").with_serial_number("SN-42");
    assert_eq!(client.create_asset(&asset).await.unwrap(), Some(77));
}

#[tokio::test]
async fn test_create_asset_rejects_missing_fields_without_request() {
    let (server, client, _) = connected().await;
    forbid_requests(&server).await;

    assert_validation(
        client.create_asset(&NewAsset::new("M", "", "Laptop")).await,
        "manufacturer",
    );
    assert_validation(
        client.update_asset(&AssetUpdate::new(4)).await,
        "at least one",
    );
    assert_validation(
        client.update_asset(&AssetUpdate::new(0).with_location("HQ")).await,
        "asset id",
    );
}

#[tokio::test]
async fn test_update_asset_reports_status() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/UpdateAsset"))
        .and(body_string_contains("id=4"))
        .and(body_string_contains("location=HQ"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/UpdateAsset"))
        .and(body_string_contains("id=5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client
        .update_asset(&AssetUpdate::new(4).with_location("HQ"))
        .await
        .unwrap());
    assert!(!client
        .update_asset(&AssetUpdate::new(5).with_quantity(2))
        .await
        .unwrap());
    assert_eq!(diagnostics.warnings()[0].status, Some(500));
}

// ============================================================================
// Companies
// ============================================================================

#[tokio::test]
async fn test_create_company_returns_id() {
    let (server, client, _) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/Company"))
        .and(body_string_contains("name=Monastery"))
        .and(body_string_contains("emailDomain=lama.org"))
        .respond_with(ResponseTemplate::new(200).set_body_string("12"))
        .mount(&server)
        .await;

    let company = NewCompany::new("Monastery").with_email_domain("lama.org");
    assert_eq!(client.create_company(&company).await.unwrap(), Some(12));
}

#[tokio::test]
async fn test_create_company_failure_and_validation() {
    let (server, client, diagnostics) = connected().await;
    Mock::given(method("POST"))
        .and(path("/api/Company"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Company exists"))
        .mount(&server)
        .await;

    assert_eq!(
        client.create_company(&NewCompany::new("Monastery")).await.unwrap(),
        None
    );
    let warnings = diagnostics.warnings();
    assert_eq!(warnings[0].endpoint, "Company");
    assert!(warnings[0].message.contains("Company exists"));

    assert_validation(client.create_company(&NewCompany::new(" ")).await, "name");
}

// ============================================================================
// Read endpoints echo the remote document
// ============================================================================

#[tokio::test]
async fn test_every_read_endpoint_returns_remote_document() {
    let server = MockServer::start().await;
    let document = json!({
        "items": [{"id": 1, "name": "first"}, {"id": 2, "name": null}],
        "total": 2,
        "nested": {"flag": true, "ratio": 0.5}
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
        .mount(&server)
        .await;

    let client = JitbitClient::new(&test_config(&server)).await.unwrap();
    let expected = Some(document);

    assert_eq!(client.list_tickets(&TicketListParams::new()).await.unwrap(), expected);
    assert_eq!(client.get_ticket(1).await.unwrap(), expected);
    assert_eq!(client.get_ticket_custom_fields(1).await.unwrap(), expected);
    assert_eq!(client.get_stats().await, expected);
    assert_eq!(client.list_comments(1).await.unwrap(), expected);
    assert_eq!(client.list_comment_templates().await, expected);
    assert_eq!(client.list_categories().await, expected);
    assert_eq!(client.get_custom_fields_for_category(1).await.unwrap(), expected);
    assert_eq!(client.get_techs_for_category(1).await.unwrap(), expected);
    assert_eq!(client.list_users(&UserListParams::new()).await.unwrap(), expected);
    assert_eq!(client.get_user_by_email("a@b.c").await.unwrap(), expected);
    assert_eq!(client.list_companies().await, expected);
    assert_eq!(client.list_articles().await, expected);
    assert_eq!(client.get_article(5632).await.unwrap(), expected);
    assert_eq!(client.list_assets(&AssetListParams::new()).await.unwrap(), expected);
    assert_eq!(client.get_asset(1).await.unwrap(), expected);

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    for expected_path in [
        "/api/Authorization",
        "/api/Tickets",
        "/api/categories",
        "/api/Article/5632",
        "/api/CustomFieldsForCategory",
        "/api/Assets",
    ] {
        assert!(paths.iter().any(|p| p == expected_path), "missing {expected_path}");
    }
}

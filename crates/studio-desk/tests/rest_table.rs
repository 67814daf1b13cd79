use serde_json::{json, Value};
use studio_desk::backend::{BackendError, Collection, RestClient, RestTable, Table};
use studio_desk::config::BackendConfig;
use studio_desk::model::{Customer, CustomerDraft, LeadStatus, RecordId, SalesLead};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "service-key";

fn client(server: &MockServer) -> RestClient {
    RestClient::new(server.uri(), Some(API_KEY.to_string()), "public").expect("client builds")
}

fn lead_row(id: RecordId, company: &str) -> Value {
    json!({
        "id": id,
        "company_name": company,
        "status": "warm",
        "created_at": "2026-10-01T09:00:00Z",
        "updated_at": "2026-10-02T09:00:00Z",
    })
}

#[tokio::test]
async fn list_sends_auth_headers_and_newest_first_order() {
    let server = MockServer::start().await;
    let id = RecordId::generate();
    Mock::given(method("GET"))
        .and(path("/rest/v1/sales_leads"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", API_KEY))
        .and(header("authorization", "Bearer service-key"))
        .and(header("accept-profile", "public"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([lead_row(id, "Echo Lab")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    let leads = table.list().await.expect("list succeeds");

    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].id, id);
    assert_eq!(leads[0].company_name, "Echo Lab");
    assert_eq!(leads[0].status, LeadStatus::Warm);
    assert!(leads[0].email.is_none());
}

#[tokio::test]
async fn get_filters_by_id_and_maps_empty_result_to_none() {
    let server = MockServer::start().await;
    let id = RecordId::generate();
    Mock::given(method("GET"))
        .and(path("/rest/v1/sales_leads"))
        .and(query_param("id", format!("eq.{id}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    assert!(table.get(id).await.expect("get succeeds").is_none());

    let collection = Collection::new(RestTable::<SalesLead>::new(client(&server)));
    assert!(matches!(
        collection.get(id).await,
        Err(BackendError::NotFound)
    ));
}

#[tokio::test]
async fn create_posts_validated_row_and_returns_representation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/customers"))
        .and(header("prefer", "return=representation"))
        .and(header("content-profile", "public"))
        .respond_with(|request: &wiremock::Request| {
            let row: Value = serde_json::from_slice(&request.body).expect("json row");
            ResponseTemplate::new(201).set_body_json(json!([row]))
        })
        .expect(1)
        .mount(&server)
        .await;

    let customers: Collection<Customer> =
        Collection::new(RestTable::<Customer>::new(client(&server)));
    let created = customers
        .create(CustomerDraft {
            full_name: "  Noor Hendriks ".to_string(),
            email: Some("noor@example.test".to_string()),
            phone: None,
            company: None,
            notes: None,
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.full_name, "Noor Hendriks");
    assert_eq!(created.email.as_deref(), Some("noor@example.test"));
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let customers: Collection<Customer> =
        Collection::new(RestTable::<Customer>::new(client(&server)));
    let result = customers
        .create(CustomerDraft {
            full_name: String::new(),
            email: None,
            phone: None,
            company: None,
            notes: None,
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn bulk_insert_posts_a_single_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/sales_leads"))
        .respond_with(|request: &wiremock::Request| {
            let rows: Value = serde_json::from_slice(&request.body).expect("json rows");
            ResponseTemplate::new(201).set_body_json(rows)
        })
        .expect(1)
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    let rows: Vec<SalesLead> = ["A", "B"]
        .into_iter()
        .map(|company| lead_row(RecordId::generate(), company))
        .map(|row| serde_json::from_value(row).expect("valid row"))
        .collect();

    let stored = table.insert_many(rows).await.expect("bulk insert succeeds");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].company_name, "B");
    assert!(table.insert_many(Vec::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_with_empty_representation_is_not_found() {
    let server = MockServer::start().await;
    let id = RecordId::generate();
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/sales_leads"))
        .and(query_param("id", format!("eq.{id}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    let lead: SalesLead = serde_json::from_value(lead_row(id, "Ghost")).unwrap();
    assert!(matches!(
        table.update(lead).await,
        Err(BackendError::NotFound)
    ));
}

#[tokio::test]
async fn delete_reports_missing_rows() {
    let server = MockServer::start().await;
    let present = RecordId::generate();
    let missing = RecordId::generate();
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/sales_leads"))
        .and(query_param("id", format!("eq.{present}").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([lead_row(present, "Gone")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/sales_leads"))
        .and(query_param("id", format!("eq.{missing}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    table.delete(present).await.expect("delete succeeds");
    assert!(matches!(
        table.delete(missing).await,
        Err(BackendError::NotFound)
    ));
}

#[tokio::test]
async fn error_statuses_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/sales_leads"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sales_leads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    let lead: SalesLead = serde_json::from_value(lead_row(RecordId::generate(), "Dup")).unwrap();
    assert!(matches!(table.insert(lead).await, Err(BackendError::Conflict)));

    match table.list().await {
        Err(BackendError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database is down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sales_leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .mount(&server)
        .await;

    let table = RestTable::<SalesLead>::new(client(&server));
    assert!(matches!(table.list().await, Err(BackendError::Decode(_))));
}

#[tokio::test]
async fn backend_config_without_url_yields_no_client() {
    let config = BackendConfig::default();
    assert!(RestClient::from_config(&config).unwrap().is_none());
}

#[tokio::test]
async fn settings_row_saved_through_rest_uses_fixed_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/workspace_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/workspace_settings"))
        .and(body_json_has_nil_id())
        .respond_with(|request: &wiremock::Request| {
            let row: Value = serde_json::from_slice(&request.body).expect("json row");
            ResponseTemplate::new(201).set_body_json(json!([row]))
        })
        .expect(1)
        .mount(&server)
        .await;

    let config = BackendConfig {
        url: Some(server.uri()),
        api_key: None,
        schema: "public".to_string(),
    };
    let backend = studio_desk::backend::Backend::from_config(&config).expect("backend builds");

    let defaults = backend.settings.load().await.expect("load succeeds");
    assert_eq!(defaults.currency, "EUR");

    let saved = backend
        .settings
        .save(studio_desk::model::SettingsDraft::default())
        .await
        .expect("save succeeds");
    assert!(saved.id.0.is_nil());
}

fn body_json_has_nil_id() -> impl wiremock::Match {
    struct NilId;
    impl wiremock::Match for NilId {
        fn matches(&self, request: &wiremock::Request) -> bool {
            serde_json::from_slice::<Value>(&request.body)
                .map(|row| row["id"] == json!("00000000-0000-0000-0000-000000000000"))
                .unwrap_or(false)
        }
    }
    NilId
}

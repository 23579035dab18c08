//! E2E tests for the keyword deployment backed by a PostgREST catalogue.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gs_assistant::classifier::RuleBasedClassifier;
use gs_assistant::formatter::templates;
use gs_assistant::router::Router;
use gs_store::{RestStore, RestStoreConfig};

fn router_for(server: &MockServer) -> Router {
    let store = RestStore::new(RestStoreConfig::new(server.uri(), "anon-key")).unwrap();
    Router::new(Arc::new(RuleBasedClassifier::new()), None, Arc::new(store))
}

#[tokio::test]
async fn e2e_lookup_through_postgrest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/service"))
        .and(query_param("title", "ilike.*driving license*"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "Driving License",
            "description": "Apply for a driving license",
            "department": {
                "title": "Department of Motor Traffic",
                "email": "info@dmt.gov.lk",
                "phone_no": "0112033333"
            },
            "required_doc_for_service": [
                {"is_mandatory": true, "document_type": {"doc_type": "National Identity Card"}},
                {"is_mandatory": false, "document_type": {"doc_type": "Medical Certificate"}}
            ]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let reply = router_for(&server)
        .reply("What documents are required for a driving license?")
        .await
        .unwrap();

    assert!(reply.starts_with("Driving License\n\nRequired Documents:\n"));
    assert!(reply.contains("1. National Identity Card (Required)\n"));
    assert!(reply.contains("2. Medical Certificate (Optional)\n"));
    assert!(reply.contains("Contact: info@dmt.gov.lk | 0112033333"));
    assert!(reply.contains("Service Description: Apply for a driving license"));
}

#[tokio::test]
async fn e2e_postgrest_outage_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let ctx = router_for(&server)
        .handle("documents needed for passport")
        .await
        .unwrap();

    assert!(ctx.has_error());
    assert_eq!(ctx.response(), Some(templates::SERVICE_LOOKUP_FAILED));
}

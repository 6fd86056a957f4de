use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn mock_marketplace(server: &MockServer) -> Marketplace {
    Marketplace {
        name: "Mock Store".to_owned(),
        product_url: format!("{}/dp/", server.uri()),
    }
}

fn fast_client() -> RequestClient {
    RequestClient::new(5, 0..1).unwrap()
}

fn asin() -> Asin {
    Asin::parse("B0ABCDEFGH").unwrap()
}

#[tokio::test]
async fn product_page_fetch_hits_the_dp_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0ABCDEFGH"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>product</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fast_client()
        .fetch_product_page(&mock_marketplace(&server), &asin())
        .await
        .unwrap();
    assert_eq!(body, "<html>product</html>");
}

#[tokio::test]
async fn non_200_becomes_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0ABCDEFGH"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fast_client()
        .fetch_product_page(&mock_marketplace(&server), &asin())
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
}

#[tokio::test]
async fn offers_fetch_targets_the_aod_endpoint_as_xhr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gp/aod/ajax/ref=dp_aod_NEW_mbc"))
        .and(query_param("asin", "B0ABCDEFGH"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div>offers</div>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fast_client()
        .fetch_offers_page(&mock_marketplace(&server), &asin())
        .await
        .unwrap();
    assert_eq!(body, "<div>offers</div>");
}

#[tokio::test]
async fn requests_carry_a_pooled_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    fast_client()
        .fetch_product_page(&mock_marketplace(&server), &asin())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let ua = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(ua.starts_with("Mozilla/5.0"), "got UA: {ua}");
}

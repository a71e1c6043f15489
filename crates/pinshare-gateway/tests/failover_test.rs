//! Failover retrieval against local stand-in gateways.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use pinshare_core::config::gateway::{GatewayConfig, GatewayEndpoint};
use pinshare_gateway::{GatewayFetcher, GatewayResolver};

const CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

async fn spawn_gateways() -> String {
    let app = Router::new()
        .route(
            "/down/{cid}",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "unavailable") }),
        )
        .route("/up/{cid}", get(|| async { "hello from ipfs" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn config(base: &str, paths: &[(&str, &str)]) -> GatewayConfig {
    GatewayConfig {
        gateways: paths
            .iter()
            .map(|(name, path)| GatewayEndpoint::new(*name, format!("{base}/{path}/")))
            .collect(),
        fetch_timeout_seconds: 5,
        ..GatewayConfig::default()
    }
}

#[tokio::test]
async fn test_falls_back_to_next_gateway() {
    let base = spawn_gateways().await;
    let config = config(&base, &[("primary", "down"), ("mirror", "up")]);

    let resolver = GatewayResolver::new(&config).expect("resolver");
    let fetcher = GatewayFetcher::new(&config).expect("fetcher");

    let content = fetcher
        .fetch_first(&resolver.all_urls(CID))
        .await
        .expect("mirror should answer");

    assert_eq!(content.gateway, "mirror");
    assert_eq!(&content.body[..], b"hello from ipfs");
}

#[tokio::test]
async fn test_all_gateways_failing_is_an_error() {
    let base = spawn_gateways().await;
    let config = config(&base, &[("a", "down"), ("b", "down")]);

    let resolver = GatewayResolver::new(&config).expect("resolver");
    let fetcher = GatewayFetcher::new(&config).expect("fetcher");

    let err = fetcher
        .fetch_first(&resolver.all_urls(CID))
        .await
        .expect_err("every gateway is down");

    assert_eq!(err.kind, pinshare_core::error::ErrorKind::ExternalService);
    assert!(err.message.contains("a: HTTP 503"));
    assert!(err.message.contains("b: HTTP 503"));
}

#[tokio::test]
async fn test_empty_url_list_rejected() {
    let fetcher = GatewayFetcher::new(&GatewayConfig::default()).expect("fetcher");
    assert!(fetcher.fetch_first(&[]).await.is_err());
}

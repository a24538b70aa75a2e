//! Shared utilities for integration testing.

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use region_redirect::config::{CarrierConfig, CatalogConfig, ServerConfig};
use region_redirect::http::HttpServer;
use tempfile::TempDir;
use tower::ServiceExt;

pub const DATABASE: &str = "\
1.0.0.0\t1.0.0.255\t中国–天津–天津–南开区\t联通
1.0.1.0 1.0.1.255 中国–天津–天津–和平区 移动
1.0.2.0   1.0.2.255   中国–天津–天津–河西区   电信

1.0.3.0 1.0.3.255 中国–天津–天津–河东区
1.0.3.0 1.0.3.255 中国–天津–天津–河东区 铁通
2.0.0.0 2.0.0.255 中国–北京–北京–海淀区 联通
";

/// A database file in a directory that lives as long as the returned guard.
pub fn write_database(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ipdata.txt");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

pub fn test_catalog() -> CatalogConfig {
    CatalogConfig {
        area_marker: "–天津–".into(),
        carriers: vec![
            CarrierConfig::new("unicom", "联通", "https://cdn.example.com/tjcu.txt"),
            CarrierConfig::new("mobile", "移动", "https://cdn.example.com/tjcm.txt"),
            CarrierConfig::new("telecom", "电信", "https://cdn.example.com/tjct.txt"),
        ],
        area_fallback_url: "https://cdn.example.com/tianjin.txt".into(),
        generic_url: "https://cdn.example.com/iptv.txt".into(),
    }
}

pub fn test_config(database: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.database.path = database.to_path_buf();
    config.catalog = test_catalog();
    config
}

/// Send a GET with the given headers through the full middleware stack.
pub async fn get(config: ServerConfig, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().uri("/tv.php");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::empty()).unwrap();

    HttpServer::new(config).router().oneshot(request).await.unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
}

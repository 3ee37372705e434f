use galaxy_core::ScanConfig;
use galaxy_server::Router;
use std::fs;
use tempfile::TempDir;
use tiny_http::Method;

fn router_for(temp: &TempDir) -> Router {
    Router::new(ScanConfig::new(temp.path()))
}

#[test]
fn test_scan_endpoint_returns_manifest() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("photos")).unwrap();
    fs::write(temp.path().join("photos/a.jpg"), vec![0u8; 10]).unwrap();

    let reply = router_for(&temp).handle(&Method::Get, "/api/scan");
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type, "application/json");

    let json: serde_json::Value = serde_json::from_slice(&reply.body).unwrap();
    assert_eq!(json["folders"][0]["folderPath"], "photos");
    assert_eq!(json["folders"][0]["entries"][0]["category"], "image");
    assert!(json["scannedAt"].is_string());
}

#[test]
fn test_reindex_reflects_new_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("one.txt"), "1").unwrap();
    let router = router_for(&temp);

    let first: serde_json::Value =
        serde_json::from_slice(&router.handle(&Method::Get, "/api/scan").body).unwrap();
    fs::write(temp.path().join("two.txt"), "22").unwrap();
    let second: serde_json::Value =
        serde_json::from_slice(&router.handle(&Method::Get, "/api/reindex").body).unwrap();

    assert_eq!(first["stats"]["totalFiles"], 1);
    assert_eq!(second["stats"]["totalFiles"], 2);
}

#[test]
fn test_missing_root_is_404() {
    let temp = TempDir::new().unwrap();
    let router = Router::new(ScanConfig::new(temp.path().join("nope")));

    let reply = router.handle(&Method::Get, "/api/scan");
    assert_eq!(reply.status, 404);
    assert!(reply.body_text().contains("not found"));
}

#[test]
fn test_index_without_viewer() {
    let temp = TempDir::new().unwrap();
    let reply = router_for(&temp).handle(&Method::Get, "/");

    assert_eq!(reply.status, 200);
    assert!(reply.body_text().contains("/api/scan"));
}

#[test]
fn test_index_serves_viewer() {
    let temp = TempDir::new().unwrap();
    let viewer = temp.path().join("viewer.html");
    fs::write(&viewer, "<html>galaxy</html>").unwrap();

    let router = router_for(&temp).with_viewer(Some(viewer));
    let reply = router.handle(&Method::Get, "/index.html");

    assert_eq!(reply.status, 200);
    assert!(reply.content_type.starts_with("text/html"));
    assert_eq!(reply.body_text(), "<html>galaxy</html>");
}

#[test]
fn test_unknown_path_and_method() {
    let temp = TempDir::new().unwrap();
    let router = router_for(&temp);

    assert_eq!(router.handle(&Method::Get, "/favicon.ico").status, 404);
    assert_eq!(router.handle(&Method::Delete, "/api/scan").status, 405);
}

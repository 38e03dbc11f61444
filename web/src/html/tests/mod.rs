use crate::{TestResult, test_app, util::api_url, util::app_url};
use axum::{
    Router,
    body::{Body, Bytes, HttpBody},
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use libphotomap::presenter::Overlay;
use test_log::test;
use tower::Service;


const DATASET: &str = "Name,Description,Lat,Long,Pic_url\n\
    Pier,Old fishing pier,28.38,-81.57,http://x/pier.jpg\n\
    Nowhere,No latitude,,-81.50,\n\
    Lake,Big <b>lake</b>,28.40,-81.60,\n";

async fn body_string<B>(body: B) -> TestResult<String>
where
    B: HttpBody<Data = Bytes>,
    B::Error: std::error::Error + 'static,
{
    let bytes = body.collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

async fn request(app: &mut Router, method: &str, uri: &str) -> TestResult<(StatusCode, String)> {
    let req = Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())?;
    let response = app.as_service().call(req).await?;
    let status = response.status();
    Ok((status, body_string(response.into_body()).await?))
}

#[test(tokio::test)]
async fn test_root_redirect() {
    let (mut app, _state) = test_app(DATASET).await;
    let req = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .as_service()
        .call(req)
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").map(|v| v.as_bytes()),
        Some(app_url("/").as_bytes())
    );
}

#[test(tokio::test)]
async fn test_map_page() {
    let (mut app, _state) = test_app(DATASET).await;
    let (status, body) = request(&mut app, "GET", &app_url("/"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"id="map""#));
    assert!(body.contains(r#"id="overlay""#));
    assert!(body.contains(&api_url("/markers")));
    assert!(body.contains("2 locations"));
    // nothing is selected yet
    assert!(!body.contains("modal-title"));
}

#[test(tokio::test)]
async fn test_map_page_starts_hidden() {
    let (mut app, state) = test_app(DATASET).await;
    request(&mut app, "GET", &app_url("/overlay/0"))
        .await
        .expect("Failed to execute request");
    let (status, body) = request(&mut app, "GET", &app_url("/"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("modal-title"));
    // loading the page doesn't dismiss the current selection
    assert!(state.context.read().await.presenter().is_shown());
}

#[test(tokio::test)]
async fn test_map_page_failed_load() {
    let (mut app, state) = test_app(DATASET).await;
    let _ = state.context.write().await.install(Err(
        libphotomap::Error::ResourceUnavailable {
            resource: "http://example.com/sheet.csv".into(),
            reason: "connection refused".into(),
        },
    ));
    let (status, body) = request(&mut app, "GET", &app_url("/"))
        .await
        .expect("Failed to execute request");
    // the map itself is still shown
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"id="map""#));
    assert!(body.contains("status-failed"));

    let (status, body) = request(&mut app, "GET", &api_url("/markers"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("invalid json");
    assert_eq!(json["status"]["state"], "failed");
    assert_eq!(json["markers"].as_array().map(|a| a.len()), Some(0));
    assert!(json["bounds"].is_null());
}

#[test(tokio::test)]
async fn test_list_markers() {
    let (mut app, state) = test_app(DATASET).await;
    let (status, body) = request(&mut app, "GET", &api_url("/markers"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("invalid json");
    assert_eq!(json["status"]["state"], "ready");
    assert_eq!(
        json["markers"],
        serde_json::json!([
            {"id": 0, "lat": 28.38, "lng": -81.57, "label": "Pier"},
            {"id": 1, "lat": 28.40, "lng": -81.60, "label": "Lake"},
        ])
    );
    assert_eq!(json["bounds"]["south_west"]["latitude"], 28.38);
    assert_eq!(json["bounds"]["north_east"]["longitude"], -81.57);
    assert_eq!(json["skipped"][0]["line"], 3);
    assert_eq!(json["skipped"][0]["reason"], "missing latitude");

    // listing does not touch the overlay
    assert_eq!(
        state.context.read().await.presenter().state(),
        &Overlay::Hidden
    );
}

#[test(tokio::test)]
async fn test_show_marker() {
    let (mut app, _state) = test_app(DATASET).await;
    let (status, body) = request(&mut app, "GET", &api_url("/markers/0"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("invalid json");
    assert_eq!(json["label"], "Pier");
    assert_eq!(json["position"]["latitude"], 28.38);
    assert_eq!(json["record"]["description"], "Old fishing pier");
    assert_eq!(json["record"]["image_url"], "http://x/pier.jpg");

    let (status, _body) = request(&mut app, "GET", &api_url("/markers/42"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn test_map_config() {
    let (mut app, _state) = test_app(DATASET).await;
    let (status, body) = request(&mut app, "GET", &api_url("/config"))
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("invalid json");
    assert_eq!(json["zoom"], 13);
    assert_eq!(json["max_zoom"], 16);
    assert_eq!(json["permanent_labels"], true);
    assert!(
        json["tile_url"]
            .as_str()
            .is_some_and(|u| u.contains("{z}/{y}/{x}"))
    );
}

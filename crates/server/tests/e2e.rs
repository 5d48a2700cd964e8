use std::net::SocketAddr;

use configs::{AppConfig, ResetStrategy};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes;
use server::startup::build_state;

struct TestApp {
    base_url: String,
}

async fn start_server(store_path: std::path::PathBuf) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.path = store_path;
    cfg.storage.reset_strategy = ResetStrategy::Recreate;

    let state = build_state(&cfg).await;
    let app = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_click_elapsed_reset() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("e2e_timers_{}.json", Uuid::new_v4()));
    let app = start_server(path.clone()).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // one minute ago by the server's own clock
    let ts = now_ms() - 61_000;
    let res = c.post(format!("{}/coffee", app.base_url)).json(&json!({"timestamp": ts})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c
        .get(format!("{}/getElapsed", app.base_url))
        .query(&[("buttonLabel", "coffee")])
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["timestamp"], json!(ts));
    let text = body["elapsedText"].as_str().unwrap_or_default();
    assert!(text.starts_with("0h 1m "), "unexpected text {text}");
    assert!(text.ends_with("s since last click."));

    let on_disk: Value = serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?;
    assert_eq!(on_disk["coffee"], json!(ts));

    let res = c.post(format!("{}/resetAll", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["ok"], json!(true));

    let res = c
        .get(format!("{}/getElapsed", app.base_url))
        .query(&[("buttonLabel", "coffee")])
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"elapsedText": "Never clicked yet.", "timestamp": null}));

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn e2e_corrupt_store_starts_empty() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("e2e_corrupt_{}.json", Uuid::new_v4()));
    tokio::fs::write(&path, b"]]not json").await?;
    let app = start_server(path.clone()).await?;

    let res = reqwest::get(format!("{}/getElapsed?buttonLabel=coffee", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["timestamp"], Value::Null);

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

fn now_ms() -> i64 {
    use service::clock::{Clock, SystemClock};
    SystemClock.now_millis()
}

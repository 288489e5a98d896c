use std::net::SocketAddr;

use configs::{AppConfig, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server(strict: bool) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    cfg.records.strict_references = strict;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_enrollment_flow_on_sqlite() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let client = reqwest::Client::new();
    let url = |path: &str| format!("{}{}", app.base_url, path);

    let field: Value = client.post(url("/fields")).json(&json!({"name": "Sciences"})).send().await?.json().await?;
    let course: Value = client
        .post(url("/courses"))
        .json(&json!({"name": "Biology", "fieldId": field["id"]}))
        .send()
        .await?
        .json()
        .await?;
    let student: Value = client.post(url("/students")).json(&json!({"name": "Carla"})).send().await?.json().await?;

    let res = client
        .post(url("/subjects"))
        .json(&json!({"name": "Genetics", "courseId": course["id"], "studentId": student["id"]}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = client
        .post(url(&format!("/courses/{}/add-subjects", course["id"])))
        .json(&json!({"subjects": ["Cells", "Ecology"]}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let students: Value = client.get(url("/students")).send().await?.json().await?;
    assert_eq!(students[0]["courseName"], "Biology");
    assert_eq!(students[0]["registrationCode"], student["registrationCode"]);

    let courses: Value = client.get(url("/courses")).send().await?.json().await?;
    assert_eq!(courses[0]["subjects"].as_array().map(Vec::len), Some(3));

    let res = client.delete(url(&format!("/students/{}", student["id"]))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let gone: Value = client.get(url(&format!("/students/{}", student["id"]))).send().await?.json().await?;
    assert!(gone.is_null());

    let subjects: Value = client.get(url("/subjects")).send().await?.json().await?;
    assert_eq!(subjects.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn e2e_strict_references_reject_unknown_field() -> anyhow::Result<()> {
    let app = start_server(true).await?;
    let res = reqwest::Client::new()
        .post(format!("{}/courses", app.base_url))
        .json(&json!({"name": "Law", "fieldId": 999999}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_shutdown_signal_stops_server() -> anyhow::Result<()> {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(server::startup::serve(listener, app, async move {
        let _ = stop_rx.await;
    }));

    let res = reqwest::get(format!("http://{addr}/health")).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let _ = stop_tx.send(());
    handle.await??;
    assert!(reqwest::get(format!("http://{addr}/health")).await.is_err());
    Ok(())
}

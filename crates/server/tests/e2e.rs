use std::net::SocketAddr;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = server::startup::build_app(&configs::AppConfig::default());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn csv_form(filename: &str, content: &[u8]) -> anyhow::Result<Form> {
    let part = Part::bytes(content.to_vec()).file_name(filename.to_string()).mime_str("text/csv")?;
    Ok(Form::new().part("file", part))
}

#[tokio::test]
async fn e2e_upload_list_and_fetch() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let raw = b"timestamp,hr,spo2,pressao_sys\n10:00,72,98.5,120\n10:01,74,97.0,118\n";

    let res = c.post(format!("{}/api/upload-csv/", app.base_url))
        .multipart(csv_form("paciente.csv", raw)?)
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["rows"], 2);

    let res = c.get(format!("{}/api/files", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({"files": ["paciente.csv"]}));

    let res = c.get(format!("{}/api/data/paciente.csv", app.base_url)).send().await?;
    let rows = res.json::<Value>().await?;
    assert_eq!(rows[0], json!({"timestamp": "10:00", "hr": 72, "spo2": 98.5, "pressao_sys": 120}));
    assert_eq!(rows[1]["spo2"], json!(97.0));

    let res = c.get(format!("{}/api/data/paciente.csv?format=csv", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.bytes().await?.as_ref(), raw);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api/data/ausente.csv", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Arquivo não encontrado"}));
    Ok(())
}

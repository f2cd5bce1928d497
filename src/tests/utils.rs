use crate::db::{init_db, Database};
use astra::{Body, Request, Response};
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh throwaway database using the production schema. Every test gets
/// its own file (the collection cache is keyed by path, so tests never
/// see each other's data).
pub fn make_db(nombre: &str) -> Database {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before unix epoch")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("{nombre}_{nanos}.sqlite"));

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize DB");
    db
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::from(String::new()))
        .expect("failed to build request")
}

/// POST with an urlencoded form body, as the browser sends it.
pub fn post_form(uri: &str, cuerpo: &str) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(cuerpo.to_string()))
        .expect("failed to build request")
}

pub fn post_bytes(uri: &str, content_type: &str, cuerpo: Vec<u8>) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", content_type)
        .body(Body::from(cuerpo))
        .expect("failed to build request")
}

pub fn cuerpo_texto(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("failed to read response body");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn cuerpo_bytes(resp: &mut Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("failed to read response body");
    bytes
}

pub fn cabecera(resp: &Response, nombre: &str) -> String {
    resp.headers()
        .get(nombre)
        .and_then(|valor| valor.to_str().ok())
        .unwrap_or("")
        .to_string()
}

//! In-memory stand-in for the Aperture API endpoint.
//!
//! Every command is POSTed to `/api/v1/`. Like the real service, the HTTP
//! status is always 200 and the outcome travels in the envelope `code`.
//! `/broken/` answers with a truncated JSON body.

use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const API_PATH: &str = "/api/v1/";
pub const BROKEN_PATH: &str = "/broken/";
pub const TRUNCATED_BODY: &str = r#"{"code":"#;

pub const DEMO_USER: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo-password";
pub const DEMO_ACCOUNT_ID: i64 = 1001;

/// A command request as it arrives on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(rename = "APIUSER")]
    pub user: String,
    #[serde(rename = "APIPassword")]
    pub password: String,
    pub cmd: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "AccountID")]
    pub id: i64,
    pub name: String,
    pub hostname: String,
}

#[derive(Debug)]
pub struct Directory {
    pub user: String,
    pub password: String,
    pub accounts: HashMap<i64, Account>,
}

pub type Db = Arc<Directory>;

impl Default for Directory {
    fn default() -> Self {
        let demo = Account {
            id: DEMO_ACCOUNT_ID,
            name: "demo".to_string(),
            hostname: "www.demo.test".to_string(),
        };
        Self {
            user: DEMO_USER.to_string(),
            password: DEMO_PASSWORD.to_string(),
            accounts: HashMap::from([(demo.id, demo)]),
        }
    }
}

pub fn app() -> Router {
    app_with(Directory::default())
}

pub fn app_with(directory: Directory) -> Router {
    let db: Db = Arc::new(directory);
    Router::new()
        .route(API_PATH, post(dispatch))
        .route(BROKEN_PATH, post(broken))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reply(code: &str, message: &str, debug: &str) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("code".to_string(), json!(code));
    body.insert("message".to_string(), json!(message));
    body.insert("debug".to_string(), json!(debug));
    body
}

async fn dispatch(State(db): State<Db>, Json(req): Json<CommandRequest>) -> Json<Map<String, Value>> {
    if req.user != db.user || req.password != db.password {
        tracing::info!(user = %req.user, cmd = %req.cmd, "rejected credentials");
        return Json(reply("401", "invalid credentials", ""));
    }

    tracing::debug!(cmd = %req.cmd, "dispatching command");
    match req.cmd.as_str() {
        "AccountGet" => Json(account_get(&db, &req.params)),
        other => Json(reply("400", "unknown command", other)),
    }
}

fn account_get(db: &Directory, params: &Map<String, Value>) -> Map<String, Value> {
    let Some(id) = params.get("AccountID").and_then(Value::as_i64) else {
        return reply("400", "AccountID is required", "");
    };
    let Some(account) = db.accounts.get(&id) else {
        return reply("404", "account not found", &id.to_string());
    };

    let mut body = reply("200", "ok", "");
    if let Ok(Value::Object(fields)) = serde_json::to_value(account) {
        body.extend(fields);
    }
    body
}

async fn broken() -> &'static str {
    TRUNCATED_BODY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_request_collects_extra_params() {
        let req: CommandRequest = serde_json::from_str(
            r#"{"APIUSER":"a@b.c","APIPassword":"p","cmd":"AccountGet","AccountID":5}"#,
        )
        .unwrap();
        assert_eq!(req.user, "a@b.c");
        assert_eq!(req.cmd, "AccountGet");
        assert_eq!(req.params["AccountID"], 5);
    }

    #[test]
    fn command_request_rejects_missing_cmd() {
        let result: Result<CommandRequest, _> =
            serde_json::from_str(r#"{"APIUSER":"a@b.c","APIPassword":"p"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn account_get_merges_record_into_envelope() {
        let db = Directory::default();
        let mut params = Map::new();
        params.insert("AccountID".to_string(), json!(DEMO_ACCOUNT_ID));
        let body = account_get(&db, &params);
        assert_eq!(body["code"], "200");
        assert_eq!(body["AccountID"], DEMO_ACCOUNT_ID);
        assert_eq!(body["name"], "demo");
    }

    #[test]
    fn account_get_unknown_id_is_404() {
        let db = Directory::default();
        let mut params = Map::new();
        params.insert("AccountID".to_string(), json!(1));
        let body = account_get(&db, &params);
        assert_eq!(body["code"], "404");
        assert_eq!(body["debug"], "1");
    }

    #[test]
    fn account_get_without_id_is_400() {
        let body = account_get(&Directory::default(), &Map::new());
        assert_eq!(body["code"], "400");
    }
}

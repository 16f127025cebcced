#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use nextage_dday::Config;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const GRAPHQL_PATH: &str = "/graphql";

pub fn config_for(server: &ServerGuard) -> Config {
    Config {
        endpoint: format!("{}{}", server.url(), GRAPHQL_PATH),
        ..Config::default()
    }
}

/// Mock answering any request whose body mentions `operation`.
pub fn graphql_mock(server: &mut ServerGuard, operation: &str, response: Value) -> Mock {
    server
        .mock("POST", GRAPHQL_PATH)
        .match_body(Matcher::Regex(operation.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
}

/// Mock for `performerUpdate` on one performer with one expected value.
pub fn update_mock(server: &mut ServerGuard, id: &str, field: &str, value: &str) -> Mock {
    let mut custom_fields = serde_json::Map::new();
    custom_fields.insert(field.to_string(), Value::String(value.to_string()));
    server
        .mock("POST", GRAPHQL_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("performerUpdate".to_string()),
            Matcher::PartialJson(serde_json::json!({
                "variables": { "input": { "id": id, "customFields": custom_fields } }
            })),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({ "data": { "performerUpdate": { "id": id } } }).to_string())
}

/// Records `(performer id, customFields)` of update requests in arrival order.
#[derive(Debug, Default, Clone)]
pub struct UpdateRecorder {
    updates: Arc<Mutex<Vec<(String, Value)>>>,
}

impl UpdateRecorder {
    pub fn as_matcher(&self) -> impl Fn(&mockito::Request) -> bool + Send + Sync + use<> {
        let updates = self.updates.clone();
        move |req| {
            let body: Value = match req.body().ok().and_then(|b| serde_json::from_slice(b).ok()) {
                Some(body) => body,
                None => return true,
            };
            let is_update = body["query"]
                .as_str()
                .is_some_and(|q| q.contains("performerUpdate"));
            let input = &body["variables"]["input"];
            if let (true, Some(id)) = (is_update, input["id"].as_str()) {
                updates
                    .lock()
                    .unwrap()
                    .push((id.to_string(), input["customFields"].clone()));
            }
            true
        }
    }

    pub fn updates(&self) -> Vec<(String, Value)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.updates().into_iter().map(|(id, _)| id).collect()
    }
}

/// Catch-all `performerUpdate` mock feeding `recorder`.
pub fn recorded_update_mock(server: &mut ServerGuard, recorder: &UpdateRecorder) -> Mock {
    server
        .mock("POST", GRAPHQL_PATH)
        .match_body(Matcher::Regex("performerUpdate".to_string()))
        .match_request(recorder.as_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "data": { "performerUpdate": { "id": "0" } } }"#)
}

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

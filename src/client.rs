use crate::api::{self, error::codes, AppState, Request};
use crate::model::{
    Class, ClassDetail, ClassPayload, DashboardStats, HealthStatus, Student, StudentPayload,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Everything a resource call can fail with, from the page's point of view.
/// `Validation` and `NotFound` are the server's 400/404 conditions;
/// `RequestFailed` covers transport, parse and server-side failures;
/// `Unauthorized` never leaves the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    RequestFailed(String),
    #[error("Invalid username or password")]
    Unauthorized,
}

/// Seam between the typed client and whatever carries the request.
pub trait Transport {
    fn call(&mut self, method: &str, params: Value) -> Result<Value, ApiError>;
}

/// Routes calls straight through the request handler, no process boundary.
pub struct InProcess {
    state: AppState,
    next_id: u64,
}

impl InProcess {
    pub fn new(state: AppState) -> Self {
        Self { state, next_id: 0 }
    }
}

impl Transport for InProcess {
    fn call(&mut self, method: &str, params: Value) -> Result<Value, ApiError> {
        self.next_id += 1;
        let req = Request {
            id: self.next_id.to_string(),
            method: method.to_string(),
            params,
        };
        let resp = api::handle_request(&mut self.state, req);
        decode_response(method, resp)
    }
}

/// Splits a reply envelope into a result value or a typed error, surfacing
/// the server's message when present, else its code, else a generic fallback.
fn decode_response(method: &str, mut resp: Value) -> Result<Value, ApiError> {
    match resp.get("ok").and_then(|v| v.as_bool()) {
        Some(true) => Ok(resp
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null)),
        Some(false) => {
            let code = resp
                .pointer("/error/code")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let message = resp
                .pointer("/error/message")
                .and_then(|v| v.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .or_else(|| (!code.is_empty()).then(|| code.clone()))
                .unwrap_or_else(|| "API request failed".to_string());
            log::error!("api call {method} failed: {code}: {message}");
            Err(match code.as_str() {
                codes::VALIDATION => ApiError::Validation(message),
                codes::NOT_FOUND => ApiError::NotFound(message),
                _ => ApiError::RequestFailed(message),
            })
        }
        None => {
            log::error!("api call {method} returned a malformed envelope");
            Err(ApiError::RequestFailed("malformed response".to_string()))
        }
    }
}

/// Typed accessors, one per CRUD verb per entity.
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl ApiClient<InProcess> {
    pub fn in_process(state: AppState) -> Self {
        Self::new(InProcess::new(state))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn call_parsed<D: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<D, ApiError> {
        let result = self.transport.call(method, params)?;
        serde_json::from_value(result)
            .map_err(|e| ApiError::RequestFailed(format!("malformed response: {e}")))
    }

    fn params_with_id<P: Serialize>(id: i64, payload: &P) -> Result<Value, ApiError> {
        let mut params = serde_json::to_value(payload)
            .map_err(|e| ApiError::RequestFailed(format!("unencodable payload: {e}")))?;
        params["id"] = json!(id);
        Ok(params)
    }

    fn delete(&mut self, method: &str, id: i64) -> Result<String, ApiError> {
        let result = self.transport.call(method, json!({ "id": id }))?;
        Ok(result
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }

    pub fn students_list(&mut self) -> Result<Vec<Student>, ApiError> {
        self.call_parsed("students.list", json!({}))
    }

    pub fn students_get(&mut self, id: i64) -> Result<Student, ApiError> {
        self.call_parsed("students.get", json!({ "id": id }))
    }

    pub fn students_create(&mut self, payload: &StudentPayload) -> Result<Student, ApiError> {
        let params = serde_json::to_value(payload)
            .map_err(|e| ApiError::RequestFailed(format!("unencodable payload: {e}")))?;
        self.call_parsed("students.create", params)
    }

    pub fn students_update(
        &mut self,
        id: i64,
        payload: &StudentPayload,
    ) -> Result<Student, ApiError> {
        let params = Self::params_with_id(id, payload)?;
        self.call_parsed("students.update", params)
    }

    pub fn students_delete(&mut self, id: i64) -> Result<String, ApiError> {
        self.delete("students.delete", id)
    }

    pub fn classes_list(&mut self) -> Result<Vec<Class>, ApiError> {
        self.call_parsed("classes.list", json!({}))
    }

    pub fn classes_get(&mut self, id: i64) -> Result<ClassDetail, ApiError> {
        self.call_parsed("classes.get", json!({ "id": id }))
    }

    pub fn classes_create(&mut self, payload: &ClassPayload) -> Result<Class, ApiError> {
        let params = serde_json::to_value(payload)
            .map_err(|e| ApiError::RequestFailed(format!("unencodable payload: {e}")))?;
        self.call_parsed("classes.create", params)
    }

    pub fn classes_update(&mut self, id: i64, payload: &ClassPayload) -> Result<Class, ApiError> {
        let params = Self::params_with_id(id, payload)?;
        self.call_parsed("classes.update", params)
    }

    pub fn classes_delete(&mut self, id: i64) -> Result<String, ApiError> {
        self.delete("classes.delete", id)
    }

    pub fn dashboard_stats(&mut self) -> Result<DashboardStats, ApiError> {
        self.call_parsed("dashboard.stats", json!({}))
    }

    pub fn health(&mut self) -> Result<HealthStatus, ApiError> {
        self.call_parsed("health", json!({}))
    }
}

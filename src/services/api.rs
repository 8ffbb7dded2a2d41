use crate::app::Action;
use crate::model::{Customer, CustomerPayload, CustomerQuery};
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::sync::mpsc::Sender;
use std::thread;

/// Description of one remote call, independent of the HTTP machinery.
/// Built from the current form values by the action dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Create(CustomerPayload),
    Update { id: String, payload: CustomerPayload },
    Read { id: String },
    Delete { id: String },
    Deactivate { id: String },
    Restore { id: String },
    List,
    Query(CustomerQuery),
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::Create(_) => "POST",
            ApiRequest::Update { .. } | ApiRequest::Deactivate { .. } | ApiRequest::Restore { .. } => {
                "PUT"
            }
            ApiRequest::Read { .. } | ApiRequest::List | ApiRequest::Query(_) => "GET",
            ApiRequest::Delete { .. } => "DELETE",
        }
    }

    /// Path plus query, relative to the base URL. Ids and filter values are
    /// inserted verbatim, as the original page did.
    pub fn path(&self) -> String {
        match self {
            ApiRequest::Create(_) | ApiRequest::List => "/customers".to_string(),
            ApiRequest::Update { id, .. } | ApiRequest::Read { id } | ApiRequest::Delete { id } => {
                format!("/customers/{id}")
            }
            ApiRequest::Deactivate { id } => format!("/customers/{id}/deactivate"),
            ApiRequest::Restore { id } => format!("/customers/{id}/restore"),
            ApiRequest::Query(q) => format!("/customers?{}", q.query_string()),
        }
    }
}

/// What a 2xx response decodes to, per request kind. Delete, deactivate and
/// restore bodies are ignored by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Customer(Customer),
    Customers(Vec<Customer>),
    Done,
}

/// Completed call, reported back to the event loop. `raw` carries the
/// pretty-printed response body for the raw-response view when the body
/// was JSON at all.
pub struct ApiEvent {
    pub action: Action,
    pub outcome: Result<ApiOutcome, String>,
    pub raw: Option<String>,
}

fn expand_env(url: &str) -> String {
    // Expand ${VAR} from the environment; unknown vars become empty
    let re = Regex::new(r"\$\{([A-Z0-9_]+)\}").unwrap();
    let env_map: HashMap<String, String> = env::vars().collect();
    re.replace_all(url, |caps: &regex::Captures| {
        env_map.get(&caps[1]).cloned().unwrap_or_default()
    })
    .to_string()
}

/// Base URL for the service: CRM_TUI_BASE_URL wins over the configured
/// value, which may itself reference ${VAR}s.
pub fn resolve_base_url(configured: &str) -> String {
    if let Ok(v) = env::var("CRM_TUI_BASE_URL") {
        if !v.is_empty() {
            return v;
        }
    }
    expand_env(configured)
}

/// Extract the server's `{message}` detail from a non-2xx body; fall back
/// to the bare status code.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(m) = v.get("message").and_then(|m| m.as_str()) {
            return m.to_string();
        }
    }
    format!("HTTP {status}")
}

/// Map a response to the outcome the reducer consumes. A 2xx body that does
/// not deserialize is reported as an error string rather than a panic in
/// the render path.
pub(crate) fn decode_response(
    req: &ApiRequest,
    status: u16,
    body: &str,
) -> Result<ApiOutcome, String> {
    if !(200..300).contains(&status) {
        return Err(error_message(status, body));
    }
    match req {
        ApiRequest::Create(_) | ApiRequest::Update { .. } | ApiRequest::Read { .. } => {
            serde_json::from_str::<Customer>(body)
                .map(ApiOutcome::Customer)
                .map_err(|e| format!("unexpected response body: {e}"))
        }
        ApiRequest::List | ApiRequest::Query(_) => serde_json::from_str::<Vec<Customer>>(body)
            .map(ApiOutcome::Customers)
            .map_err(|e| format!("unexpected response body: {e}")),
        ApiRequest::Delete { .. } | ApiRequest::Deactivate { .. } | ApiRequest::Restore { .. } => {
            Ok(ApiOutcome::Done)
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn url_for(&self, req: &ApiRequest) -> String {
        format!("{}{}", self.base_url, req.path())
    }

    fn send(&self, req: &ApiRequest) -> Result<(u16, String), String> {
        let url = self.url_for(req);
        let builder = match req {
            ApiRequest::Create(p) => self.http.post(&url).json(p),
            ApiRequest::Update { payload, .. } => self.http.put(&url).json(payload),
            ApiRequest::Deactivate { .. } | ApiRequest::Restore { .. } => self.http.put(&url),
            ApiRequest::Read { .. } | ApiRequest::List | ApiRequest::Query(_) => {
                self.http.get(&url)
            }
            ApiRequest::Delete { .. } => self.http.delete(&url),
        };
        let resp = builder.send().map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| e.to_string())?;
        Ok((status, body))
    }

    pub fn execute(&self, req: &ApiRequest) -> (Result<ApiOutcome, String>, Option<String>) {
        match self.send(req) {
            Ok((status, body)) => {
                let raw = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .map(|v| serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string()));
                (decode_response(req, status, &body), raw)
            }
            Err(e) => (Err(e), None),
        }
    }
}

/// Run one call on a worker thread and report the result over the channel.
/// Calls are never queued or cancelled; if the user fires a second action
/// before the first returns, the last response wins.
pub fn spawn_request(client: ApiClient, action: Action, request: ApiRequest, tx: Sender<ApiEvent>) {
    thread::spawn(move || {
        let (outcome, raw) = client.execute(&request);
        let _ = tx.send(ApiEvent {
            action,
            outcome,
            raw,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> CustomerPayload {
        CustomerPayload {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            active: true,
            address: "1 Rd".into(),
        }
    }

    #[test]
    fn paths_and_methods_match_endpoints() {
        let cases = [
            (ApiRequest::Create(payload()), "POST", "/customers"),
            (
                ApiRequest::Update {
                    id: "7".into(),
                    payload: payload(),
                },
                "PUT",
                "/customers/7",
            ),
            (ApiRequest::Read { id: "7".into() }, "GET", "/customers/7"),
            (
                ApiRequest::Delete { id: "7".into() },
                "DELETE",
                "/customers/7",
            ),
            (
                ApiRequest::Deactivate { id: "7".into() },
                "PUT",
                "/customers/7/deactivate",
            ),
            (
                ApiRequest::Restore { id: "7".into() },
                "PUT",
                "/customers/7/restore",
            ),
            (ApiRequest::List, "GET", "/customers"),
        ];
        for (req, method, path) in cases {
            assert_eq!(req.method(), method);
            assert_eq!(req.path(), path);
        }
        let q = CustomerQuery {
            first_name: "a".into(),
            address: "b".into(),
            status: true,
            ..Default::default()
        };
        let req = ApiRequest::Query(q);
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/customers?first_name=a&address=b&status=true");
    }

    #[test]
    fn url_for_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(
            client.url_for(&ApiRequest::Read { id: "3".into() }),
            "http://localhost:8080/customers/3"
        );
    }

    #[test]
    fn error_message_prefers_server_detail() {
        assert_eq!(error_message(404, r#"{"message": "not found"}"#), "not found");
        assert_eq!(error_message(500, "<html>boom</html>"), "HTTP 500");
        assert_eq!(error_message(400, r#"{"detail": "other shape"}"#), "HTTP 400");
    }

    #[test]
    fn decode_maps_bodies_per_request_kind() {
        let body = json!({
            "id": 7, "first_name": "Ann", "last_name": "Lee",
            "active": true, "address": "1 Rd"
        })
        .to_string();
        match decode_response(&ApiRequest::Read { id: "7".into() }, 200, &body) {
            Ok(ApiOutcome::Customer(c)) => assert_eq!(c.id, 7),
            other => panic!("expected customer, got {other:?}"),
        }
        match decode_response(&ApiRequest::List, 200, &format!("[{body}]")) {
            Ok(ApiOutcome::Customers(cs)) => assert_eq!(cs.len(), 1),
            other => panic!("expected customers, got {other:?}"),
        }
        // Delete bodies are ignored even when empty
        assert_eq!(
            decode_response(&ApiRequest::Delete { id: "7".into() }, 204, ""),
            Ok(ApiOutcome::Done)
        );
        // Deactivate returns a customer body; the caller does not look at it
        assert_eq!(
            decode_response(&ApiRequest::Deactivate { id: "7".into() }, 200, &body),
            Ok(ApiOutcome::Done)
        );
    }

    #[test]
    fn decode_surfaces_error_and_malformed_bodies() {
        let err = decode_response(
            &ApiRequest::Read { id: "9".into() },
            404,
            r#"{"message": "not found"}"#,
        )
        .unwrap_err();
        assert_eq!(err, "not found");
        let err = decode_response(&ApiRequest::List, 200, "{not json").unwrap_err();
        assert!(err.contains("unexpected response body"));
    }

    #[test]
    fn base_url_expands_env_references() {
        env::set_var("CRM_TUI_TEST_HOST", "svc.example");
        let url = resolve_base_url("http://${CRM_TUI_TEST_HOST}:9090");
        assert_eq!(url, "http://svc.example:9090");
        let url = resolve_base_url("http://${CRM_TUI_TEST_UNSET_VAR}/x");
        assert_eq!(url, "http:///x");
    }
}

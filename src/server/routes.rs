use crate::server::api::{self, ApiError};
use crate::storage::StateStore;

pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            content_type: "application/json",
            body,
        }
    }
}

/// Dispatch one request. Kept free of any HTTP framework so tests can call it directly.
pub fn route_request(
    method: &str,
    path: &str,
    body: &str,
    store: &dyn StateStore,
) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, &err.to_string()),
        },
        ("POST", "/api/parse") => payload_response(api::parse_payload(body)),
        ("POST", "/api/matches") => payload_response(api::matches_payload(body)),
        ("POST", "/api/matchup") => payload_response(api::matchup_payload(body)),
        ("GET", "/api/state") => payload_response(api::state_get_payload(store)),
        ("PUT", "/api/state") => payload_response(api::state_put_payload(body, store)),
        ("DELETE", "/api/state") => payload_response(api::state_delete_payload(store)),
        _ => error_response(404, "Route not found"),
    }
}

fn payload_response(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::json(payload),
        Err(ApiError::Parse(err)) => error_response(400, &format!("Invalid request body: {err}")),
        Err(ApiError::Match(err)) => error_response(400, &err.to_string()),
        Err(ApiError::Validation(msg)) => error_response(400, &msg),
        Err(ApiError::Storage(err)) => {
            tracing::error!(error = %err, "state store failure");
            error_response(500, &err.to_string())
        }
    }
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

//! Request handlers.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;

use crate::http::server::AppState;
use crate::observability::metrics;

pub const HI_STEP: &str = "hi";

/// `age` query value, or -1 when absent or not an integer.
pub fn parse_age(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(-1)
}

/// `GET /hi`: logs the request's age, the server temp dir and `user.home`.
pub async fn hi(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let raw_age = params.get("age").map(String::as_str);
    let age = parse_age(raw_age);
    metrics::record_hi_request(raw_age.is_some());

    let sink = state.sink.as_ref();
    sink.info(HI_STEP, &format!("Age is : {}", age));
    sink.info(
        HI_STEP,
        &format!("Temporary directory : {}", state.temp_dir.display()),
    );

    let home = state
        .environment
        .load()
        .get_property("user.home")
        .unwrap_or_else(|| "<unset>".to_string());
    sink.info(
        HI_STEP,
        &format!("Web application context resolved property : {}", home),
    );

    StatusCode::OK
}

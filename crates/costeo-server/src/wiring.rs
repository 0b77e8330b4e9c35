use api::EngineLimits;
use axum::{routing::get, Router};

pub fn build_app(limits: EngineLimits) -> Router {
    debug_assert!(pricing::module_ready());
    debug_assert!(runtime::module_ready());
    debug_assert!(api::module_ready());

    api::app(limits).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}

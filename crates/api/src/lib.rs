pub mod routes;
pub mod state;
mod ws;

use axum::Router;

pub use state::{AppState, EngineLimits};

pub fn module_ready() -> bool {
    true
}

pub fn app(limits: EngineLimits) -> Router {
    routes::router(AppState::new(limits))
}

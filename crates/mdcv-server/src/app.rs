//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::live_reload;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::render_cv))
        .route("/dist/{*path}", get(handlers::serve_dist));

    // WebSocket for live reload
    if state.live_reload.is_some() {
        router = router.route("/ws/live-reload", get(live_reload::ws_handler));
    }

    router.with_state(state)
}

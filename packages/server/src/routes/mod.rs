use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Multipart overhead allowed on top of the image size limit.
const FORM_OVERHEAD: usize = 64 * 1024;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::user::list_users, handlers::user::create_user))
        .merge(shelf_routes(config))
        .routes(routes!(handlers::health::health))
}

fn shelf_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let limit = usize::try_from(config.storage.max_upload_size)
        .unwrap_or(usize::MAX)
        .saturating_add(FORM_OVERHEAD);

    OpenApiRouter::new()
        .routes(routes!(
            handlers::shelf::list_shelves,
            handlers::shelf::save_shelf
        ))
        .routes(routes!(handlers::shelf::delete_shelf))
        .layer(DefaultBodyLimit::max(limit))
}

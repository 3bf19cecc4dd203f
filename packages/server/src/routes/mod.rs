use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::chemical;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let chemical_root = OpenApiRouter::new()
        .routes(routes!(chemical::find_chemical, chemical::create_chemical))
        .layer(chemical::upload_body_limit(config.storage.max_image_size));

    OpenApiRouter::new()
        .routes(routes!(chemical::list_chemicals))
        .routes(routes!(chemical::get_chemical, chemical::delete_chemical))
        .routes(routes!(chemical::get_chemical_label))
        .merge(chemical_root)
}

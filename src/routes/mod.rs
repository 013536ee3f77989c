// Route exports
pub mod events;

use actix_web::web;

/// Mount the routes at the root and under `/api`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(events::configure))
        .configure(events::configure);
}

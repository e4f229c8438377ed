// Route exports
pub mod donors;

use actix_web::web;

pub use donors::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(donors::configure),
    );
}

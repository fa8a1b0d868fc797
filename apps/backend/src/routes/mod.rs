use actix_web::web;

pub mod health;
pub mod matches;
pub mod participants;
pub mod rounds;

/// Register every route. Middleware is applied by the caller (`main.rs` in
/// production, the test app builder in tests).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api")
            .configure(participants::configure_routes)
            .configure(matches::configure_routes)
            .configure(rounds::configure_routes),
    );
}

pub mod auth;
pub mod handlers;

use actix_web::{web, App, HttpServer};

pub use auth::NonceStore;
pub use handlers::AppState;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/nonce", web::get().to(handlers::issue_nonce))
            .route("/generate", web::post().to(handlers::generate))
            .route("/save", web::post().to(handlers::save)),
    );
}

pub async fn run(state: AppState, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(app_config))
        .bind(("127.0.0.1", port))?
        .run()
        .await
}

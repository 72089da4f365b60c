use actix_web::{middleware::Logger, web, App, HttpServer};
use quiz_prefetch_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("{}; question generation will fail until this is fixed", e);
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config);
    state.prefetch().run_initial_fill();

    log::info!("starting HTTP server on {}:{}", host, port);

    let app_state = state.clone();
    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .service(handlers::generate_questions)
            .service(handlers::index)
            .service(handlers::stylesheet)
            .service(handlers::logo)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    state.prefetch().shutdown();
    result
}

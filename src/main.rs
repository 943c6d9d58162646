use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use taskvault::{config::Config, db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let bind_address = (config.server_host.clone(), config.server_port);
    log::info!("Starting TaskVault server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind(bind_address)?
    .run()
    .await
}

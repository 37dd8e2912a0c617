use dotenvy::dotenv;
use storefront_orders::config::Config;
use storefront_orders::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().expect("invalid configuration");

    let pool = create_pool(&config.database_url);
    run_migrations(&pool);

    log::info!(
        "Starting server at http://{}:{}",
        config.host,
        config.port
    );

    build_server(pool, &config.host, config.port, config.page_size)?.await
}

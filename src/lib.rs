pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use config::available_delivery_dates;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};

/// The service wired against Postgres; handlers resolve it from app data.
pub type AppService = OrderService<DieselOrderRepository>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::my_orders,
        handlers::orders::list_orders,
        handlers::orders::delete_order,
        handlers::pricing::price_cart,
        handlers::dashboard::order_summary,
    ),
    components(schemas(
        handlers::orders::CartRequest,
        handlers::orders::CartItemRequest,
        handlers::orders::ShippingAddressRequest,
        handlers::orders::OrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::ShippingAddressResponse,
        handlers::orders::OrderListItemResponse,
        handlers::orders::MyOrdersResponse,
        handlers::orders::ListOrdersResponse,
        handlers::pricing::QuoteResponse,
        handlers::pricing::DeliveryTierResponse,
        handlers::dashboard::OrderSummaryResponse,
        handlers::dashboard::SalesBucketResponse,
        handlers::dashboard::CategorySalesResponse,
        handlers::dashboard::ProductSalesResponse,
    )),
    tags(
        (name = "orders", description = "Order placement and management"),
        (name = "cart", description = "Cart pricing quotes"),
        (name = "dashboard", description = "Order summary analytics"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
    page_size: i64,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(OrderService::new(
        DieselOrderRepository::new(pool),
        available_delivery_dates(),
        page_size,
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/cart")
                    .route("/price", web::post().to(handlers::pricing::price_cart)),
            )
            .service(
                web::scope("/dashboard")
                    .route("/summary", web::get().to(handlers::dashboard::order_summary)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/mine", web::get().to(handlers::orders::my_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route("/{id}", web::delete().to(handlers::orders::delete_order)),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}

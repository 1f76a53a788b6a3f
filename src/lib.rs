pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod session;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::cart_service::CartService;
use application::catalog_service::CatalogService;
use application::checkout_service::CheckoutService;
use application::dashboard_service::DashboardService;
use application::membership_service::MembershipService;
use application::order_service::OrderService;
use application::status_service::StatusService;
use infrastructure::cart_repo::DieselCartRepository;
use infrastructure::catalog_repo::DieselCatalogRepository;
use infrastructure::checkout_repo::DieselCheckoutRepository;
use infrastructure::membership_repo::DieselMembershipRepository;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::receipt_store::FsReceiptStore;
use infrastructure::status_repo::DieselStatusRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Every storefront workflow wired to its Diesel repository, shared
/// across workers behind `web::Data`.
pub struct AppState {
    pub catalog: CatalogService<DieselCatalogRepository>,
    pub cart: CartService<DieselCartRepository>,
    pub checkout: CheckoutService<DieselCheckoutRepository, FsReceiptStore>,
    pub orders: OrderService<DieselOrderRepository>,
    pub statuses: StatusService<DieselStatusRepository>,
    pub dashboard: DashboardService<DieselOrderRepository>,
    pub memberships: MembershipService<DieselMembershipRepository>,
}

impl AppState {
    pub fn new(pool: DbPool, receipts: FsReceiptStore) -> Self {
        AppState {
            catalog: CatalogService::new(DieselCatalogRepository::new(pool.clone())),
            cart: CartService::new(DieselCartRepository::new(pool.clone())),
            checkout: CheckoutService::new(DieselCheckoutRepository::new(pool.clone()), receipts),
            orders: OrderService::new(DieselOrderRepository::new(pool.clone())),
            statuses: StatusService::new(DieselStatusRepository::new(pool.clone())),
            dashboard: DashboardService::new(DieselOrderRepository::new(pool.clone())),
            memberships: MembershipService::new(DieselMembershipRepository::new(pool)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::catalog::list_shops,
        handlers::catalog::get_shop,
        handlers::catalog::list_shop_merchandise,
        handlers::catalog::get_merchandise,
        handlers::cart::list_cart,
        handlers::cart::add_cart_line,
        handlers::cart::update_cart_line,
        handlers::cart::remove_cart_line,
        handlers::checkout::checkout,
        handlers::orders::list_my_orders,
        handlers::orders::list_shop_orders,
        handlers::orders::pay_order,
        handlers::orders::receive_order,
        handlers::orders::cancel_order,
        handlers::dashboard::shop_dashboard,
        handlers::memberships::my_memberships,
        handlers::memberships::managed_shops,
        handlers::memberships::shop_roster,
        handlers::memberships::add_member,
    ),
    tags(
        (name = "catalog", description = "Shops and merchandise browsing"),
        (name = "cart", description = "The caller's shopping cart"),
        (name = "checkout", description = "Cart line checkout"),
        (name = "orders", description = "Buyer and shop order views"),
        (name = "order-statuses", description = "Order fulfillment transitions"),
        (name = "dashboard", description = "Shop fulfillment reporting"),
        (name = "memberships", description = "Shop membership management"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/shops")
                    .route("", web::get().to(handlers::catalog::list_shops))
                    .route("/{shop_id}", web::get().to(handlers::catalog::get_shop))
                    .route(
                        "/{shop_id}/merchandise",
                        web::get().to(handlers::catalog::list_shop_merchandise),
                    )
                    .route(
                        "/{shop_id}/orders",
                        web::get().to(handlers::orders::list_shop_orders),
                    )
                    .route(
                        "/{shop_id}/dashboard",
                        web::get().to(handlers::dashboard::shop_dashboard),
                    )
                    .route(
                        "/{shop_id}/memberships",
                        web::get().to(handlers::memberships::shop_roster),
                    )
                    .route(
                        "/{shop_id}/memberships",
                        web::post().to(handlers::memberships::add_member),
                    ),
            )
            .route(
                "/merchandise/{merch_id}",
                web::get().to(handlers::catalog::get_merchandise),
            )
            .service(
                web::scope("/cart")
                    .route("", web::get().to(handlers::cart::list_cart))
                    .route("", web::post().to(handlers::cart::add_cart_line))
                    .route("/{line_id}", web::patch().to(handlers::cart::update_cart_line))
                    .route(
                        "/{line_id}",
                        web::delete().to(handlers::cart::remove_cart_line),
                    ),
            )
            .route("/checkout", web::post().to(handlers::checkout::checkout))
            .route("/orders", web::get().to(handlers::orders::list_my_orders))
            .service(
                web::scope("/order-statuses")
                    .route("/{status_id}/pay", web::post().to(handlers::orders::pay_order))
                    .route(
                        "/{status_id}/receive",
                        web::post().to(handlers::orders::receive_order),
                    )
                    .route(
                        "/{status_id}/cancel",
                        web::post().to(handlers::orders::cancel_order),
                    ),
            )
            .route(
                "/memberships",
                web::get().to(handlers::memberships::my_memberships),
            )
            .route(
                "/managed-shops",
                web::get().to(handlers::memberships::managed_shops),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}

use dotenvy::dotenv;
use std::env;
use storefront_service::infrastructure::receipt_store::FsReceiptStore;
use storefront_service::{build_server, create_pool, run_migrations, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let storage_root =
        env::var("RECEIPT_STORAGE_ROOT").unwrap_or_else(|_| "storage".to_string());
    let public_storage_url = env::var("PUBLIC_STORAGE_URL")
        .unwrap_or_else(|_| "http://localhost:8080/storage".to_string());

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    let receipts = FsReceiptStore::new(storage_root, &public_storage_url);
    let state = AppState::new(pool, receipts);

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(state, &host, port)?.await
}

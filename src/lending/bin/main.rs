use std::error::Error;
use std::net::SocketAddr;
use axum::{
    routing::{get, post},
    Router,
};
use circulation::books::factory::create_catalog_repository;
use circulation::core::controller::AppState;
use circulation::core::domain::Configuration;
use circulation::lending::controller::{find_book, loan_book, return_book};
use circulation::utils::logs::setup_tracing;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let config = Configuration::from_env()?;
    setup_tracing(&config);

    // blocking threads are the worker pool every catalog operation runs on
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(config.max_workers)
        .build()?;
    runtime.block_on(serve(config))
}

async fn serve(config: Configuration) -> Result<(), Box<dyn Error>> {
    let addr: SocketAddr = config.bind_addr.parse()?;
    let repository = create_catalog_repository(&config);

    // fail fast on a corrupt store rather than on the first request
    let probe = repository.clone();
    let catalog = tokio::task::spawn_blocking(move || probe.snapshot()).await??;
    tracing::info!(path = %config.data_file.display(), records = catalog.len(),
        workers = config.max_workers, "catalog loaded");

    let app = Router::new()
        .route("/books/:isbn", get(find_book))
        .route("/loans", post(loan_book))
        .route("/returns", post(return_book))
        .with_state(AppState::new(config, repository));

    tracing::info!(%addr, "lending service listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use common_auth::{JwtVerifier, TokenSigner};
use ordering_service::provider::StripeProvider;
use ordering_service::{app, config, db, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = config::load_config()?;

    // A broken backing store aborts startup; the process never serves
    // without storage behind it.
    let pool = db::connect(&config.database_url).await?;
    db::ensure_schema(&pool).await?;
    info!("connected to Postgres and verified schema");

    let state = AppState {
        db: pool,
        jwt_verifier: Arc::new(JwtVerifier::new(&config.token)),
        token_signer: Arc::new(TokenSigner::new(&config.token)),
        payment_provider: Arc::new(StripeProvider::new(&config.payment)?),
    };

    let router = app::build_router(state, &config.cors_allowed_origins);

    let ip: std::net::IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((ip, config.port));
    info!(%addr, "starting ordering-service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

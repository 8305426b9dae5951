use admin_panel::{
    config::{Config, LogFormat},
    database::pool::{create_pool, run_migrations},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let state = match config.database_url.clone() {
        Some(url) => {
            let pool = create_pool(&url).await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            AppState::with_postgres(config, pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            AppState::in_memory(config)
        }
    };

    if let Some(admin) = state.config.bootstrap_admin.as_ref() {
        if let Some(created) = state.user_service.ensure_admin(admin).await? {
            info!(user = %created.id, "Bootstrap admin ready");
        }
    }

    let addr: SocketAddr = state.config.server_address.parse()?;
    let app = routes::app(state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

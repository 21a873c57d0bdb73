use anyhow::Context;
use tahvel_api::db::{self, PgAccountStore};
use tahvel_api::tahvel::TahvelClient;
use tahvel_api::Settings;
use tahvel_web::AppState;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("Failed to load settings")?;

    // Initialize database pool
    let pool = db::connect(&settings.database)
        .await
        .context("Failed to connect to database")?;

    // Run migrations
    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;

    let tahvel = TahvelClient::new(&settings.tahvel).context("Failed to build HTTP client")?;
    let address = settings.server.address.clone();
    let state = AppState::new(settings, PgAccountStore::new(pool), tahvel);

    let app = tahvel_web::app(state, session_store);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Server listening on {}", address);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

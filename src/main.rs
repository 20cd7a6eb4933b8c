use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mokkan_blog::application::{
    dto::TokenSubject,
    ports::{security::TokenManager, tags::TagProvider, time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use mokkan_blog::config::AppConfig;
use mokkan_blog::domain::{
    category::CategoryRepository,
    entry::{EntryReadRepository, EntryWriteRepository},
    user::{Role, UserId},
};
use mokkan_blog::infrastructure::{
    database,
    repositories::{
        InMemoryBlogStore, PostgresCategoryRepository, PostgresEntryReadRepository,
        PostgresEntryWriteRepository,
    },
    security::token::BiscuitTokenManager,
    tags::{EntryTagProvider, NullTagProvider},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use mokkan_blog::presentation::http::{openapi, routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mokkan_blog", version)]
#[command(about = "Blog service with date archives, tags and an editorial workflow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a bearer token for a staff member
    IssueToken {
        /// Numeric id of the user
        user_id: i64,
        /// Name embedded in the token
        username: String,
        /// admin or author
        role: Role,
    },
    /// Write the OpenAPI document to OPENAPI_SNAPSHOT_PATH
    OpenapiSnapshot,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_tracing();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::IssueToken {
            user_id,
            username,
            role,
        } => issue_token(user_id, &username, role).await,
        Command::OpenapiSnapshot => {
            let path = openapi::write_openapi_snapshot()?;
            println!("OpenAPI snapshot written to {path}");
            Ok(())
        }
    }
}

struct Repositories {
    entry_write: Arc<dyn EntryWriteRepository>,
    entry_read: Arc<dyn EntryReadRepository>,
    categories: Arc<dyn CategoryRepository>,
}

async fn repositories(config: &AppConfig) -> Result<Repositories> {
    if config.is_in_memory() {
        tracing::warn!("using the in-memory store; data is lost on shutdown");
        let store = Arc::new(InMemoryBlogStore::new());
        return Ok(Repositories {
            entry_write: store.clone(),
            entry_read: store.clone(),
            categories: store,
        });
    }

    let pool = database::init_pool(config.database_url())
        .await
        .context("connecting to the database")?;
    database::run_migrations(&pool)
        .await
        .context("running migrations")?;

    Ok(Repositories {
        entry_write: Arc::new(PostgresEntryWriteRepository::new(pool.clone())),
        entry_read: Arc::new(PostgresEntryReadRepository::new(pool.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(pool)),
    })
}

async fn serve() -> Result<()> {
    let config = AppConfig::from_env()?;
    let repos = repositories(&config).await?;

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let tag_provider: Arc<dyn TagProvider> = if config.tagging_enabled() {
        Arc::new(EntryTagProvider::new(Arc::clone(&repos.entry_read)))
    } else {
        tracing::info!("tagging disabled");
        Arc::new(NullTagProvider)
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        repos.entry_write,
        repos.entry_read,
        repos.categories,
        tag_provider,
        token_manager,
        clock,
        slugger,
        config.blog_settings(),
    ));

    let app = build_router(HttpState { services }, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn issue_token(user_id: i64, username: &str, role: Role) -> Result<()> {
    let config = AppConfig::from_env()?;
    let user_id = UserId::new(user_id).context("user id must be positive")?;

    let manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;
    let token = manager
        .issue(TokenSubject::for_role(user_id, username, role))
        .await?;

    tracing::info!(user_id = user_id.0, %role, expires_at = %token.expires_at, "issued token");
    println!("{}", token.token);
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, error::ErrorKind};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_serves() {
        let cli = Cli::try_parse_from(["mokkan_blog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn issue_token_arguments_are_typed() {
        let cli = Cli::try_parse_from(["mokkan_blog", "issue-token", "1", "bob", "author"]).unwrap();
        match cli.command {
            Some(Command::IssueToken {
                user_id,
                username,
                role,
            }) => {
                assert_eq!(user_id, 1);
                assert_eq!(username, "bob");
                assert_eq!(role, Role::Author);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn malformed_invocations_are_rejected() {
        let help = Cli::try_parse_from(["mokkan_blog", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        for args in [
            vec!["mokkan_blog", "issue-token", "1", "bob", "admin", "extra"],
            vec!["mokkan_blog", "issue-token", "one", "bob", "admin"],
            vec!["mokkan_blog", "issue-token", "1", "bob", "owner"],
            vec!["mokkan_blog", "launch"],
        ] {
            assert!(Cli::try_parse_from(args.iter().copied()).is_err(), "{args:?} should fail");
        }
    }
}

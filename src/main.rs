use std::{process, sync::Arc, time::Duration};

use postdesk::{
    application::{
        admin::posts::AdminPostService, error::AppError, repos::PostsRepo, session::SessionGuard,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState},
        memory::InMemoryPosts,
        session::TokenSessionGuard,
        telemetry,
    },
};
use tokio::{net::TcpListener, sync::watch};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repo = init_repository(&settings).await?;
    let session: Arc<dyn SessionGuard> =
        Arc::new(TokenSessionGuard::from_settings(&settings.session));
    if settings.session.users.is_empty() {
        warn!(
            target = "postdesk::startup",
            "no session users configured; post creation will be rejected"
        );
    }

    let posts = AdminPostService::new(repo.clone(), session)
        .with_simulated_latency(settings.admin.simulated_latency);
    let state = AdminState {
        posts: Arc::new(posts),
        repo,
        session_cookie: Arc::from(settings.session.cookie_name.as_str()),
    };

    serve_http(&settings, state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let database_url = database_url(&settings)?;
    let pool = connect(database_url, &settings).await?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(AppError::from)?;
    info!(target = "postdesk::migrate", "migrations applied");
    Ok(())
}

async fn init_repository(settings: &config::Settings) -> Result<Arc<dyn PostsRepo>, AppError> {
    let Some(database_url) = settings.database.url.as_deref() else {
        warn!(
            target = "postdesk::startup",
            "database url is not configured; posts are kept in memory and lost on exit"
        );
        return Ok(Arc::new(InMemoryPosts::new()));
    };

    let pool = connect(database_url, settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(AppError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn database_url(settings: &config::Settings) -> Result<&str, AppError> {
    settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)
}

async fn connect(
    database_url: &str,
    settings: &config::Settings,
) -> Result<sqlx::PgPool, AppError> {
    PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(AppError::from)
}

async fn serve_http(settings: &config::Settings, state: AdminState) -> Result<(), AppError> {
    let router = http::build_admin_router(state);
    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "postdesk::startup",
        addr = %settings.server.addr,
        "admin listener ready"
    );

    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            shutdown_signal().await;
            let _ = stopping_tx.send(true);
        },
    );
    let drain_deadline = settings.server.graceful_shutdown;

    tokio::select! {
        result = async move { server.await } => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        () = drain_timeout(&mut stopping_rx, drain_deadline) => {
            warn!(
                target = "postdesk::shutdown",
                timeout_secs = drain_deadline.as_secs(),
                "in-flight requests did not finish before the shutdown deadline"
            );
            Ok(())
        }
    }
}

/// Resolves once shutdown has been requested and `deadline` has elapsed since.
async fn drain_timeout(stopping: &mut watch::Receiver<bool>, deadline: Duration) {
    if stopping.wait_for(|stopping| *stopping).await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(deadline).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(target = "postdesk::shutdown", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(target = "postdesk::shutdown", error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!(target = "postdesk::shutdown", "shutdown requested");
}

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use sportzone_core::tracing::init_tracing;
use sportzone_shop::config::ShopConfig;
use sportzone_shop::router::build_router;
use sportzone_shop::state::AppState;
use sportzone_shop::usecase::bootstrap::{BootstrapAdmin, EnsureAdministratorUseCase};
use sportzone_shop_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let config = ShopConfig::from_env();

    let mut options = ConnectOptions::new(&config.database_url);
    options
        .max_connections(config.database_max_connections)
        .connect_timeout(config.database_connect_timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let state = AppState { db };

    if let Some(admin) = config.bootstrap_admin {
        let usecase = EnsureAdministratorUseCase {
            repo: state.user_repo(),
        };
        let seeded = usecase
            .execute(BootstrapAdmin {
                name: admin.name,
                email: admin.email,
                password: admin.password,
            })
            .await;
        if let Err(e) = seeded {
            error!(error = %e, "failed to bootstrap administrator");
        }
    }

    let router = build_router(state.clone());
    let http_addr = format!("0.0.0.0:{}", config.shop_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("shop service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Err(e) = state.db.close().await {
        error!(error = %e, "failed to close database connection");
    }
    info!("shop service stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}

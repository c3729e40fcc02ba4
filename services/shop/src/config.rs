use std::time::Duration;

/// Shop service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ShopConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `SHOP_PORT`.
    pub shop_port: u16,
    /// Pool size (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub database_max_connections: u32,
    /// Env var: `DATABASE_CONNECT_TIMEOUT_SECS` (default 60).
    pub database_connect_timeout: Duration,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
    /// Administrator seeded into a store that has none.
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

#[derive(Debug)]
pub struct BootstrapAdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ShopConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let bootstrap_admin = match (
            var("BOOTSTRAP_ADMIN_EMAIL"),
            var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdminConfig {
                name: var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| "Administrator".to_owned()),
                email,
                password,
            }),
            _ => None,
        };
        Self {
            database_url: var("DATABASE_URL").expect("DATABASE_URL"),
            shop_port: var("SHOP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            database_connect_timeout: Duration::from_secs(
                var("DATABASE_CONNECT_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            ),
            run_migrations: var("RUN_MIGRATIONS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            bootstrap_admin,
        }
    }
}

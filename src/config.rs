use std::env;

use anyhow::{Context, Result, bail};
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_POOL_MAX: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgSettings {
    pub host: String,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub pool_max: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Postgres(PgSettings),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub storage: Storage,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().with_context(|| format!("invalid PORT '{p}'"))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.into())
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let storage = match lookup("STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => Storage::Postgres(PgSettings::from_lookup(&lookup)?),
            Some("memory") => Storage::Memory,
            Some(other) => bail!("unknown STORAGE '{other}', expected 'postgres' or 'memory'"),
        };

        Ok(Self {
            port,
            allowed_origins,
            storage,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl PgSettings {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let pool_max = match lookup("PG_POOL_MAX") {
            Some(n) => n.trim().parse().with_context(|| format!("invalid PG_POOL_MAX '{n}'"))?,
            None => DEFAULT_POOL_MAX,
        };

        Ok(Self {
            host: lookup("PG_HOST").context("PG_HOST not set")?,
            user: lookup("PG_USER").context("PG_USER not set")?,
            password: lookup("PG_PASS"),
            dbname: lookup("PG_DB").context("PG_DB not set")?,
            pool_max,
        })
    }

    pub fn create_pool(&self) -> Result<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = self.password.clone();
        cfg.dbname = Some(self.dbname.clone());

        if cfg.pool.is_none() {
            cfg.pool = Some(PoolConfig::default());
        }
        if let Some(ref mut pcfg) = cfg.pool {
            pcfg.max_size = self.pool_max;
        }

        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .context("failed to create postgres pool")
    }
}

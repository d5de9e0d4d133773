//! PostgreSQL database backend

use crate::error::{DbError, DbResult};
use crate::traits::{split_qualified_name, Database};
use async_trait::async_trait;
use tokio_postgres::{Client, Config, NoTls, SimpleQueryMessage};
use url::Url;

/// PostgreSQL database backend
///
/// Statements go through the simple query protocol, so each one is
/// committed as soon as it completes unless the script itself opens a
/// transaction.
#[derive(Debug)]
pub struct PostgresBackend {
    client: Client,
}

impl PostgresBackend {
    /// Wrap an already connected client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using a `postgres://` or `postgresql://` connection string.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let parsed = Url::parse(url).map_err(|e| DbError::InvalidUrl(e.to_string()))?;

        if !matches!(parsed.scheme(), "postgres" | "postgresql") {
            return Err(DbError::InvalidUrl(format!(
                "expected a `postgresql` scheme, found `{}`",
                parsed.scheme()
            )));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(DbError::InvalidUrl(
                "missing host in connection URL".to_string(),
            ));
        }

        let config: Config = url
            .parse()
            .map_err(|e: tokio_postgres::Error| DbError::InvalidUrl(e.to_string()))?;

        Self::connect_with_config(config).await
    }

    /// Connect using a [`tokio_postgres::Config`].
    pub async fn connect_with_config(config: Config) -> DbResult<Self> {
        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| DbError::ConnectionError(describe(&e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::warn!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self::new(client))
    }
}

/// Prefer the server's message over the driver's generic wrapper text
fn describe(err: &tokio_postgres::Error) -> String {
    match err.as_db_error() {
        Some(db_err) => db_err.to_string(),
        None => err.to_string(),
    }
}

impl From<tokio_postgres::Error> for DbError {
    fn from(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            DbError::ConnectionError(describe(&err))
        } else {
            DbError::ExecutionError(describe(&err))
        }
    }
}

#[async_trait]
impl Database for PostgresBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        let messages = self.client.simple_query(sql).await?;
        let affected: u64 = messages
            .iter()
            .filter_map(|msg| match msg {
                SimpleQueryMessage::CommandComplete(rows) => Some(*rows),
                _ => None,
            })
            .sum();
        Ok(affected as usize)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = split_qualified_name(name, "public");
        let row = self
            .client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
                 WHERE table_schema = $1 AND table_name = $2)",
                &[&schema, &table],
            )
            .await?;
        Ok(row.get(0))
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }
}

//! PostgreSQL adapter on top of `tokio-postgres`.
//!
//! One registry, guarded by a single `RwLock`, maps profile names to their
//! profile and to at most one live client. Lookups share the read lock;
//! connect, disconnect, update and remove take the write lock. Dialing
//! happens with no lock held, through a [`Dialer`].

use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::config::SslMode as PgSslMode;
use tokio_postgres::tls::MakeTlsConnect;
use tokio_postgres::types::{Format, IsNull, ToSql, Type, to_sql_checked};
use tokio_postgres::{Client, Config, NoTls, SimpleQueryMessage, Socket};

use crate::app::mutation::{MutationQuery, select_page_sql};
use crate::app::ports::{ConnectionManager, DbError, MetadataProvider, QueryExecutor};
use crate::domain::{ColumnInfo, ConnectionProfile, QueryResult, ResultSource, SslMode, TableInfo};

const TABLES_SQL: &str = "SELECT table_schema::text, table_name::text \
     FROM information_schema.tables \
     WHERE table_schema NOT IN ('pg_catalog', 'information_schema') \
       AND table_type = 'BASE TABLE' \
     ORDER BY 1, 2";

const COLUMNS_SQL: &str = "SELECT c.column_name::text, c.data_type::text, c.is_nullable = 'YES', \
       EXISTS ( \
         SELECT 1 FROM information_schema.table_constraints tc \
         JOIN information_schema.key_column_usage kcu \
           ON kcu.constraint_name = tc.constraint_name \
          AND kcu.table_schema = tc.table_schema \
          AND kcu.table_name = tc.table_name \
         WHERE tc.constraint_type = 'PRIMARY KEY' \
           AND kcu.table_schema = c.table_schema \
           AND kcu.table_name = c.table_name \
           AND kcu.column_name = c.column_name) \
     FROM information_schema.columns c \
     WHERE c.table_schema = $1::text AND c.table_name = $2::text \
     ORDER BY c.ordinal_position";

/// A bound argument sent as text, whatever the parameter type. The server
/// coerces it to the column type.
#[derive(Debug)]
struct TextParam<'a>(&'a str);

impl ToSql for TextParam<'_> {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        out.extend_from_slice(self.0.as_bytes());
        Ok(IsNull::No)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}

fn affected_tag(rows: u64) -> String {
    format!("{} rows affected", rows)
}

fn query_error(e: &tokio_postgres::Error) -> DbError {
    let message = match e.as_db_error() {
        Some(db) => db.message().to_string(),
        None => e.to_string(),
    };
    DbError::QueryFailed(message)
}

/// A live session the registry owns until it is closed.
pub trait LiveHandle: Send + Sync + 'static {
    fn close(self);
}

/// Opens one session for a profile. The adapter calls it with no registry
/// lock held, so two callers may dial the same name at once.
#[async_trait]
pub trait Dialer: Send + Sync + 'static {
    type Handle: LiveHandle;

    async fn dial(&self, profile: &ConnectionProfile) -> Result<Self::Handle, DbError>;
}

pub struct LiveConnection {
    client: Arc<Client>,
    driver: JoinHandle<()>,
}

impl LiveHandle for LiveConnection {
    fn close(self) {
        self.driver.abort();
    }
}

fn tls_connector(mode: SslMode) -> Result<MakeTlsConnector, native_tls::Error> {
    let connector = TlsConnector::builder()
        .danger_accept_invalid_certs(!mode.verifies_certificate())
        .danger_accept_invalid_hostnames(!mode.verifies_hostname())
        .build()?;
    Ok(MakeTlsConnector::new(connector))
}

async fn open<T>(
    name: &str,
    config: &Config,
    tls: T,
) -> Result<(Client, JoinHandle<()>), tokio_postgres::Error>
where
    T: MakeTlsConnect<Socket>,
    T::Stream: Send + 'static,
{
    let (client, connection) = config.connect(tls).await?;
    let driver_name = name.to_string();
    let driver = tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::warn!("connection {} closed: {}", driver_name, e);
        }
    });
    Ok((client, driver))
}

/// Dials with `tokio-postgres`. Plaintext only for `sslmode=disable`,
/// otherwise a native-tls connector whose checks follow the profile mode.
pub struct PgDialer;

#[async_trait]
impl Dialer for PgDialer {
    type Handle = LiveConnection;

    async fn dial(&self, profile: &ConnectionProfile) -> Result<LiveConnection, DbError> {
        let failed = |message: String| DbError::ConnectionFailed {
            name: profile.name.clone(),
            message,
        };

        let config: Config = profile
            .to_dsn()
            .parse()
            .map_err(|e: tokio_postgres::Error| failed(e.to_string()))?;

        let opened = if matches!(config.get_ssl_mode(), PgSslMode::Disable) {
            open(&profile.name, &config, NoTls).await
        } else {
            let tls = tls_connector(profile.sslmode)
                .map_err(|e| failed(format!("TLS error: {}", e)))?;
            open(&profile.name, &config, tls).await
        };
        let (client, driver) = opened.map_err(|e| failed(e.to_string()))?;
        let live = LiveConnection {
            client: Arc::new(client),
            driver,
        };

        if let Err(e) = live.client.simple_query("SELECT 1").await {
            live.close();
            return Err(failed(e.to_string()));
        }
        Ok(live)
    }
}

struct Registry<H> {
    profiles: HashMap<String, ConnectionProfile>,
    handles: HashMap<String, H>,
}

pub struct PostgresAdapter<D: Dialer = PgDialer> {
    registry: RwLock<Registry<D::Handle>>,
    dialer: D,
    null_display: String,
}

impl PostgresAdapter {
    pub fn new(profiles: Vec<ConnectionProfile>, null_display: impl Into<String>) -> Self {
        Self::with_dialer(PgDialer, profiles, null_display)
    }
}

impl<D: Dialer> PostgresAdapter<D> {
    pub fn with_dialer(
        dialer: D,
        profiles: Vec<ConnectionProfile>,
        null_display: impl Into<String>,
    ) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.name.clone(), p)).collect();
        Self {
            registry: RwLock::new(Registry {
                profiles,
                handles: HashMap::new(),
            }),
            dialer,
            null_display: null_display.into(),
        }
    }

    pub async fn is_connected(&self, name: &str) -> bool {
        self.registry.read().await.handles.contains_key(name)
    }

    pub async fn profile(&self, name: &str) -> Option<ConnectionProfile> {
        self.registry.read().await.profiles.get(name).cloned()
    }
}

impl PostgresAdapter {
    async fn client(&self, name: &str) -> Result<Arc<Client>, DbError> {
        let registry = self.registry.read().await;
        match registry.handles.get(name) {
            Some(live) => Ok(Arc::clone(&live.client)),
            None if registry.profiles.contains_key(name) => {
                Err(DbError::NotConnected(name.to_string()))
            }
            None => Err(DbError::UnknownConnection(name.to_string())),
        }
    }

    /// Runs `sql` through the simple protocol so every value comes back as
    /// text. The last result set wins when `sql` holds several statements.
    async fn simple_result(&self, connection: &str, sql: &str) -> Result<QueryResult, DbError> {
        let client = self.client(connection).await?;
        let started = Instant::now();
        let messages = client.simple_query(sql).await.map_err(|e| query_error(&e))?;
        let elapsed = started.elapsed();

        let mut columns: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut affected = 0;
        for message in messages {
            match message {
                SimpleQueryMessage::RowDescription(description) => {
                    columns = Some(description.iter().map(|c| c.name().to_string()).collect());
                    rows.clear();
                }
                SimpleQueryMessage::Row(row) => {
                    if columns.is_none() {
                        columns = Some(row.columns().iter().map(|c| c.name().to_string()).collect());
                    }
                    let values: Vec<String> = (0..row.len())
                        .map(|i| row.get(i).unwrap_or(self.null_display.as_str()).to_string())
                        .collect();
                    rows.push(values);
                }
                SimpleQueryMessage::CommandComplete(n) => affected += n,
                _ => {}
            }
        }

        let source = ResultSource::Query {
            connection: connection.to_string(),
        };
        Ok(match columns {
            Some(columns) => QueryResult::new(columns, rows, elapsed, source),
            None => QueryResult::new(Vec::new(), Vec::new(), elapsed, source)
                .with_command_tag(affected_tag(affected)),
        })
    }
}

#[async_trait]
impl<D: Dialer> ConnectionManager for PostgresAdapter<D> {
    async fn connect(&self, name: &str) -> Result<(), DbError> {
        let profile = {
            let registry = self.registry.read().await;
            if registry.handles.contains_key(name) {
                return Ok(());
            }
            registry
                .profiles
                .get(name)
                .cloned()
                .ok_or_else(|| DbError::UnknownConnection(name.to_string()))?
        };

        log::info!("connecting to {}", name);
        log::debug!("dsn for {}: {}", name, profile.to_masked_dsn());
        let live = self.dialer.dial(&profile).await?;

        let mut registry = self.registry.write().await;
        if registry.handles.contains_key(name) || !registry.profiles.contains_key(name) {
            // lost a race with another connect, or the profile went away
            live.close();
            return Ok(());
        }
        registry.handles.insert(name.to_string(), live);
        Ok(())
    }

    async fn disconnect(&self, name: &str) -> Result<(), DbError> {
        let mut registry = self.registry.write().await;
        if !registry.profiles.contains_key(name) {
            return Err(DbError::UnknownConnection(name.to_string()));
        }
        if let Some(live) = registry.handles.remove(name) {
            log::info!("disconnected from {}", name);
            live.close();
        }
        Ok(())
    }

    async fn register(&self, profile: ConnectionProfile) {
        let mut registry = self.registry.write().await;
        registry.profiles.insert(profile.name.clone(), profile);
    }

    async fn update(&self, old_name: &str, profile: ConnectionProfile) {
        let mut registry = self.registry.write().await;
        if let Some(live) = registry.handles.remove(old_name) {
            live.close();
        }
        registry.profiles.remove(old_name);
        registry.profiles.insert(profile.name.clone(), profile);
    }

    async fn remove(&self, name: &str) {
        let mut registry = self.registry.write().await;
        if let Some(live) = registry.handles.remove(name) {
            live.close();
        }
        registry.profiles.remove(name);
    }

    async fn close_all(&self) {
        let mut registry = self.registry.write().await;
        let count = registry.handles.len();
        for (_, live) in registry.handles.drain() {
            live.close();
        }
        log::info!("closed {} connection(s)", count);
    }
}

#[async_trait]
impl MetadataProvider for PostgresAdapter {
    async fn list_tables(&self, connection: &str) -> Result<Vec<TableInfo>, DbError> {
        let client = self.client(connection).await?;
        let rows = client
            .query(TABLES_SQL, &[])
            .await
            .map_err(|e| query_error(&e))?;
        rows.iter()
            .map(|row| {
                Ok(TableInfo::new(
                    row.try_get::<_, String>(0).map_err(|e| query_error(&e))?,
                    row.try_get::<_, String>(1).map_err(|e| query_error(&e))?,
                ))
            })
            .collect()
    }

    async fn list_columns(
        &self,
        connection: &str,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, DbError> {
        let client = self.client(connection).await?;
        let rows = client
            .query(COLUMNS_SQL, &[&schema, &table])
            .await
            .map_err(|e| query_error(&e))?;
        rows.iter()
            .map(|row| {
                Ok(ColumnInfo {
                    name: row.try_get(0).map_err(|e| query_error(&e))?,
                    data_type: row.try_get(1).map_err(|e| query_error(&e))?,
                    is_nullable: row.try_get(2).map_err(|e| query_error(&e))?,
                    is_primary: row.try_get(3).map_err(|e| query_error(&e))?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl QueryExecutor for PostgresAdapter {
    async fn execute_preview(
        &self,
        connection: &str,
        schema: &str,
        table: &str,
        limit: usize,
        offset: usize,
    ) -> Result<QueryResult, DbError> {
        let sql = select_page_sql(schema, table, limit, offset);
        self.simple_result(connection, &sql).await
    }

    async fn execute_adhoc(&self, connection: &str, sql: &str) -> Result<QueryResult, DbError> {
        self.simple_result(connection, sql).await
    }

    async fn execute_write(&self, connection: &str, query: &MutationQuery) -> Result<u64, DbError> {
        let client = self.client(connection).await?;
        let params: Vec<TextParam<'_>> = query.args.iter().map(|a| TextParam(a.as_str())).collect();
        let refs: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        client
            .execute(query.sql.as_str(), &refs)
            .await
            .map_err(|e| query_error(&e))
    }
}

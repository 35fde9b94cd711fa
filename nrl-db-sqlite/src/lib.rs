#[macro_use]
extern crate diesel;

use std::{cell::RefCell, ops::Deref, sync::Arc};

use anyhow::{anyhow, Result as Fallible};
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection, QueryResult};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness as _};
use nrl_core::usecases as uc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

diesel::define_sql_function! {
    fn last_insert_rowid() -> diesel::sql_types::BigInt;
}

diesel::define_sql_function! {
    /// Unicode-aware lower case, registered on every pooled connection.
    fn unicode_lower(text: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

/// A pooled connection that keeps the pool locked while in use.
pub struct Db<L> {
    _lock: L,
    conn: RefCell<PooledConnection>,
}

/// Many readers may hold one of these at the same time.
pub type DbReadOnly<'a> = Db<RwLockReadGuard<'a, ConnectionPool>>;

/// Only a single writer exists at a time and no readers are active meanwhile.
pub type DbReadWrite<'a> = Db<RwLockWriteGuard<'a, ConnectionPool>>;

impl<L> Db<L>
where
    L: Deref<Target = ConnectionPool>,
{
    fn acquire(lock: L, access: &str) -> Fallible<Self> {
        let conn = lock.get().inspect_err(|err| {
            log::error!("No pooled database connection available for {access} access: {err}");
        })?;
        Ok(Self {
            _lock: lock,
            conn: RefCell::new(conn),
        })
    }
}

/// A connection inside of a running transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

enum TransactionError {
    Aborted(uc::Error),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(from: diesel::result::Error) -> Self {
        Self::Db(from)
    }
}

impl DbReadWrite<'_> {
    /// Run `f` in a single transaction.
    ///
    /// Any error returned by `f` rolls back all changes and is
    /// passed on unmodified.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        use diesel::Connection as _;
        let conn: &mut SqliteConnection = self.conn.get_mut();
        conn.transaction(|conn| {
            f(&DbConnection {
                conn: RefCell::new(conn),
            })
            .map_err(|err| TransactionError::Aborted(err.into()))
        })
        .map_err(|err| match err {
            TransactionError::Aborted(err) => {
                log::debug!("Rolled back transaction: {err}");
                err
            }
            TransactionError::Db(err) => uc::Error::Repo(repo_impl::from_diesel_err(err)),
        })
    }
}

#[derive(Debug)]
struct ConnectionSetup;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        setup_connection(conn).map_err(r2d2::Error::QueryError)
    }
}

// Both settings only affect the connection they are executed on.
fn setup_connection(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(
        "PRAGMA busy_timeout = 5000;
         PRAGMA synchronous = NORMAL;",
    )?;
    unicode_lower_utils::register_impl(conn, |text: String| text.to_lowercase())
}

// Persistent settings of the database file.
fn setup_database(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(
        "PRAGMA journal_mode = WAL;
         PRAGMA encoding = 'UTF-8';",
    )
}

#[derive(Clone)]
pub struct Connections {
    // Writers lock the whole pool to prevent
    // SQLITE_BUSY errors between our own connections.
    pool: Arc<RwLock<ConnectionPool>>,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // r2d2 would keep retrying a broken URL and only log the errors
        use diesel::Connection as _;
        let mut conn = SqliteConnection::establish(url)?;
        setup_database(&mut conn)?;
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionSetup))
            .build(ConnectionManager::new(url))?;
        log::debug!("Opened SQLite database {url} with {pool_size} pooled connection(s)");
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        Db::acquire(self.pool.read(), "read-only")
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        Db::acquire(self.pool.write(), "read/write")
    }
}

pub fn run_embedded_database_migrations(mut db: DbReadWrite<'_>) -> Fallible<()> {
    let conn: &mut SqliteConnection = db.conn.get_mut();
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!(err))?;
    if applied.is_empty() {
        log::debug!("Database schema is up to date");
    }
    for version in &applied {
        log::info!("Applied database migration {version}");
    }
    Ok(())
}

//! SQLite order store.

use crate::domain::error::DeskError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::settings::StoreSettings;
use crate::ports::config_port::ConfigPort;
use crate::ports::order_port::OrderPort;
use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

/// Recorded in `created_by`; there is no user model.
const CREATED_BY: &str = "system";

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DeskError> {
        let settings = StoreSettings::from_config(config)?;
        let manager = SqliteConnectionManager::file(&settings.path);
        let pool = Pool::builder()
            .max_size(settings.pool_size)
            .build(manager)
            .map_err(pool_error)?;

        tracing::debug!(path = %settings.path, pool_size = settings.pool_size, "sqlite pool ready");
        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, DeskError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(pool_error)?;

        Ok(Self { pool })
    }

    pub fn initialize_schema(&self) -> Result<(), DeskError> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                term TEXT NOT NULL,
                amount INTEGER NOT NULL,
                rate REAL,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at);",
        )
        .map_err(query_error)?;

        Ok(())
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, DeskError> {
        self.pool.get().map_err(pool_error)
    }
}

impl OrderPort for SqliteAdapter {
    fn create_order(&self, order: &NewOrder) -> Result<Order, DeskError> {
        let conn = self.conn()?;
        let created_at = Utc::now();
        let term = order.term.term();

        conn.execute(
            "INSERT INTO orders (term, amount, rate, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                term,
                order.amount,
                order.rate,
                CREATED_BY,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
            ],
        )
        .map_err(query_error)?;

        Ok(Order {
            id: conn.last_insert_rowid(),
            term: term.to_string(),
            amount: order.amount,
            rate: order.rate,
            created_at,
        })
    }

    fn list_orders(&self) -> Result<Vec<Order>, DeskError> {
        let conn = self.conn()?;

        let query = "SELECT id, term, amount, rate, created_at
                     FROM orders
                     ORDER BY created_at DESC, id DESC";

        let mut stmt = conn.prepare(query).map_err(query_error)?;

        let rows = stmt
            .query_map([], |row| {
                let raw: String = row.get(4)?;
                let created_at = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            4,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?
                    .with_timezone(&Utc);
                Ok(Order {
                    id: row.get(0)?,
                    term: row.get(1)?,
                    amount: row.get(2)?,
                    rate: row.get(3)?,
                    created_at,
                })
            })
            .map_err(query_error)?;

        let mut orders = Vec::new();
        for row in rows {
            orders.push(row.map_err(query_error)?);
        }

        Ok(orders)
    }
}

fn pool_error(e: r2d2::Error) -> DeskError {
    DeskError::Database {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> DeskError {
    DeskError::DatabaseQuery {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::maturity::Maturity;

    struct EmptyConfig;

    impl ConfigPort for EmptyConfig {
        fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
            None
        }
        fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
            default
        }    }

    fn store() -> SqliteAdapter {
        let adapter = SqliteAdapter::in_memory().unwrap();
        adapter.initialize_schema().unwrap();
        adapter
    }

    fn new_order(term: Maturity, amount: i64, rate: Option<f64>) -> NewOrder {
        NewOrder { term, amount, rate }
    }

    #[test]
    fn from_config_missing_path() {
        match SqliteAdapter::from_config(&EmptyConfig) {
            Err(DeskError::ConfigMissing { section, key }) => {
                assert_eq!(section, "sqlite");
                assert_eq!(key, "path");
            }
            Err(other) => panic!("expected ConfigMissing, got: {other}"),
            Ok(_) => panic!("expected error, got Ok"),
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let adapter = store();
        adapter.initialize_schema().unwrap();
    }

    #[test]
    fn create_assigns_id_and_term_name() {
        let adapter = store();
        let first = adapter
            .create_order(&new_order(Maturity::TenYears, 101, Some(4.25)))
            .unwrap();
        let second = adapter
            .create_order(&new_order(Maturity::SixWeeks, 5, None))
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.term, "10 Years");
        assert_eq!(second.term, "1.5 Months");
        assert_eq!(second.rate, None);
    }

    #[test]
    fn list_returns_newest_first() {
        let adapter = store();
        for amount in [10, 20, 30] {
            adapter
                .create_order(&new_order(Maturity::OneYear, amount, None))
                .unwrap();
        }

        let orders = adapter.list_orders().unwrap();
        let amounts: Vec<i64> = orders.iter().map(|o| o.amount).collect();
        assert_eq!(amounts, vec![30, 20, 10]);
    }

    #[test]
    fn list_round_trips_fields() {
        let adapter = store();
        let created = adapter
            .create_order(&new_order(Maturity::ThirtyYears, 1_000_000, Some(4.1)))
            .unwrap();

        let listed = adapter.list_orders().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].term, "30 Years");
        assert_eq!(listed[0].rate, Some(4.1));
        // stored with microsecond precision
        assert_eq!(
            listed[0].created_at.timestamp_micros(),
            created.created_at.timestamp_micros()
        );
    }

    #[test]
    fn list_empty_store() {
        assert!(store().list_orders().unwrap().is_empty());
    }

    #[test]
    fn missing_table_is_query_error() {
        let adapter = SqliteAdapter::in_memory().unwrap();
        let result = adapter.list_orders();
        assert!(matches!(result, Err(DeskError::DatabaseQuery { .. })));
    }
}

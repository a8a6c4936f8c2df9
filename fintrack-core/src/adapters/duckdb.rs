//! DuckDB repository implementation

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use duckdb::types::Type;
use duckdb::{params, Connection};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountType, Currency, NewAccount};
use crate::ports::AccountStore;
use crate::services::MigrationService;

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

const ACCOUNT_COLUMNS: &str = "account_id, name, account_type, currency, balance, color, icon,
                               is_active, created_at, updated_at";

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB repository implementation
pub struct DuckDbRepository {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DuckDbRepository {
    /// Open (or create) the database file.
    ///
    /// Retries with exponential backoff when the file is locked by another
    /// process, e.g. a second CLI invocation that is still running.
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: db_path.to_path_buf(),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        log::warn!(
                            "database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// Open a throwaway in-memory database (tests, dry runs)
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn try_open_connection(db_path: &Path) -> anyhow::Result<Connection> {
        // Extension autoloading stays off; nothing here needs extensions and
        // cached ones can fail code signing on macOS.
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }

    /// Run database migrations using the MigrationService
    pub fn run_migrations(&self) -> anyhow::Result<crate::services::MigrationResult> {
        let conn = self.lock()?;
        let migration_service = MigrationService::new(&conn);
        migration_service.run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> anyhow::Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    /// Path of the database file (`:memory:` for in-memory databases)
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::database(format!("Lock poisoned: {}", e)))
    }

    // === Account operations ===

    fn set_and_fetch(&self, id: Uuid, assignment: &str, value: &dyn duckdb::ToSql) -> Result<Account> {
        let updated_at = format_timestamp(Utc::now());
        let id_str = id.to_string();
        let values: [&dyn duckdb::ToSql; 3] = [value, &updated_at, &id_str];

        let conn = self.lock()?;
        let changed = conn.execute(
            &format!("UPDATE sys_accounts SET {assignment}, updated_at = ? WHERE account_id = ?"),
            &values[..],
        )?;
        if changed == 0 {
            return Err(Error::not_found(format!("Account {}", id)));
        }
        query_account(&conn, id)?.ok_or_else(|| Error::not_found(format!("Account {}", id)))
    }
}

impl AccountStore for DuckDbRepository {
    fn list_active(&self) -> Result<Vec<Account>> {
        let conn = self.lock()?;
        // rowid breaks ties between accounts created in the same microsecond
        let mut stmt = conn.prepare(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM sys_accounts
             WHERE is_active
             ORDER BY created_at DESC, rowid DESC"
        ))?;

        let accounts = stmt
            .query_map([], row_to_account)?
            .collect::<duckdb::Result<Vec<_>>>()?;

        Ok(accounts)
    }

    fn get(&self, id: Uuid) -> Result<Account> {
        let conn = self.lock()?;
        query_account(&conn, id)?
            .filter(|a| a.is_active)
            .ok_or_else(|| Error::not_found(format!("Account {}", id)))
    }

    fn create(&self, fields: NewAccount) -> Result<Account> {
        let account = fields.into_account(Uuid::new_v4(), stored_now())?;
        let conn = self.lock()?;
        insert_account(&conn, &account)?;
        log::debug!("created account {}", account.id);
        Ok(account)
    }

    fn update_balance(&self, id: Uuid, balance: Decimal) -> Result<Account> {
        self.set_and_fetch(id, "balance = ?", &balance.to_string())
    }

    fn archive(&self, id: Uuid) -> Result<Account> {
        self.set_and_fetch(id, "is_active = ?", &false)
    }

    fn reset_and_seed(&self, sample: &[NewAccount]) -> Result<usize> {
        let now = stored_now();
        // Step back one microsecond per entry so newest-first listing
        // yields the sample order
        let seeded = sample
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, fields)| {
                let created_at = now - chrono::Duration::microseconds(i as i64);
                fields.into_account(Uuid::new_v4(), created_at)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM sys_accounts", [])?;
        for account in &seeded {
            insert_account(&tx, account)?;
        }
        tx.commit()?;

        log::debug!("reset {} account(s), seeded {}", deleted, seeded.len());
        Ok(seeded.len())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sys_accounts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn insert_account(conn: &Connection, account: &Account) -> Result<()> {
    conn.execute(
        &format!("INSERT INTO sys_accounts ({ACCOUNT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"),
        params![
            account.id.to_string(),
            account.name,
            account.account_type.code(),
            account.currency.code(),
            account.balance.to_string(),
            account.color,
            account.icon,
            account.is_active,
            format_timestamp(account.created_at),
            format_timestamp(account.updated_at),
        ],
    )?;
    Ok(())
}

fn query_account(conn: &Connection, id: Uuid) -> Result<Option<Account>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM sys_accounts WHERE account_id = ?"
    ))?;
    let mut rows = stmt.query_map([id.to_string()], row_to_account)?;
    let account = rows.next().transpose()?;
    Ok(account)
}

fn row_to_account(row: &duckdb::Row) -> duckdb::Result<Account> {
    // Column order follows ACCOUNT_COLUMNS
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| duckdb::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    let account_type: String = row.get(2)?;
    let currency: String = row.get(3)?;
    let balance_str: String = row.get(4)?;
    let created_str: String = row.get(8)?;
    let updated_str: String = row.get(9)?;

    Ok(Account {
        id,
        name: row.get(1)?,
        account_type: AccountType::from_code(&account_type),
        currency: Currency::from_code(&currency),
        balance: parse_stored_balance(id, &balance_str),
        color: row.get(5)?,
        icon: row.get(6)?,
        is_active: row.get(7)?,
        created_at: parse_timestamp(&created_str),
        updated_at: parse_timestamp(&updated_str),
    })
}

/// Stored balances are written by this module, but a hand-edited row must
/// not break listing: count it as zero and say so.
fn parse_stored_balance(id: Uuid, s: &str) -> Decimal {
    Decimal::from_str(s.trim()).unwrap_or_else(|e| {
        log::warn!("account {} has a malformed balance, counting it as 0: {}", id, e);
        Decimal::ZERO
    })
}

/// Current time at the precision the database keeps
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so that string order matches time order
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

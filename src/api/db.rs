//! Database queries for the transactions API.

use rusqlite::{Connection, Row};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{Error, Transaction, TransactionId, api::MAX_CATEGORY_LENGTH};

/// The request body for creating a transaction.
///
/// Clients may send an `id` field, but it is ignored since the database
/// assigns IDs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// The amount of money spent or earned, stored rounded to the nearest cent.
    pub amount: f64,
    /// A free text label of at most [MAX_CATEGORY_LENGTH] characters.
    pub category: String,
    /// The date of the transaction formatted as `YYYY-MM-DD`.
    pub date: String,
}

impl NewTransaction {
    fn parse_date(&self) -> Result<Date, Error> {
        Date::parse(&self.date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| Error::InvalidDate(self.date.clone()))
    }
}

/// Initialize the database by creating the tables.
///
/// # Errors
/// Returns an error if the tables cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create a new transaction in the database.
///
/// The amount is rounded to the nearest cent.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidDate] if the date is not a valid `YYYY-MM-DD` date,
/// - [Error::InvalidAmount] if the amount is too large to round to cents,
/// - [Error::CategoryTooLong] if the category is longer than [MAX_CATEGORY_LENGTH] characters,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = new_transaction.parse_date()?;

    let category_length = new_transaction.category.chars().count();
    if category_length > MAX_CATEGORY_LENGTH {
        return Err(Error::CategoryTooLong(category_length));
    }

    let amount = (new_transaction.amount * 100.0).round() / 100.0;
    if !amount.is_finite() {
        return Err(Error::InvalidAmount(new_transaction.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, category, date)
             VALUES (?1, ?2, ?3)
             RETURNING id, amount, category, date",
        )?
        .query_row((amount, &new_transaction.category, date), map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare("SELECT id, amount, category, date FROM \"transaction\" WHERE id = :id")?
        .query_one(&[(":id", &id)], map_transaction_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound(id),
            error => error.into(),
        })
}

/// Retrieve all transactions ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let transactions: Result<Vec<Transaction>, rusqlite::Error> = connection
        .prepare("SELECT id, amount, category, date FROM \"transaction\" ORDER BY id")?
        .query_map([], map_transaction_row)?
        .collect();

    transactions.map_err(Error::from)
}

/// Delete a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound(id));
    }

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let date: Date = row.get(3)?;

    Ok(Transaction {
        id,
        amount,
        category,
        date: date.to_string(),
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        Error, Transaction,
        api::{
            NewTransaction, create_transaction, delete_transaction, get_all_transactions,
            get_transaction, initialize,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_transaction(amount: f64, category: &str, date: &str) -> NewTransaction {
        NewTransaction {
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(&new_transaction(12.5, "Food", "2024-01-01"), &conn);

        assert_eq!(
            result,
            Ok(Transaction::new(12.5, "Food", "2024-01-01").with_id(1))
        );
    }

    #[test]
    fn create_fails_on_invalid_date() {
        let conn = get_test_connection();

        let result = create_transaction(&new_transaction(12.5, "Food", "01/01/2024"), &conn);

        assert_eq!(result, Err(Error::InvalidDate("01/01/2024".to_owned())));
    }

    #[test]
    fn create_fails_on_long_category() {
        let conn = get_test_connection();
        let category = "x".repeat(51);

        let result = create_transaction(&new_transaction(12.5, &category, "2024-01-01"), &conn);

        assert_eq!(result, Err(Error::CategoryTooLong(51)));
    }

    #[test]
    fn create_accepts_category_at_limit() {
        let conn = get_test_connection();
        let category = "é".repeat(50);

        let result = create_transaction(&new_transaction(12.5, &category, "2024-01-01"), &conn);

        assert!(result.is_ok(), "want Ok, got {result:?}");
    }

    #[test]
    fn create_fails_on_amount_too_large_to_round() {
        let conn = get_test_connection();

        let result = create_transaction(&new_transaction(1e307, "Big", "2024-01-01"), &conn);

        assert_eq!(result, Err(Error::InvalidAmount(1e307)));
        assert_eq!(get_all_transactions(&conn), Ok(vec![]));
    }

    #[test]
    fn get_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = get_transaction(1, &conn);

        assert_eq!(result, Err(Error::TransactionNotFound(1)));
    }

    #[test]
    fn get_all_returns_transactions_ordered_by_id() {
        let conn = get_test_connection();
        let first = create_transaction(&new_transaction(2.0, "B", "2024-01-02"), &conn).unwrap();
        let second = create_transaction(&new_transaction(1.0, "A", "2024-01-01"), &conn).unwrap();

        let got = get_all_transactions(&conn);

        assert_eq!(got, Ok(vec![first, second]));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction =
            create_transaction(&new_transaction(2.0, "B", "2024-01-02"), &conn).unwrap();

        delete_transaction(transaction.id, &conn).expect("Could not delete transaction");

        assert_eq!(
            get_transaction(transaction.id, &conn),
            Err(Error::TransactionNotFound(transaction.id))
        );
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = delete_transaction(3, &conn);

        assert_eq!(result, Err(Error::TransactionNotFound(3)));
    }
}

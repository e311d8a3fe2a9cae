//! The in-memory list of transactions shown on the transactions page.

use crate::{Error, transaction::Transaction};

/// Identifies one refresh of a [TransactionList].
///
/// Tickets are handed out in increasing order, so a ticket that compares
/// greater belongs to a refresh that started later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// The transactions most recently fetched from the transactions API.
///
/// The list starts empty. A successful fetch replaces the whole list and a
/// failed fetch leaves it as it was, so the page may show stale data when the
/// API is unavailable.
///
/// Fetches run concurrently and may complete out of order. Call
/// [TransactionList::begin_refresh] before starting a fetch and pass the
/// ticket to [TransactionList::finish_refresh] with the result. A result for
/// a refresh that started before the one currently shown is discarded.
#[derive(Debug, Default)]
pub struct TransactionList {
    transactions: Vec<Transaction>,
    next_ticket: u64,
    applied_ticket: Option<RefreshTicket>,
}

impl TransactionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The transactions in the order the API returned them.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Reserve a ticket for a fetch that is about to start.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let ticket = RefreshTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Returns `true` if the list was replaced. Errors are logged and leave
    /// the list unchanged.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Transaction>, Error>,
    ) -> bool {
        let transactions = match result {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("Error fetching transactions: {error}");
                return false;
            }
        };

        if self.applied_ticket.is_some_and(|applied| applied > ticket) {
            tracing::debug!(
                "Discarding transactions from refresh {ticket:?}, refresh {:?} has already been applied",
                self.applied_ticket
            );
            return false;
        }

        self.transactions = transactions;
        self.applied_ticket = Some(ticket);

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        transaction::{Transaction, TransactionList},
    };

    fn coffee() -> Transaction {
        Transaction::new(9.99, "Coffee", "2024-06-01").with_id(1)
    }

    fn rent() -> Transaction {
        Transaction::new(-450.0, "Rent", "2024-06-02").with_id(2)
    }

    #[test]
    fn starts_empty() {
        let list = TransactionList::new();

        assert!(list.transactions().is_empty());
    }

    #[test]
    fn success_replaces_list_in_order() {
        let mut list = TransactionList::new();
        let ticket = list.begin_refresh();
        let want = vec![rent(), coffee()];

        let applied = list.finish_refresh(ticket, Ok(want.clone()));

        assert!(applied);
        assert_eq!(list.transactions(), want.as_slice());
    }

    #[test]
    fn error_leaves_list_unchanged() {
        let mut list = TransactionList::new();
        let ticket = list.begin_refresh();
        list.finish_refresh(ticket, Ok(vec![coffee()]));

        let ticket = list.begin_refresh();
        let applied =
            list.finish_refresh(ticket, Err(Error::Transport("connection refused".to_owned())));

        assert!(!applied);
        assert_eq!(list.transactions(), &[coffee()]);
    }

    #[test]
    fn stale_result_does_not_overwrite_newer_result() {
        let mut list = TransactionList::new();
        let first = list.begin_refresh();
        let second = list.begin_refresh();

        assert!(list.finish_refresh(second, Ok(vec![rent()])));
        assert!(!list.finish_refresh(first, Ok(vec![coffee()])));

        assert_eq!(list.transactions(), &[rent()]);
    }

    #[test]
    fn older_result_applies_when_newer_refresh_failed() {
        let mut list = TransactionList::new();
        let first = list.begin_refresh();
        let second = list.begin_refresh();

        assert!(!list.finish_refresh(second, Err(Error::UnexpectedStatus(500))));
        assert!(list.finish_refresh(first, Ok(vec![coffee()])));

        assert_eq!(list.transactions(), &[coffee()]);
    }
}

use super::errors::DomainError;
use super::order_line::OrderLine;
use super::pagination::{Page, PageRequest};

/// Access mode of a transactional scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Operations available inside an open transaction.
pub trait OrderLineStore {
    /// Insert when `line.id` is `None`, update otherwise. Returns the stored row.
    fn save(&mut self, line: OrderLine) -> Result<OrderLine, DomainError>;
    fn find_by_id(&mut self, id: i64) -> Result<Option<OrderLine>, DomainError>;
    fn find_all(&mut self, request: &PageRequest) -> Result<Page<OrderLine>, DomainError>;
    /// Deleting an id that does not exist is left to the store.
    fn delete_by_id(&mut self, id: i64) -> Result<(), DomainError>;
}

pub trait OrderLineRepository: Send + Sync + 'static {
    /// Run `body` inside one transaction. Commits when `body` returns `Ok`,
    /// rolls back when it returns `Err`, and hands the error back unchanged.
    fn transaction<T, F>(&self, mode: TxMode, body: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn OrderLineStore) -> Result<T, DomainError>;
}

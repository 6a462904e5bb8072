use log::debug;

use crate::domain::errors::DomainError;
use crate::domain::order_line::OrderLine;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::{OrderLineRepository, TxMode};

/// Service for managing [`OrderLine`]s.
///
/// Every call opens exactly one transaction on the repository. Storage errors
/// are returned as the repository produced them.
pub struct OrderLineService<R> {
    repo: R,
}

impl<R: OrderLineRepository> OrderLineService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Insert or update `line`, returning the stored row with its id.
    pub fn save(&self, line: OrderLine) -> Result<OrderLine, DomainError> {
        debug!("Request to save OrderLine : {:?}", line);
        self.repo
            .transaction(TxMode::ReadWrite, |store| store.save(line))
    }

    /// Merge the present fields of `line` onto the stored row with the same id.
    ///
    /// Returns `Ok(None)` when no such row exists.
    pub fn partial_update(&self, line: OrderLine) -> Result<Option<OrderLine>, DomainError> {
        debug!("Request to partially update OrderLine : {:?}", line);
        let id = line.id.ok_or_else(|| {
            DomainError::InvalidInput("partial update requires an id".to_string())
        })?;

        self.repo.transaction(TxMode::ReadWrite, |store| {
            let Some(mut existing) = store.find_by_id(id)? else {
                return Ok(None);
            };
            existing.merge(line);
            store.save(existing).map(Some)
        })
    }

    pub fn find_all(&self, request: &PageRequest) -> Result<Page<OrderLine>, DomainError> {
        debug!("Request to get all OrderLines : {:?}", request);
        self.repo
            .transaction(TxMode::ReadOnly, |store| store.find_all(request))
    }

    pub fn find_one(&self, id: i64) -> Result<Option<OrderLine>, DomainError> {
        debug!("Request to get OrderLine : {}", id);
        self.repo
            .transaction(TxMode::ReadOnly, |store| store.find_by_id(id))
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        debug!("Request to delete OrderLine : {}", id);
        self.repo
            .transaction(TxMode::ReadWrite, |store| store.delete_by_id(id))
    }
}

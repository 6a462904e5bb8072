use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::order_line::OrderLine;
use crate::domain::pagination::{Direction, Page, PageRequest, SortOrder, SortProperty};
use crate::domain::ports::{OrderLineRepository, OrderLineStore, TxMode};

#[derive(Debug, Clone)]
struct MemoryState {
    rows: BTreeMap<i64, OrderLine>,
    next_id: i64,
}

/// Process-local store. Transactions are serialized by a single lock and
/// run against a snapshot that only replaces the live state on commit.
pub struct InMemoryOrderLineRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryOrderLineRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryOrderLineRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderLineRepository for InMemoryOrderLineRepository {
    fn transaction<T, F>(&self, mode: TxMode, body: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn OrderLineStore) -> Result<T, DomainError>,
    {
        let mut live = self
            .state
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut working = live.clone();
        let out = body(&mut MemoryStore {
            state: &mut working,
            mode,
        })?;

        if mode == TxMode::ReadWrite {
            *live = working;
        }
        Ok(out)
    }
}

struct MemoryStore<'a> {
    state: &'a mut MemoryState,
    mode: TxMode,
}

impl MemoryStore<'_> {
    fn ensure_writable(&self) -> Result<(), DomainError> {
        match self.mode {
            TxMode::ReadWrite => Ok(()),
            TxMode::ReadOnly => Err(DomainError::Internal(
                "cannot write in a read-only transaction".to_string(),
            )),
        }
    }
}

impl OrderLineStore for MemoryStore<'_> {
    fn save(&mut self, mut line: OrderLine) -> Result<OrderLine, DomainError> {
        self.ensure_writable()?;

        let id = match line.id {
            Some(id) if self.state.rows.contains_key(&id) => id,
            Some(_) => return Err(DomainError::NotFound),
            None => {
                let id = self.state.next_id;
                self.state.next_id += 1;
                id
            }
        };
        line.id = Some(id);
        self.state.rows.insert(id, line.clone());
        Ok(line)
    }

    fn find_by_id(&mut self, id: i64) -> Result<Option<OrderLine>, DomainError> {
        Ok(self.state.rows.get(&id).cloned())
    }

    fn find_all(&mut self, request: &PageRequest) -> Result<Page<OrderLine>, DomainError> {
        let mut rows: Vec<&OrderLine> = self.state.rows.values().collect();
        if !request.sort.is_empty() {
            // Stable sort keeps ascending id as the final tie-break.
            rows.sort_by(|a, b| {
                request
                    .sort
                    .iter()
                    .map(|order| compare(a, b, order))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        let total = rows.len() as i64;
        let content = rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, total))
    }

    fn delete_by_id(&mut self, id: i64) -> Result<(), DomainError> {
        self.ensure_writable()?;
        self.state.rows.remove(&id);
        Ok(())
    }
}

fn compare(a: &OrderLine, b: &OrderLine, order: &SortOrder) -> Ordering {
    let ascending = match order.property {
        SortProperty::Id => nulls_last(&a.id, &b.id),
        SortProperty::Quantity => nulls_last(&a.quantity, &b.quantity),
        SortProperty::UnityPrice => nulls_last(&a.unity_price, &b.unity_price),
        SortProperty::TotalPrice => nulls_last(&a.total_price, &b.total_price),
    };
    match order.direction {
        Direction::Asc => ascending,
        Direction::Desc => ascending.reverse(),
    }
}

// Same placement as Postgres: NULLS LAST ascending, NULLS FIRST descending.
fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: Option<i32>) -> OrderLine {
        OrderLine {
            quantity,
            ..Default::default()
        }
    }

    fn seed(repo: &InMemoryOrderLineRepository, quantities: &[Option<i32>]) {
        repo.transaction(TxMode::ReadWrite, |store| {
            for q in quantities {
                store.save(line(*q))?;
            }
            Ok(())
        })
        .expect("seed failed");
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let repo = InMemoryOrderLineRepository::new();
        let (a, b) = repo
            .transaction(TxMode::ReadWrite, |store| {
                Ok((store.save(line(Some(1)))?, store.save(line(Some(2)))?))
            })
            .expect("save failed");
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[test]
    fn failed_body_rolls_back() {
        let repo = InMemoryOrderLineRepository::new();
        let result: Result<(), _> = repo.transaction(TxMode::ReadWrite, |store| {
            store.save(line(Some(3)))?;
            Err(DomainError::Internal("boom".to_string()))
        });
        assert!(result.is_err());

        let page = repo
            .transaction(TxMode::ReadOnly, |store| store.find_all(&PageRequest::of(0, 10)))
            .expect("find_all failed");
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn read_only_scope_rejects_writes() {
        let repo = InMemoryOrderLineRepository::new();
        let err = repo
            .transaction(TxMode::ReadOnly, |store| store.save(line(Some(1))))
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn saving_unknown_id_is_not_found() {
        let repo = InMemoryOrderLineRepository::new();
        let err = repo
            .transaction(TxMode::ReadWrite, |store| {
                store.save(OrderLine {
                    id: Some(42),
                    ..Default::default()
                })
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn deleting_unknown_id_is_a_no_op() {
        let repo = InMemoryOrderLineRepository::new();
        repo.transaction(TxMode::ReadWrite, |store| store.delete_by_id(42))
            .expect("delete should not fail");
    }

    #[test]
    fn sorts_with_nulls_last_ascending() {
        let repo = InMemoryOrderLineRepository::new();
        seed(&repo, &[Some(3), None, Some(1)]);

        let request = PageRequest::of(0, 10).with_sort(SortOrder::asc(SortProperty::Quantity));
        let page = repo
            .transaction(TxMode::ReadOnly, |store| store.find_all(&request))
            .expect("find_all failed");
        let quantities: Vec<_> = page.content.iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![Some(1), Some(3), None]);
    }

    #[test]
    fn sorts_with_nulls_first_descending() {
        let repo = InMemoryOrderLineRepository::new();
        seed(&repo, &[Some(3), None, Some(1)]);

        let request = PageRequest::of(0, 10).with_sort(SortOrder::desc(SortProperty::Quantity));
        let page = repo
            .transaction(TxMode::ReadOnly, |store| store.find_all(&request))
            .expect("find_all failed");
        let quantities: Vec<_> = page.content.iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![None, Some(3), Some(1)]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let repo = InMemoryOrderLineRepository::new();
        seed(&repo, &[Some(1), Some(2)]);

        let page = repo
            .transaction(TxMode::ReadOnly, |store| store.find_all(&PageRequest::of(5, 10)))
            .expect("find_all failed");
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 2);
    }
}

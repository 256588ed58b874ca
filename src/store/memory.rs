//! Process-local booking store

use std::sync::RwLock;

use chrono::Utc;

use crate::booking::{Booking, BookingId, BookingPatch, NewBooking};

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::query::BookingQuery;
use super::BookingStore;

/// Booking store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for MemoryStore {
    fn insert(&self, booking: NewBooking) -> StoreResult<Booking> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(booking, Utc::now())
    }

    fn find_by_id(&self, id: &BookingId) -> StoreResult<Booking> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        data.get(id)
    }

    fn find_many(&self, query: &BookingQuery) -> StoreResult<Vec<Booking>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.query(query))
    }

    fn update_partial(&self, id: &BookingId, patch: BookingPatch) -> StoreResult<Booking> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.update(id, patch)
    }

    fn delete_by_id(&self, id: &BookingId) -> StoreResult<Booking> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> NewBooking {
        NewBooking {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            event: "Synergia".to_string(),
            ticket_type: "general".to_string(),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let store = MemoryStore::new();
        let created = store.insert(ann()).unwrap();

        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found, created);
        assert_eq!(store.find_many(&BookingQuery::all()).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let store = MemoryStore::new();
        let id = BookingId::generate();

        assert!(matches!(store.find_by_id(&id), Err(StoreError::NotFound)));
        assert!(matches!(
            store.update_partial(&id, BookingPatch::default()),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete_by_id(&id), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_store_is_shareable() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.insert(ann()).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.find_many(&BookingQuery::all()).unwrap().len(), 4);
    }
}

use std::sync::{Mutex, PoisonError};
use crate::books::domain::catalog::Catalog;
use crate::core::library::LibraryResult;

// CatalogStore is the durable side of the catalog: a full load and a full,
// atomic replace. It holds no lock of its own; CatalogRepository serializes access.
pub trait CatalogStore: Sync + Send {
    // load reads every record of the backing store
    fn load(&self) -> LibraryResult<Catalog>;

    // save replaces the backing store with the catalog, all or nothing
    fn save(&self, catalog: &Catalog) -> LibraryResult<()>;
}

// Change tells perform whether the closure mutated the catalog and a save is due.
#[derive(Debug, PartialEq, Eq)]
pub enum Change<T> {
    Unchanged(T),
    Mutated(T),
}

impl<T> Change<T> {
    pub fn is_mutated(&self) -> bool {
        matches!(self, Change::Mutated(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Change::Unchanged(val) => val,
            Change::Mutated(val) => val,
        }
    }
}

pub struct CatalogRepository {
    store: Box<dyn CatalogStore>,
    lock: Mutex<()>,
}

impl CatalogRepository {
    pub fn new(store: Box<dyn CatalogStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    // perform runs one load-mutate-save cycle under the repository lock. At most one
    // perform runs at a time; readers and writers alike wait here. The lock is released
    // on every exit path, and nothing is saved unless f returns Ok(Change::Mutated).
    pub fn perform<T, F>(&self, f: F) -> LibraryResult<T>
        where F: FnOnce(&mut Catalog) -> LibraryResult<Change<T>> {
        // the guarded state lives on disk, so a panic in an earlier holder leaves nothing torn
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut catalog = self.store.load()?;
        let change = f(&mut catalog)?;
        if change.is_mutated() {
            self.store.save(&catalog)?;
        }
        Ok(change.into_inner())
    }

    // snapshot loads a consistent copy of the catalog under the lock.
    pub fn snapshot(&self) -> LibraryResult<Catalog> {
        self.perform(|catalog| Ok(Change::Unchanged(catalog.clone())))
    }
}

use std::sync::Arc;
use crate::books::repository::txt_catalog_store::TxtCatalogStore;
use crate::core::domain::Configuration;
use crate::core::repository::CatalogRepository;

// create_catalog_repository builds the one repository instance a process shares;
// every service handle must clone this Arc rather than build its own lock.
pub fn create_catalog_repository(config: &Configuration) -> Arc<CatalogRepository> {
    let store = TxtCatalogStore::new(config.data_file.clone());
    Arc::new(CatalogRepository::new(Box::new(store)))
}

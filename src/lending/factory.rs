use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::core::repository::CatalogRepository;
use crate::lending::domain::LendingService;
use crate::lending::domain::service::LendingServiceImpl;

pub fn create_lending_service(config: &Configuration, repository: Arc<CatalogRepository>) -> Box<dyn LendingService> {
    Box::new(LendingServiceImpl::new(config, repository))
}

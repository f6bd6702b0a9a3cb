pub mod txt_catalog_store;

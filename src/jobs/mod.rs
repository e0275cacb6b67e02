pub mod catalog_sync;

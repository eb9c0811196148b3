//! Catalog persistence port and adapters.

mod memory;
#[cfg(feature = "database")]
mod postgres;
mod ports;

pub use memory::InMemoryCatalogRepository;
#[cfg(feature = "database")]
pub use postgres::PostgresCatalogRepository;
pub use ports::CatalogRepository;

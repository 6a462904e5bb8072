pub mod memory_repo;
pub mod models;
pub mod order_line_repo;

pub use memory_repo::InMemoryOrderLineRepository;
pub use order_line_repo::DieselOrderLineRepository;

pub mod errors;
pub mod order_line;
pub mod pagination;
pub mod ports;

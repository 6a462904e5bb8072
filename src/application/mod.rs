pub mod order_line_service;

pub mod order_lines;

pub mod board;
pub mod table;

pub mod error;
pub mod mapper;
pub mod table;

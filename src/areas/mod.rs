pub mod output;
pub mod repository;

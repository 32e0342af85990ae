pub mod config;
pub mod console;
pub mod db;
pub mod models;
pub mod store;

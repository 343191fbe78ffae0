pub mod adapters;
pub mod config;
pub mod error;
pub mod form;
pub mod notifications;
pub mod table;
pub mod terminal;

mod connection;
mod migrations;
mod repositories;

pub use connection::Database;

pub mod client;
pub mod commands;
pub mod connection;
pub mod responses;
pub mod xml;

pub use client::GmpClient;
pub use connection::GmpConnection;

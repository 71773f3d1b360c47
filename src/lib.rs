pub mod cli;
pub mod config;
pub mod errors;
pub mod gmp;
pub mod models;
pub mod reporting;

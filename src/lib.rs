pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod edit;
pub mod filter;
pub mod model;
pub mod output;
pub mod paginator;
pub mod runner;
pub mod selection;
pub mod source;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;

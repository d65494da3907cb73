pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod filter;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

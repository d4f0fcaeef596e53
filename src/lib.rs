pub mod app;
pub mod config;
pub mod feed;
pub mod gateway;
pub mod pages;
pub mod telemetry;
pub mod types;
pub mod util;

pub use app::App;

pub(crate) mod internal;

#[cfg(test)]
pub(crate) mod test_utils;

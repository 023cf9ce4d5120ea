// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod challenge;
pub mod config;
pub mod custom_pack;
pub mod diff;
mod embedded;
pub mod history;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod store;
pub mod ui;
pub mod word_packs;

pub use embedded::EmbeddedError;

pub mod batch;
pub mod capabilities;
pub mod disk_store;
pub mod enums;
pub mod errors;
pub mod headless_share;
pub mod models;
pub mod pipeline;
pub mod proxy_client;
pub mod strategies;
pub mod system_clipboard;

#[cfg(test)]
pub(crate) mod fakes;

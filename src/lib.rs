pub mod config;
pub mod content;
pub mod logger;
pub mod server;
pub mod store;
pub mod wire;
mod query_string;
mod test_data;
mod text_utils;
mod view;

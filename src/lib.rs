pub mod app;
pub mod cli;
pub mod codec;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;
pub mod utils;

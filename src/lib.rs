pub mod cli;
pub mod config;
pub mod matcher;
pub mod roster;
pub mod server;
pub mod storage;

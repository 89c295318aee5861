pub mod config;
pub mod enums;
pub mod models;
pub mod output;
pub mod service;
pub mod structs;

pub mod compiler;
pub mod controller;
pub mod dtos;
pub mod enums;
pub mod errors;
pub mod gate;
pub mod models;
pub mod normalizer;
pub mod payload;
pub mod provider;
pub mod service;

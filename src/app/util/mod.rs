pub mod multipart;
pub mod reqwest;

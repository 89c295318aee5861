pub mod file_properties;

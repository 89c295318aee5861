pub mod raw_fields;

pub mod generated_image;
pub mod parameter_set;

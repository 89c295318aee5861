pub mod input_spec;
pub mod replicate_model_ref;

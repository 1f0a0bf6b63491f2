pub mod constants;
pub mod error;
pub mod input_descriptor;
pub mod model_resolver;
pub mod paths;

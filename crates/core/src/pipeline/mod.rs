pub mod temp_artifact;
pub mod transcribe_file_use_case;

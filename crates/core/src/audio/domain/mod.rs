pub mod audio_segment;
pub mod noise_profile;
pub mod speech_recognizer;
pub mod transcript;

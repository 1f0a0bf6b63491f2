pub mod audio_reader;
pub mod wav_writer;

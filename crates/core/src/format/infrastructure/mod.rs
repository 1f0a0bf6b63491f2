pub mod ffmpeg_audio_reader;
pub mod hound_wav_writer;

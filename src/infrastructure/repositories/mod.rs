pub mod example_repository;
pub mod remote_speech_model;
pub mod speech_model;

pub use example_repository::ExampleRepository;
pub use remote_speech_model::RemoteSpeechModel;
pub use speech_model::{ModelError, SpeechModel};

pub mod example_files;
pub mod output_store;
pub mod staging;

pub use example_files::ExampleFileStore;
pub use output_store::OutputStore;
pub use staging::StagedUpload;

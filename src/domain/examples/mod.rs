pub mod error;
pub mod model;
pub mod service;

pub use error::ExampleServiceError;
pub use model::AudioExample;
pub use service::{ExampleService, ExampleServiceApi};

use serde::{Deserialize, Serialize};

/// Response for DELETE /examples/{id}
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteExampleResponse {
    pub message: String,
}

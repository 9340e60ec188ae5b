pub mod adapter;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod labels;
pub mod registry;
pub mod report;

// Re-export commonly used types for convenience
pub use adapter::Prediction;
pub use backend::ClassifierBackend;
pub use config::RegistryConfig;
pub use engine::{Diagnosis, DiagnosisEngine};
pub use error::{DiagnoseError, Result};
pub use labels::{BodyPart, FractureStatus, ModelKey};
pub use registry::ClassifierRegistry;
pub use report::DiagnosisRecord;

#[cfg(feature = "ort-backend")]
pub use backend::ort::OrtBackend;

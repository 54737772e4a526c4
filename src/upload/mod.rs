//! Upload intake
//!
//! Validates an uploaded CSV file and stages it as a temporary artifact
//! that is removed once the import is done with it.

mod intake;
mod request;

pub use intake::{UploadIntake, UploadedArtifact, IMPORT_FILE_PREFIX};
pub use request::{FilePart, UploadRequest, FILE_FIELD};

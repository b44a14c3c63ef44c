pub mod certificate;
pub mod jurisdiction;
pub mod minute;
pub mod stamp;

pub use certificate::{
    compose_blocks, render, write_artifacts, CertificateArtifacts, CertificateInput, ComposeError,
};
pub use jurisdiction::{header_for, JurisdictionHeader};
pub use minute::write_minute;
pub use stamp::RunStamp;

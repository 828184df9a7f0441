//! Archive storage.

mod archive;

pub use archive::{
    ARTIFACT_PREFIX, ArchiveStore, TEXT_EXTENSION, parse_artifact_name, text_artifact_name,
};

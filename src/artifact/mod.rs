// Mon Aug 17 2026 - Alex

pub mod error;
pub mod kind;
pub mod loader;
pub mod locate;
pub mod node;

pub use error::LoaderError;
pub use kind::{is_recognized, ArtifactKind, FormatHint};
pub use loader::{load, load_str, Artifact};
pub use node::{Node, NodeValue, Scalar};

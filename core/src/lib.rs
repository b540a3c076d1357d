pub mod error;
pub mod traits;
pub mod types;

pub use error::{EngineError, TessError};
pub use traits::{OcrEngine, VaultPort};
pub use types::{
    is_image_name, is_markdown_name, ImageResource, ReferenceMatch, RunSummary, VaultNode,
    IMAGE_EXTENSIONS, MARKDOWN_EXTENSION,
};

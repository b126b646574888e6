pub mod decode;
pub mod form;
pub mod json;
pub mod multipart;
pub mod path;
pub mod query;
pub mod validated;

/// Gives access to the value produced by an `Api*` extractor.
pub trait Extractor {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}

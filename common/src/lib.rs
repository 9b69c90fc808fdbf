//! Flora Images Common Library
//!
//! Convenciones de nombres y similitud compartidas por el CLI y las pruebas

pub mod naming;
pub mod similarity;

pub use naming::{allowed_extension, file_stem, CanonicalName, DEFAULT_IMAGE_EXTENSIONS};
pub use similarity::{best_match, ratio, Match};

//! flora-images
//!
//! Alinea las carpetas del banco de imágenes de plantas con los nombres
//! científicos de un Excel y optimiza las imágenes para web.

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod intake;
pub mod names;
pub mod optimizer;
pub mod reconciler;
pub mod report;
pub mod scaffold;
pub mod scanner;

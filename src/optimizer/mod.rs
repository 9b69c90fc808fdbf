//! Optimización de imágenes para web
//!
//! Reduce y recomprime las imágenes sin cambiar nombres ni estructura de
//! carpetas. Un fallo en una imagen se cuenta y no detiene el lote.

mod compress;

pub use compress::{optimize_image, OptimizeOptions, OptimizedImage};

use crate::error::Result;
use crate::scanner::{self, ImageInfo};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Totales de un lote
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizeStats {
    pub total_images: usize,
    pub optimized: usize,
    pub errors: usize,
    pub total_original_mb: f64,
    pub total_new_mb: f64,
    /// Carpetas con al menos una imagen
    pub folders_processed: usize,
}

impl OptimizeStats {
    pub fn saved_mb(&self) -> f64 {
        self.total_original_mb - self.total_new_mb
    }

    pub fn reduction_percent(&self) -> f64 {
        if self.total_original_mb <= 0.0 {
            return 0.0;
        }
        self.saved_mb() / self.total_original_mb * 100.0
    }
}

/// Optimiza las imágenes de `folder`
///
/// `on_result` se llama tras cada imagen con su resultado.
pub fn optimize_folder<S, F>(
    folder: &Path,
    recursive: bool,
    extensions: &[S],
    options: &OptimizeOptions,
    mut on_result: F,
) -> Result<OptimizeStats>
where
    S: AsRef<str>,
    F: FnMut(&ImageInfo, &Result<OptimizedImage>),
{
    let images = scanner::scan_folder(folder, recursive, extensions)?;
    debug!(count = images.len(), folder = %folder.display(), "imágenes encontradas");

    let mut stats = OptimizeStats {
        total_images: images.len(),
        ..Default::default()
    };
    let mut folders = HashSet::new();

    for info in &images {
        if let Some(parent) = info.path.parent() {
            folders.insert(parent.to_path_buf());
        }

        let result = optimize_image(&info.path, options);
        match &result {
            Ok(optimized) => {
                stats.optimized += 1;
                stats.total_original_mb += optimized.original_kb / 1024.0;
                stats.total_new_mb += optimized.new_kb / 1024.0;
            }
            Err(e) => {
                warn!(path = %info.path.display(), error = %e, "no se pudo optimizar");
                stats.errors += 1;
            }
        }
        on_result(info, &result);
    }

    stats.folders_processed = folders.len();
    Ok(stats)
}

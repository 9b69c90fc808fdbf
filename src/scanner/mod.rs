use crate::error::{FloraError, Result};
use flora_images_common::allowed_extension;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl ImageInfo {
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Imágenes de `folder` (y subcarpetas si `recursive`), ordenadas por ruta
pub fn scan_folder<S: AsRef<str>>(
    folder: &Path,
    recursive: bool,
    extensions: &[S],
) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(FloraError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if allowed_extension(path, extensions).is_none() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);

        images.push(ImageInfo {
            path: path.to_path_buf(),
            file_name,
            size_bytes,
        });
    }

    images.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(images)
}

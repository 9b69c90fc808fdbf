//! Copia de seguridad de las carpetas de especies

use crate::error::{FloraError, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Copia cada subcarpeta y cada archivo suelto de `base` a `dest`
///
/// Los archivos sueltos también se copian porque el optimizador los
/// sobrescribe aunque no esté en modo recursivo. Lo que ya existe en `dest` no
/// se toca. Devuelve los nombres copiados, ordenados.
pub fn backup_species(base: &Path, dest: &Path) -> Result<Vec<String>> {
    if !base.is_dir() {
        return Err(FloraError::FolderNotFound(base.display().to_string()));
    }
    std::fs::create_dir_all(dest)?;

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(base)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        entries.push((name, entry.file_type()?.is_dir()));
    }
    entries.sort();

    let mut copied = Vec::new();
    for (name, is_dir) in entries {
        let target = dest.join(&name);
        if target.exists() {
            debug!(entry = %name, "ya respaldado");
            continue;
        }
        if is_dir {
            copy_tree(&base.join(&name), &target)?;
        } else {
            std::fs::copy(base.join(&name), &target)?;
        }
        copied.push(name);
    }

    Ok(copied)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| FloraError::Io(std::io::Error::other(e)))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

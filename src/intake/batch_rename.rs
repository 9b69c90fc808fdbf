//! Renombrado en lote `{patrón}_{NNNN}.{ext}`

use crate::error::{FloraError, Result};
use crate::scanner;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_RENAME_PATTERN: &str = "planta";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRenameStats {
    pub renamed: usize,
    /// El destino ya existía
    pub skipped: usize,
    pub errors: usize,
}

/// Renombra todas las imágenes bajo `folder` (recursivo)
///
/// El índice sigue el orden de ruta y avanza con cada imagen, se renombre o
/// no. Cada imagen queda en su carpeta y conserva la extensión en
/// minúsculas. Nunca se sobrescribe.
/// `on_rename` recibe origen, destino y el resultado.
pub fn batch_rename<S, F>(
    folder: &Path,
    pattern: &str,
    extensions: &[S],
    mut on_rename: F,
) -> Result<BatchRenameStats>
where
    S: AsRef<str>,
    F: FnMut(&Path, &Path, &Result<()>),
{
    if pattern.trim().is_empty() {
        return Err(FloraError::Config("el patrón no puede estar vacío".into()));
    }

    let images = scanner::scan_folder(folder, true, extensions)?;
    let mut stats = BatchRenameStats::default();

    for (index, info) in images.iter().enumerate() {
        let ext = info
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let new_name = format!("{}_{:04}.{}", pattern, index + 1, ext);
        let target: PathBuf = info.path.with_file_name(&new_name);

        if target == info.path {
            continue;
        }

        let result = if target.exists() {
            stats.skipped += 1;
            Err(FloraError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("ya existe {}", new_name),
            )))
        } else {
            match std::fs::rename(&info.path, &target) {
                Ok(()) => {
                    stats.renamed += 1;
                    Ok(())
                }
                Err(e) => {
                    warn!(path = %info.path.display(), error = %e, "no se pudo renombrar");
                    stats.errors += 1;
                    Err(e.into())
                }
            }
        };
        on_rename(&info.path, &target, &result);
    }

    Ok(stats)
}

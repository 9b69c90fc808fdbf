//! Acceso al sistema de archivos usado por el conciliador
//!
//! El conciliador sólo necesita listar, renombrar y comprobar existencia; las
//! pruebas sustituyen [`StdFileSystem`] para simular fallos de renombrado.

use std::io;
use std::path::Path;

/// Entrada de un directorio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub name: String,
    pub is_dir: bool,
}

pub trait FileSystem {
    /// Entradas directas de `path`, sin orden garantizado
    fn list_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// Implementación sobre `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            entries.push(FsEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        Ok(entries)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_dir_marks_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Mimosa_pudica")).unwrap();
        std::fs::write(dir.path().join("notas.txt"), "x").unwrap();

        let mut entries = StdFileSystem.list_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![
                FsEntry { name: "Mimosa_pudica".into(), is_dir: true },
                FsEntry { name: "notas.txt".into(), is_dir: false },
            ]
        );
    }

    #[test]
    fn test_list_dir_missing() {
        assert!(StdFileSystem.list_dir(Path::new("/no/existe/12345")).is_err());
    }
}

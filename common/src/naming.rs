//! Convenciones de nombres de carpetas e imágenes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Extensiones de imagen admitidas por defecto (en minúsculas, sin punto)
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Nombre canónico de carpeta derivado de un nombre científico
///
/// `"Ficus benjamina"` → `"Ficus_benjamina"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalName(String);

impl CanonicalName {
    /// Devuelve `None` si el nombre queda vacío tras recortar espacios
    pub fn from_scientific(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.replace(' ', "_")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{nombre}_{contador:02}.{ext}`
    pub fn numbered_file_name(&self, counter: usize, extension: &str) -> String {
        format!("{}.{}", self.numbered_stem(counter), extension)
    }

    /// `{nombre}_{contador:02}`
    pub fn numbered_stem(&self, counter: usize) -> String {
        format!("{}_{:02}", self.0, counter)
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extensión de la ruta en minúsculas, si está en la lista admitida
pub fn allowed_extension<S: AsRef<str>>(path: &Path, allowed: &[S]) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    allowed
        .iter()
        .any(|a| a.as_ref().eq_ignore_ascii_case(&ext))
        .then_some(ext)
}

/// Nombre de archivo sin extensión
pub fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

use std::fmt;
use std::path::PathBuf;

/// Parámetros de una ejecución del conciliador
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Carpeta con una subcarpeta por especie
    pub base_dir: PathBuf,
    /// Similitud mínima (0.0-1.0) para aceptar una carpeta
    pub threshold: f64,
    /// Extensiones de imagen admitidas, sin punto
    pub extensions: Vec<String>,
}

/// Suceso de la conciliación, en el orden en que ocurre
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileEvent {
    /// Ninguna carpeta alcanza el umbral
    NoMatch { name: String },
    FolderRenamed { from: String, to: String, score: f64 },
    /// La carpeta ya tenía el nombre canónico
    FolderUnchanged { name: String },
    /// El destino existe y no es la carpeta encontrada
    FolderCollision { from: String, to: String },
    ImageRenamed { folder: String, from: String, to: String },
    /// Ya existe un archivo con ese número; no se renombra ni avanza el contador
    ImageSkipped { folder: String, file: String, candidate: String },
    RenameFailed { from: PathBuf, to: PathBuf, reason: String },
    ReadFailed { path: PathBuf, reason: String },
}

impl fmt::Display for ReconcileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileEvent::NoMatch { name } => {
                write!(f, "❌ No se encontró carpeta parecida a: {}", name)
            }
            ReconcileEvent::FolderRenamed { from, to, score } => {
                write!(f, "📁 Renombrada carpeta: {} → {} ({:.2})", from, to, score)
            }
            ReconcileEvent::FolderUnchanged { name } => {
                write!(f, "✔ Carpeta ya correcta: {}", name)
            }
            ReconcileEvent::FolderCollision { from, to } => {
                write!(f, "⚠️ Ya existe {}, no se renombró {}", to, from)
            }
            ReconcileEvent::ImageRenamed { from, to, .. } => {
                write!(f, "   🖼️ Imagen: {} → {}", from, to)
            }
            ReconcileEvent::ImageSkipped { candidate, .. } => {
                write!(f, "   ⚠️ Ya existe: {}, se omitió.", candidate)
            }
            ReconcileEvent::RenameFailed { from, to, reason } => {
                write!(
                    f,
                    "❌ Error al renombrar {} → {}: {}",
                    from.display(),
                    to.display(),
                    reason
                )
            }
            ReconcileEvent::ReadFailed { path, reason } => {
                write!(f, "❌ No se pudo leer {}: {}", path.display(), reason)
            }
        }
    }
}

impl ReconcileEvent {
    /// Colisiones y errores de E/S; el resto son resultados normales
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ReconcileEvent::FolderCollision { .. }
                | ReconcileEvent::RenameFailed { .. }
                | ReconcileEvent::ReadFailed { .. }
        )
    }
}

/// Resumen de una ejecución
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub names_processed: usize,
    pub folders_renamed: usize,
    pub folders_unchanged: usize,
    pub unmatched: usize,
    pub images_renamed: usize,
    pub images_skipped: usize,
    pub failures: usize,
    pub events: Vec<ReconcileEvent>,
}

impl ReconcileReport {
    pub(crate) fn record(&mut self, event: ReconcileEvent) {
        match &event {
            _ if event.is_failure() => self.failures += 1,
            ReconcileEvent::NoMatch { .. } => self.unmatched += 1,
            ReconcileEvent::FolderRenamed { .. } => self.folders_renamed += 1,
            ReconcileEvent::FolderUnchanged { .. } => self.folders_unchanged += 1,
            ReconcileEvent::ImageRenamed { .. } => self.images_renamed += 1,
            ReconcileEvent::ImageSkipped { .. } => self.images_skipped += 1,
            _ => {}
        }
        self.events.push(event);
    }

    /// Número total de renombrados (carpetas + imágenes)
    pub fn total_renames(&self) -> usize {
        self.folders_renamed + self.images_renamed
    }
}

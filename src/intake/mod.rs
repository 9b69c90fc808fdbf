//! Ingreso de imágenes nuevas a `planta_NNN`
//!
//! Las primeras imágenes de la carpeta fuente se copian como principales
//! (`planta_NNN_01.jpg` ..), las siguientes como detalles
//! (`planta_NNN_flor.jpg` ..). Cada copia se optimiza y el resultado queda en
//! `metadata.json`.

mod batch_rename;

pub use batch_rename::{batch_rename, BatchRenameStats, DEFAULT_RENAME_PATTERN};

use crate::error::Result;
use crate::optimizer::{optimize_image, OptimizeOptions, OptimizedImage};
use crate::scaffold::plant_folder_name;
use crate::scanner;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MAX_PRINCIPAL_IMAGES: usize = 3;
pub const DETAIL_KINDS: &[&str] = &["flor", "hoja", "fruto", "tallo", "general"];
pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantMetadata {
    pub plant_id: String,
    pub plant_name: Option<String>,
    pub images: Vec<IntakeImage>,
    pub total_size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeImage {
    pub filename: String,
    pub size_kb: f64,
    /// `principal` o el tipo de detalle
    #[serde(rename = "type")]
    pub kind: String,
}

/// Resultado de [`import_plant`]
#[derive(Debug, Clone)]
pub struct ImportedPlant {
    pub folder: PathBuf,
    pub metadata: PlantMetadata,
    /// Imágenes de la fuente que no entraron (más allá de principales + detalles)
    pub ignored: usize,
}

/// Nombre destino y tipo para la imagen en la posición `index` (base 0)
fn slot(plant_id: usize, index: usize) -> Option<(String, &'static str)> {
    let folder = plant_folder_name(plant_id);
    if index < MAX_PRINCIPAL_IMAGES {
        return Some((format!("{}_{:02}.jpg", folder, index + 1), "principal"));
    }
    DETAIL_KINDS
        .get(index - MAX_PRINCIPAL_IMAGES)
        .map(|kind| (format!("{}_{}.jpg", folder, kind), *kind))
}

/// Copia y optimiza las imágenes de `source` en `dest_base/planta_NNN`
///
/// Las imágenes de la fuente se toman en orden de nombre. Una copia que no se
/// puede optimizar se borra y no aparece en la metadata. `on_image` recibe el
/// nombre destino y el resultado de cada optimización.
pub fn import_plant<S, F>(
    source: &Path,
    dest_base: &Path,
    plant_id: usize,
    plant_name: Option<&str>,
    extensions: &[S],
    options: &OptimizeOptions,
    mut on_image: F,
) -> Result<ImportedPlant>
where
    S: AsRef<str>,
    F: FnMut(&str, &Result<OptimizedImage>),
{
    let images = scanner::scan_folder(source, false, extensions)?;

    let folder = dest_base.join(plant_folder_name(plant_id));
    std::fs::create_dir_all(&folder)?;
    debug!(count = images.len(), folder = %folder.display(), "ingresando imágenes");

    let mut processed = Vec::new();
    let mut ignored = 0;

    for (index, info) in images.iter().enumerate() {
        let Some((filename, kind)) = slot(plant_id, index) else {
            ignored += 1;
            continue;
        };

        let dest = folder.join(&filename);
        std::fs::copy(&info.path, &dest)?;

        let result = optimize_image(&dest, options);
        match &result {
            Ok(optimized) => processed.push(IntakeImage {
                filename: filename.clone(),
                size_kb: round2(optimized.new_kb),
                kind: kind.to_string(),
            }),
            Err(e) => {
                warn!(source = %info.path.display(), error = %e, "no se pudo optimizar");
                std::fs::remove_file(&dest)?;
            }
        }
        on_image(&filename, &result);
    }

    let total_kb: f64 = processed.iter().map(|i| i.size_kb).sum();
    let metadata = PlantMetadata {
        plant_id: plant_folder_name(plant_id),
        plant_name: plant_name.map(str::to_string),
        images: processed,
        total_size_mb: round2(total_kb / 1024.0),
    };

    let json = serde_json::to_string_pretty(&metadata)?;
    std::fs::write(folder.join(METADATA_FILE), json)?;

    Ok(ImportedPlant {
        folder,
        metadata,
        ignored,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

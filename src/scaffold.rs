//! Estructura inicial de carpetas `planta_NNN`

use crate::error::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLANT_COUNT: usize = 500;

pub fn plant_folder_name(index: usize) -> String {
    format!("planta_{:03}", index)
}

/// Crea `base/planta_001 .. base/planta_{count}` y devuelve sólo las nuevas
pub fn create_folder_structure(base: &Path, count: usize) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(base)?;

    let mut created = Vec::new();
    for index in 1..=count {
        let path = base.join(plant_folder_name(index));
        if path.exists() {
            continue;
        }
        std::fs::create_dir(&path)?;
        created.push(path);
    }

    Ok(created)
}

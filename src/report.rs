//! Reporte de estado del banco de imágenes (JSON)

use crate::error::{FloraError, Result};
use crate::scanner;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_REPORT_FILE: &str = "reporte_optimizacion.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub fecha: String,
    pub carpeta_base: String,
    pub especies: BTreeMap<String, SpeciesEntry>,
    pub resumen: ReportSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub nombre_cientifico: String,
    pub num_imagenes: usize,
    #[serde(rename = "tamaño_total_mb")]
    pub total_mb: f64,
    pub imagenes: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    pub nombre: String,
    #[serde(rename = "tamaño_kb")]
    pub size_kb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_especies: usize,
    pub total_imagenes: usize,
    /// Sólo se conoce justo después de optimizar; 0 en un reporte de estado
    #[serde(rename = "tamaño_original_mb")]
    pub original_mb: f64,
    #[serde(rename = "tamaño_optimizado_mb")]
    pub total_mb: f64,
}

impl OptimizationReport {
    /// Anota el tamaño previo a la optimización
    pub fn with_original_mb(mut self, original_mb: f64) -> Self {
        self.resumen.original_mb = round2(original_mb);
        self
    }
}

/// Recorre las subcarpetas de `base` y cuenta sus imágenes
///
/// Las carpetas sin imágenes no aparecen en el reporte.
pub fn build_report<S: AsRef<str>>(base: &Path, extensions: &[S]) -> Result<OptimizationReport> {
    if !base.is_dir() {
        return Err(FloraError::FolderNotFound(base.display().to_string()));
    }

    let mut especies = BTreeMap::new();
    let mut resumen = ReportSummary::default();

    for entry in std::fs::read_dir(base)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let folder = entry.file_name().to_string_lossy().to_string();
        let images = scanner::scan_folder(&entry.path(), false, extensions)?;
        if images.is_empty() {
            continue;
        }

        let total_kb: f64 = images.iter().map(|i| i.size_kb()).sum();
        let imagenes = images
            .iter()
            .map(|i| ImageEntry {
                nombre: i.file_name.clone(),
                size_kb: round2(i.size_kb()),
            })
            .collect();

        resumen.total_especies += 1;
        resumen.total_imagenes += images.len();
        resumen.total_mb += total_kb / 1024.0;

        especies.insert(
            folder.clone(),
            SpeciesEntry {
                nombre_cientifico: folder,
                num_imagenes: images.len(),
                total_mb: round2(total_kb / 1024.0),
                imagenes,
            },
        );
    }

    resumen.total_mb = round2(resumen.total_mb);

    Ok(OptimizationReport {
        fecha: chrono::Local::now().to_rfc3339(),
        carpeta_base: base.display().to_string(),
        especies,
        resumen,
    })
}

pub fn write_report(report: &OptimizationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_summary_uses_original_keys() {
        let summary = ReportSummary {
            total_especies: 1,
            total_imagenes: 2,
            original_mb: 1.25,
            total_mb: 0.5,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"total_especies\":1"));
        assert!(json.contains("\"tamaño_original_mb\":1.25"));
        assert!(json.contains("\"tamaño_optimizado_mb\":0.5"));
    }
}

//! Lectura de nombres científicos desde Excel
//!
//! La primera hoja debe tener una fila de encabezado con la columna
//! `nombre_cientifico` (sin distinguir mayúsculas ni espacios alrededor).

use crate::error::{FloraError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use flora_images_common::CanonicalName;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

pub const NAME_COLUMN: &str = "nombre_cientifico";

/// Nombres científicos no vacíos, en el orden de la hoja
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(FloraError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FloraError::EmptySpreadsheet(path.display().to_string()))??;

    let names = names_from_range(&range, path)?;
    debug!(count = names.len(), path = %path.display(), "nombres leídos");
    Ok(names)
}

/// Nombres canónicos sin repetir, conservando la primera aparición
pub fn canonical_names(names: &[String]) -> Vec<CanonicalName> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter_map(|n| CanonicalName::from_scientific(n))
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

fn names_from_range(range: &Range<Data>, path: &Path) -> Result<Vec<String>> {
    let mut rows = range.rows();

    let header = rows
        .next()
        .ok_or_else(|| FloraError::EmptySpreadsheet(path.display().to_string()))?;

    let column = header
        .iter()
        .position(|cell| cell_to_string(cell).trim().to_lowercase() == NAME_COLUMN)
        .ok_or_else(|| FloraError::MissingNameColumn {
            column: NAME_COLUMN.to_string(),
            path: path.display().to_string(),
        })?;

    Ok(rows
        .filter_map(|row| row.get(column))
        .map(|cell| cell_to_string(cell).trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloraError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Carpeta no encontrada: {0}")]
    FolderNotFound(String),

    #[error("No se pudo leer la hoja de cálculo: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("La hoja de cálculo está vacía: {0}")]
    EmptySpreadsheet(String),

    #[error("No existe la columna '{column}' en {path}")]
    MissingNameColumn { column: String, path: String },

    #[error("Error de imagen: {0}")]
    Image(#[from] image::ImageError),

    #[error("Error de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operación cancelada por el usuario")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, FloraError>;

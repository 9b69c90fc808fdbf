use crate::error::{FloraError, Result};
use flora_images_common::DEFAULT_IMAGE_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const BASE_DIR_ENV: &str = "FLORA_BASE_DIR";
pub const NAMES_PATH_ENV: &str = "FLORA_NAMES_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Carpeta con una subcarpeta por especie
    pub base_dir: Option<PathBuf>,
    /// Excel con la columna `nombre_cientifico`
    pub names_path: Option<PathBuf>,
    pub threshold: f64,
    pub extensions: Vec<String>,
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            names_path: None,
            threshold: 0.6,
            extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_dimension: 1920,
            jpeg_quality: 85,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FloraError::Config("No se encontró el directorio personal".into()))?;
        Ok(home.join(".config").join("flora-images").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FloraError::Config(format!(
                "el umbral debe estar entre 0 y 1: {}",
                self.threshold
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FloraError::Config(format!(
                "la calidad JPEG debe estar entre 1 y 100: {}",
                self.jpeg_quality
            )));
        }
        if self.max_dimension == 0 {
            return Err(FloraError::Config("el tamaño máximo debe ser mayor que 0".into()));
        }
        Ok(())
    }

    /// Carpeta base: CLI > variable de entorno > archivo de configuración
    pub fn resolve_base_dir(&self, cli: Option<PathBuf>) -> Result<PathBuf> {
        cli.or_else(|| std::env::var_os(BASE_DIR_ENV).map(PathBuf::from))
            .or_else(|| self.base_dir.clone())
            .ok_or_else(|| {
                FloraError::Config(format!(
                    "falta la carpeta base. Use --base, {} o `flora-images config --set-base-dir`",
                    BASE_DIR_ENV
                ))
            })
    }

    /// Excel de nombres: CLI > variable de entorno > archivo de configuración
    pub fn resolve_names_path(&self, cli: Option<PathBuf>) -> Result<PathBuf> {
        cli.or_else(|| std::env::var_os(NAMES_PATH_ENV).map(PathBuf::from))
            .or_else(|| self.names_path.clone())
            .ok_or_else(|| {
                FloraError::Config(format!(
                    "falta el Excel de nombres. Use --names, {} o `flora-images config --set-names`",
                    NAMES_PATH_ENV
                ))
            })
    }

    pub fn set_base_dir(&mut self, path: PathBuf) -> Result<()> {
        self.base_dir = Some(path);
        self.save()
    }

    pub fn set_names_path(&mut self, path: PathBuf) -> Result<()> {
        self.names_path = Some(path);
        self.save()
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        self.threshold = threshold;
        self.validate()?;
        self.save()
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flora-images")]
#[command(about = "Renombra carpetas de plantas por nombre científico y optimiza imágenes para web", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Mostrar logs de diagnóstico
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Renombrar carpetas e imágenes según los nombres científicos del Excel
    Reconcile {
        /// Carpeta con una subcarpeta por especie
        #[arg(short, long)]
        base: Option<PathBuf>,

        /// Excel con la columna nombre_cientifico
        #[arg(short, long)]
        names: Option<PathBuf>,

        /// Similitud mínima (0.0-1.0)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Reducir y recomprimir imágenes (sobrescribe los originales)
    Optimize {
        /// Carpeta a optimizar
        #[arg(required = true)]
        folder: PathBuf,

        /// Incluir subcarpetas
        #[arg(short, long)]
        recursive: bool,

        /// Lado máximo en píxeles
        #[arg(long)]
        max_size: Option<u32>,

        /// Calidad JPEG (1-100)
        #[arg(short, long)]
        quality: Option<u8>,

        /// Copiar la carpeta aquí antes de optimizar
        #[arg(long)]
        backup: Option<PathBuf>,

        /// Escribir el reporte JSON al terminar
        #[arg(long)]
        report: Option<PathBuf>,

        /// No pedir confirmación
        #[arg(short, long)]
        yes: bool,
    },

    /// Generar reporte JSON del estado de las carpetas
    Report {
        /// Carpeta base con las especies
        #[arg(required = true)]
        base: PathBuf,

        /// Archivo de salida
        #[arg(short, long, default_value = crate::report::DEFAULT_REPORT_FILE)]
        output: PathBuf,
    },

    /// Copiar carpetas de especies y archivos sueltos a una carpeta de respaldo
    Backup {
        /// Carpeta base con las especies
        #[arg(required = true)]
        base: PathBuf,

        /// Carpeta de respaldo
        #[arg(required = true)]
        dest: PathBuf,
    },

    /// Crear carpetas planta_001..planta_N
    Scaffold {
        /// Carpeta donde crearlas
        #[arg(short, long, default_value = "plantas")]
        base: PathBuf,

        /// Número de carpetas
        #[arg(short, long, default_value_t = crate::scaffold::DEFAULT_PLANT_COUNT)]
        count: usize,
    },

    /// Copiar y optimizar las imágenes de una planta en planta_NNN
    Import {
        /// Carpeta con las fotos originales
        #[arg(required = true)]
        source: PathBuf,

        /// Número de planta (planta_NNN)
        #[arg(short, long)]
        id: usize,

        /// Nombre de la planta para metadata.json
        #[arg(short, long)]
        name: Option<String>,

        /// Carpeta con las carpetas planta_NNN
        #[arg(short, long, default_value = "plantas")]
        base: PathBuf,
    },

    /// Renombrar todas las imágenes como {patrón}_NNNN (recursivo)
    Rename {
        /// Carpeta a renombrar
        #[arg(required = true)]
        folder: PathBuf,

        /// Prefijo de los nuevos nombres
        #[arg(short, long, default_value = crate::intake::DEFAULT_RENAME_PATTERN)]
        pattern: String,

        /// No pedir confirmación
        #[arg(short, long)]
        yes: bool,
    },

    /// Mostrar/editar la configuración
    Config {
        /// Guardar la carpeta base por defecto
        #[arg(long)]
        set_base_dir: Option<PathBuf>,

        /// Guardar el Excel de nombres por defecto
        #[arg(long)]
        set_names: Option<PathBuf>,

        /// Guardar el umbral de similitud
        #[arg(long)]
        set_threshold: Option<f64>,

        /// Mostrar la configuración
        #[arg(long)]
        show: bool,
    },
}

use anyhow::Context;
use clap::Parser;
use dialoguer::Confirm;
use flora_images::{
    backup, cli, config, error, intake, names, optimizer, reconciler, report, scaffold, scanner,
};
use cli::{Cli, Commands};
use config::Config;
use error::FloraError;
use indicatif::{ProgressBar, ProgressStyle};
use optimizer::OptimizeOptions;
use reconciler::{ReconcileConfig, Reconciler};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = Config::load().context("no se pudo cargar la configuración")?;

    match cli.command {
        Commands::Reconcile { base, names: names_arg, threshold } => {
            println!("🌿 flora-images - Conciliar carpetas\n");

            let base_dir = config.resolve_base_dir(base)?;
            let names_path = config.resolve_names_path(names_arg)?;
            let threshold = threshold.unwrap_or(config.threshold);
            Config { threshold, ..config.clone() }.validate()?;

            // 1. Nombres
            println!("[1/2] Leyendo nombres científicos...");
            let raw_names = names::read_names(&names_path)
                .with_context(|| format!("no se pudo leer {}", names_path.display()))?;
            let canonical = names::canonical_names(&raw_names);
            println!("✔ {} nombres ({} únicos)\n", raw_names.len(), canonical.len());

            // 2. Carpetas e imágenes
            println!("[2/2] Renombrando en {}...", base_dir.display());
            let reconciler = Reconciler::with_std_fs(ReconcileConfig {
                base_dir,
                threshold,
                extensions: config.extensions.clone(),
            });
            let summary = reconciler.run(&canonical, |event| println!("{}", event))?;

            println!("\n📊 Resumen:");
            println!("   Nombres procesados: {}", summary.names_processed);
            println!("   Carpetas renombradas: {}", summary.folders_renamed);
            println!("   Carpetas ya correctas: {}", summary.folders_unchanged);
            println!("   Sin coincidencia: {}", summary.unmatched);
            println!("   Imágenes renombradas: {}", summary.images_renamed);
            println!("   Imágenes omitidas: {}", summary.images_skipped);
            if summary.failures > 0 {
                println!("   Errores: {}", summary.failures);
            }

            println!("\n✅ Conciliación completada");
        }

        Commands::Optimize {
            folder,
            recursive,
            max_size,
            quality,
            backup: backup_dir,
            report: report_path,
            yes,
        } => {
            println!("🌿 flora-images - Optimizador de imágenes\n");

            let options = OptimizeOptions {
                max_dimension: max_size.unwrap_or(config.max_dimension),
                quality: quality.unwrap_or(config.jpeg_quality),
            };
            Config {
                max_dimension: options.max_dimension,
                jpeg_quality: options.quality,
                ..config.clone()
            }
            .validate()?;

            if !folder.is_dir() {
                return Err(FloraError::FolderNotFound(folder.display().to_string()).into());
            }

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("⚠️  Esto SOBRESCRIBE las imágenes originales. ¿Continuar?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    return Err(FloraError::Cancelled.into());
                }
            }

            if let Some(dest) = backup_dir {
                println!("📦 Creando backup en: {}", dest.display());
                let copied = backup::backup_species(&folder, &dest)?;
                println!("✔ {} elementos copiados\n", copied.len());
            }

            let total = scanner::scan_folder(&folder, recursive, config.extensions.as_slice())?.len();
            let progress = ProgressBar::new(total as u64);
            progress.set_style(
                ProgressStyle::with_template("[{bar:40}] {pos}/{len} {msg}")?.progress_chars("=> "),
            );

            let stats = optimizer::optimize_folder(
                &folder,
                recursive,
                config.extensions.as_slice(),
                &options,
                |info, result| {
                    match result {
                        Ok(optimized) => progress.println(format!(
                            "   ✅ {} {}{:.1}KB → {:.1}KB ({:.1}%)",
                            info.file_name,
                            if optimized.resized { "↔ " } else { "" },
                            optimized.original_kb,
                            optimized.new_kb,
                            optimized.reduction_percent(),
                        )),
                        Err(e) => progress.println(format!("   ❌ {} - Error: {}", info.file_name, e)),
                    }
                    progress.inc(1);
                },
            )?;
            progress.finish_and_clear();

            println!("\n📊 Resumen:");
            if recursive {
                println!("   Carpetas procesadas: {}", stats.folders_processed);
            }
            println!("   Imágenes optimizadas: {}/{}", stats.optimized, stats.total_images);
            if stats.errors > 0 {
                println!("   Errores: {}", stats.errors);
            }
            println!("   Tamaño original: {:.1} MB", stats.total_original_mb);
            println!("   Tamaño final: {:.1} MB", stats.total_new_mb);
            println!(
                "   Reducción: {:.1} MB ({:.1}%)",
                stats.saved_mb(),
                stats.reduction_percent()
            );

            if let Some(path) = report_path {
                let summary = report::build_report(&folder, config.extensions.as_slice())?
                    .with_original_mb(stats.total_original_mb);
                report::write_report(&summary, &path)?;
                println!("📊 Reporte generado: {}", path.display());
            }

            println!("\n✅ Optimización completada");
        }

        Commands::Report { base, output } => {
            let summary = report::build_report(&base, config.extensions.as_slice())?;
            report::write_report(&summary, &output)?;

            println!("📊 Reporte generado: {}", output.display());
            println!("   Total especies: {}", summary.resumen.total_especies);
            println!("   Total imágenes: {}", summary.resumen.total_imagenes);
            println!("   Tamaño total: {:.1} MB", summary.resumen.total_mb);
        }

        Commands::Backup { base, dest } => {
            println!("📦 Creando backup en: {}", dest.display());
            let copied = backup::backup_species(&base, &dest)?;
            for name in &copied {
                println!("   Copiado {}", name);
            }
            println!("✅ Backup completado ({} elementos)", copied.len());
        }

        Commands::Scaffold { base, count } => {
            let created = scaffold::create_folder_structure(&base, count)?;
            println!("✅ Creadas {} carpetas en {}", created.len(), base.display());
        }

        Commands::Import { source, id, name, base } => {
            let options = OptimizeOptions {
                max_dimension: config.max_dimension,
                quality: config.jpeg_quality,
            };

            println!("📸 Procesando imágenes para {}", scaffold::plant_folder_name(id));
            let imported = intake::import_plant(
                &source,
                &base,
                id,
                name.as_deref(),
                config.extensions.as_slice(),
                &options,
                |file_name, result| match result {
                    Ok(optimized) => println!("  ✅ {} ({:.1} KB)", file_name, optimized.new_kb),
                    Err(e) => println!("  ❌ {} - Error: {}", file_name, e),
                },
            )?;

            if imported.ignored > 0 {
                println!("  ⚠️ {} imágenes sin lugar, no se copiaron", imported.ignored);
            }
            println!(
                "✅ {} imágenes en {} ({:.2} MB)",
                imported.metadata.images.len(),
                imported.folder.display(),
                imported.metadata.total_size_mb
            );
        }

        Commands::Rename { folder, pattern, yes } => {
            println!("🔄 Renombrando imágenes en {}", folder.display());

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Todas las imágenes pasarán a {}_NNNN. ¿Continuar?", pattern))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    return Err(FloraError::Cancelled.into());
                }
            }

            let stats = intake::batch_rename(
                &folder,
                &pattern,
                config.extensions.as_slice(),
                |from, to, result| {
                    let from = from.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                    let to = to.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                    match result {
                        Ok(()) => println!("✅ {} → {}", from, to),
                        Err(e) => println!("❌ {} → {}: {}", from, to, e),
                    }
                },
            )?;

            println!(
                "\n📊 Renombradas: {}  Omitidas: {}  Errores: {}",
                stats.renamed, stats.skipped, stats.errors
            );
        }

        Commands::Config { set_base_dir, set_names, set_threshold, show } => {
            let mut config = config;

            if let Some(path) = set_base_dir {
                config.set_base_dir(path)?;
                println!("✔ Carpeta base guardada");
            }

            if let Some(path) = set_names {
                config.set_names_path(path)?;
                println!("✔ Excel de nombres guardado");
            }

            if let Some(threshold) = set_threshold {
                config.set_threshold(threshold)?;
                println!("✔ Umbral guardado");
            }

            if show {
                let unset = || "no definido".to_string();
                println!("Configuración ({}):", Config::config_path()?.display());
                println!(
                    "  Carpeta base: {}",
                    config.base_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!(
                    "  Excel de nombres: {}",
                    config.names_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!("  Umbral de similitud: {}", config.threshold);
                println!("  Formatos: {}", config.extensions.join(", "));
                println!("  Tamaño máximo: {}x{} píxeles", config.max_dimension, config.max_dimension);
                println!("  Calidad JPEG: {}%", config.jpeg_quality);
            }
        }
    }

    Ok(())
}

//! Conciliador de carpetas
//!
//! Para cada nombre canónico busca la carpeta más parecida bajo la carpeta
//! base, la renombra al nombre canónico y renumera sus imágenes como
//! `{nombre}_{NN}.{ext}`.
//!
//! ## Reglas
//! - El listado de la carpeta base se vuelve a leer para cada nombre, porque
//!   los renombrados anteriores lo modifican.
//! - Nunca se sobrescribe un archivo: si el número ya está ocupado (con
//!   cualquier extensión) la imagen se omite y el contador no avanza.
//! - Una carpeta asignada a un nombre deja de ser candidata para los
//!   siguientes, así ninguna carpeta se renombra dos veces en la misma
//!   ejecución.
//! - Los fallos de renombrado se registran y la ejecución continúa.

mod types;

pub use types::{ReconcileConfig, ReconcileEvent, ReconcileReport};

use crate::error::{FloraError, Result};
use crate::fs::{FileSystem, StdFileSystem};
use flora_images_common::{allowed_extension, best_match, file_stem, CanonicalName};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

pub struct Reconciler<F: FileSystem = StdFileSystem> {
    config: ReconcileConfig,
    fs: F,
}

impl Reconciler<StdFileSystem> {
    pub fn with_std_fs(config: ReconcileConfig) -> Self {
        Self::new(config, StdFileSystem)
    }
}

impl<F: FileSystem> Reconciler<F> {
    pub fn new(config: ReconcileConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// Concilia todos los nombres en orden
    ///
    /// `on_event` recibe cada suceso en cuanto ocurre. Sólo la ausencia de la
    /// carpeta base o un fallo al listarla interrumpen la ejecución.
    pub fn run<E>(&self, names: &[CanonicalName], mut on_event: E) -> Result<ReconcileReport>
    where
        E: FnMut(&ReconcileEvent),
    {
        let base = &self.config.base_dir;
        if !self.fs.is_dir(base) {
            return Err(FloraError::FolderNotFound(base.display().to_string()));
        }

        let mut recorder = Recorder {
            report: ReconcileReport::default(),
            sink: &mut on_event,
        };
        let mut seen = HashSet::new();
        let mut claimed = HashSet::new();

        for name in names {
            if !seen.insert(name.clone()) {
                continue;
            }
            recorder.report.names_processed += 1;
            self.reconcile_name(name, &mut claimed, &mut recorder)?;
        }

        Ok(recorder.report)
    }

    fn reconcile_name(
        &self,
        name: &CanonicalName,
        claimed: &mut HashSet<String>,
        recorder: &mut Recorder<'_>,
    ) -> Result<()> {
        let base = &self.config.base_dir;

        let folders: Vec<String> = self
            .fs
            .list_dir(base)?
            .into_iter()
            .filter(|e| e.is_dir && !claimed.contains(&e.name))
            .map(|e| e.name)
            .collect();

        let found = match best_match(
            name.as_str(),
            folders.iter().map(String::as_str),
            self.config.threshold,
        ) {
            Some(found) => found,
            None => {
                recorder.emit(ReconcileEvent::NoMatch {
                    name: name.to_string(),
                });
                return Ok(());
            }
        };
        debug!(name = %name, candidate = found.candidate, score = found.score, "carpeta encontrada");

        let target_dir = base.join(name.as_str());

        if found.candidate == name.as_str() {
            recorder.emit(ReconcileEvent::FolderUnchanged {
                name: name.to_string(),
            });
        } else if self.fs.exists(&target_dir) {
            recorder.emit(ReconcileEvent::FolderCollision {
                from: found.candidate.to_string(),
                to: name.to_string(),
            });
            return Ok(());
        } else {
            let from_dir = base.join(found.candidate);
            if let Err(e) = self.fs.rename(&from_dir, &target_dir) {
                recorder.emit(ReconcileEvent::RenameFailed {
                    from: from_dir,
                    to: target_dir,
                    reason: e.to_string(),
                });
                return Ok(());
            }
            recorder.emit(ReconcileEvent::FolderRenamed {
                from: found.candidate.to_string(),
                to: name.to_string(),
                score: found.score,
            });
        }

        claimed.insert(name.to_string());
        self.renumber_images(name, &target_dir, recorder);
        Ok(())
    }

    fn renumber_images(&self, name: &CanonicalName, dir: &Path, recorder: &mut Recorder<'_>) {
        let mut files: Vec<String> = match self.fs.list_dir(dir) {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| !e.is_dir)
                .map(|e| e.name)
                .collect(),
            Err(e) => {
                recorder.emit(ReconcileEvent::ReadFailed {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                return;
            }
        };
        files.sort();

        // nombres presentes en la carpeta, actualizados tras cada renombrado
        let mut present = files.clone();
        let mut counter = 1;

        for file in &files {
            let Some(ext) = allowed_extension(Path::new(file), self.config.extensions.as_slice()) else {
                continue;
            };

            let stem = name.numbered_stem(counter);
            let candidate = name.numbered_file_name(counter, &ext);
            let to = dir.join(&candidate);

            if present.iter().any(|p| file_stem(p) == stem) || self.fs.exists(&to) {
                recorder.emit(ReconcileEvent::ImageSkipped {
                    folder: name.to_string(),
                    file: file.clone(),
                    candidate,
                });
                continue;
            }

            let from = dir.join(file);
            match self.fs.rename(&from, &to) {
                Ok(()) => {
                    present.retain(|p| p != file);
                    present.push(candidate.clone());
                    recorder.emit(ReconcileEvent::ImageRenamed {
                        folder: name.to_string(),
                        from: file.clone(),
                        to: candidate,
                    });
                    counter += 1;
                }
                Err(e) => recorder.emit(ReconcileEvent::RenameFailed {
                    from,
                    to,
                    reason: e.to_string(),
                }),
            }
        }
    }
}

struct Recorder<'a> {
    report: ReconcileReport,
    sink: &'a mut dyn FnMut(&ReconcileEvent),
}

impl Recorder<'_> {
    fn emit(&mut self, event: ReconcileEvent) {
        // el sink es la salida visible; aquí sólo diagnóstico
        debug!(failure = event.is_failure(), "{}", event);
        (self.sink)(&event);
        self.report.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FsEntry;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::io;
    use std::path::PathBuf;

    /// Sistema de archivos en memoria: ruta -> es_directorio
    #[derive(Default)]
    struct MemoryFs {
        entries: RefCell<BTreeMap<PathBuf, bool>>,
        /// Renombrados cuyo origen termina con este nombre fallan
        fail_on: Option<String>,
    }

    impl MemoryFs {
        fn with(paths: &[(&str, bool)]) -> Self {
            let fs = Self::default();
            fs.entries.borrow_mut().insert(PathBuf::from("/base"), true);
            for (p, is_dir) in paths {
                fs.entries.borrow_mut().insert(PathBuf::from(p), *is_dir);
            }
            fs
        }

        fn paths(&self) -> Vec<String> {
            self.entries
                .borrow()
                .keys()
                .map(|p| p.display().to_string())
                .collect()
        }
    }

    impl FileSystem for MemoryFs {
        fn list_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
            if !self.is_dir(path) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no existe"));
            }
            Ok(self
                .entries
                .borrow()
                .iter()
                .filter(|(p, _)| p.parent() == Some(path))
                .map(|(p, is_dir)| FsEntry {
                    name: p.file_name().unwrap().to_string_lossy().to_string(),
                    is_dir: *is_dir,
                })
                .collect())
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            if let Some(fail) = &self.fail_on {
                if from.ends_with(fail) {
                    return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denegado"));
                }
            }
            let mut entries = self.entries.borrow_mut();
            let moved: Vec<(PathBuf, bool)> = entries
                .iter()
                .filter(|(p, _)| p.starts_with(from))
                .map(|(p, d)| (p.clone(), *d))
                .collect();
            for (p, d) in moved {
                entries.remove(&p);
                let rest = p.strip_prefix(from).unwrap();
                let new_path = if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                };
                entries.insert(new_path, d);
            }
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.entries.borrow().contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.entries.borrow().get(path).copied().unwrap_or(false)
        }
    }

    fn config() -> ReconcileConfig {
        ReconcileConfig {
            base_dir: PathBuf::from("/base"),
            threshold: 0.6,
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }

    fn names(list: &[&str]) -> Vec<CanonicalName> {
        list.iter()
            .filter_map(|n| CanonicalName::from_scientific(n))
            .collect()
    }

    #[test]
    fn test_missing_base_is_fatal() {
        let fs = MemoryFs::default();
        let reconciler = Reconciler::new(config(), fs);
        let result = reconciler.run(&names(&["Mimosa pudica"]), |_| {});
        assert!(matches!(result, Err(FloraError::FolderNotFound(_))));
    }

    #[test]
    fn test_renames_close_folder_and_images() {
        let fs = MemoryFs::with(&[
            ("/base/Ficus_benjamin", true),
            ("/base/Ficus_benjamin/b.JPG", false),
            ("/base/Ficus_benjamin/a.png", false),
        ]);
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler.run(&names(&["Ficus benjamina"]), |_| {}).unwrap();

        assert_eq!(report.folders_renamed, 1);
        assert_eq!(report.images_renamed, 2);
        assert_eq!(
            reconciler.fs.paths(),
            vec![
                "/base",
                "/base/Ficus_benjamina",
                "/base/Ficus_benjamina/Ficus_benjamina_01.png",
                "/base/Ficus_benjamina/Ficus_benjamina_02.jpg",
            ]
        );
    }

    #[test]
    fn test_events_are_streamed_in_order() {
        let fs = MemoryFs::with(&[
            ("/base/Mimosa_pudica", true),
            ("/base/Mimosa_pudica/img1.jpg", false),
        ]);
        let reconciler = Reconciler::new(config(), fs);
        let mut seen = Vec::new();
        let report = reconciler
            .run(&names(&["Mimosa pudica", "Zzz unmatched plant"]), |e| {
                seen.push(e.clone())
            })
            .unwrap();

        assert_eq!(seen, report.events);
        assert!(matches!(seen[0], ReconcileEvent::FolderUnchanged { .. }));
        assert!(matches!(seen[1], ReconcileEvent::ImageRenamed { .. }));
        assert!(matches!(seen[2], ReconcileEvent::NoMatch { .. }));
    }

    #[test]
    fn test_duplicate_names_processed_once() {
        let fs = MemoryFs::with(&[("/base/Mimosa_pudica", true)]);
        let reconciler = Reconciler::new(config(), fs);
        let list = vec![
            CanonicalName::from_scientific("Mimosa pudica").unwrap(),
            CanonicalName::from_scientific("Mimosa pudica").unwrap(),
        ];
        let report = reconciler.run(&list, |_| {}).unwrap();
        assert_eq!(report.names_processed, 1);
        assert_eq!(report.folders_unchanged, 1);
    }

    #[test]
    fn test_claimed_folder_not_reused() {
        let fs = MemoryFs::with(&[("/base/Ficus_benjamin", true)]);
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler
            .run(&names(&["Ficus benjamina", "Ficus benjaminb"]), |_| {})
            .unwrap();

        assert_eq!(report.folders_renamed, 1);
        assert_eq!(report.unmatched, 1);
        assert!(reconciler.fs.exists(Path::new("/base/Ficus_benjamina")));
    }

    #[test]
    fn test_only_directories_are_candidates() {
        let fs = MemoryFs::with(&[("/base/Mimosa_pudica.txt", false)]);
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler.run(&names(&["Mimosa pudica"]), |_| {}).unwrap();
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.folders_renamed, 0);
    }

    #[test]
    fn test_target_occupied_by_file_is_collision() {
        let fs = MemoryFs::with(&[
            ("/base/Mimosa_pudic", true),
            ("/base/Mimosa_pudica", false),
        ]);
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler.run(&names(&["Mimosa pudica"]), |_| {}).unwrap();

        assert_eq!(report.failures, 1);
        assert!(matches!(report.events[0], ReconcileEvent::FolderCollision { .. }));
        assert!(reconciler.fs.exists(Path::new("/base/Mimosa_pudic")));
    }

    #[test]
    fn test_folder_rename_failure_continues() {
        let mut fs = MemoryFs::with(&[
            ("/base/Ficus_benjamin", true),
            ("/base/Ficus_benjamin/a.jpg", false),
            ("/base/Mimosa_pudic", true),
        ]);
        fs.fail_on = Some("Ficus_benjamin".into());
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler
            .run(&names(&["Ficus benjamina", "Mimosa pudica"]), |_| {})
            .unwrap();

        assert_eq!(report.failures, 1);
        assert_eq!(report.folders_renamed, 1);
        // sin renombrar la carpeta no se tocan sus imágenes
        assert!(reconciler.fs.exists(Path::new("/base/Ficus_benjamin/a.jpg")));
        assert!(reconciler.fs.exists(Path::new("/base/Mimosa_pudica")));
    }

    #[test]
    fn test_image_rename_failure_keeps_counter() {
        let mut fs = MemoryFs::with(&[
            ("/base/Mimosa_pudica", true),
            ("/base/Mimosa_pudica/a.jpg", false),
            ("/base/Mimosa_pudica/b.jpg", false),
        ]);
        fs.fail_on = Some("a.jpg".into());
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler.run(&names(&["Mimosa pudica"]), |_| {}).unwrap();

        assert_eq!(report.failures, 1);
        assert_eq!(report.images_renamed, 1);
        assert!(reconciler
            .fs
            .exists(Path::new("/base/Mimosa_pudica/Mimosa_pudica_01.jpg")));
        assert!(reconciler.fs.exists(Path::new("/base/Mimosa_pudica/a.jpg")));
    }

    #[test]
    fn test_counter_blocked_by_other_extension() {
        let fs = MemoryFs::with(&[
            ("/base/Mimosa_pudica", true),
            ("/base/Mimosa_pudica/Mimosa_pudica_01.png", false),
            ("/base/Mimosa_pudica/x.jpg", false),
        ]);
        let reconciler = Reconciler::new(config(), fs);
        let report = reconciler.run(&names(&["Mimosa pudica"]), |_| {}).unwrap();

        assert_eq!(report.images_renamed, 0);
        assert_eq!(report.images_skipped, 2);
        assert!(reconciler.fs.exists(Path::new("/base/Mimosa_pudica/x.jpg")));
    }
}

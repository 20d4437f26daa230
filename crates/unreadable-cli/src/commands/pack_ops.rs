use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;
use unreadable_core::settings::PackSettings;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::project::Project;

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("no language files in {}", .0.display())]
    Empty(PathBuf),
}

/// What went into a written archive.
#[derive(Debug)]
pub struct PackReport {
    pub path: PathBuf,
    pub size: u64,
    pub entries: Vec<String>,
}

/// Human-readable size: MB above one mebibyte, KB otherwise.
pub fn format_size(bytes: u64) -> String {
    if bytes > 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    }
}

/// Output files to pack, sorted by name, minus the excluded stems.
fn language_files(output_dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, PackError> {
    let io_err = |source| PackError::Io {
        path: output_dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(output_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if exclude.iter().any(|name| name == stem) {
            debug!(file = %path.display(), "excluded");
            continue;
        }
        files.push(path);
    }
    files.sort();
    if files.is_empty() {
        return Err(PackError::Empty(output_dir.to_path_buf()));
    }
    Ok(files)
}

fn add_file<W: Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<(), PackError> {
    let bytes = fs::read(path).map_err(|source| PackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    zip.start_file(name, options)?;
    zip.write_all(&bytes).map_err(|source| PackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write the resource pack: metadata and icon at the archive root, language
/// files under `lang_prefix`.
pub fn write_pack(
    root: &Path,
    output_dir: &Path,
    pack: &PackSettings,
    dest: &Path,
) -> Result<PackReport, PackError> {
    let files = language_files(output_dir, &pack.exclude)?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let file = File::create(dest).map_err(|source| PackError::Io {
        path: dest.to_path_buf(),
        source,
    })?;
    let mut zip = ZipWriter::new(file);
    let mut entries = Vec::with_capacity(files.len() + 2);

    for extra in [&pack.meta, &pack.icon] {
        let path = root.join(extra);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| extra.clone());
        add_file(&mut zip, &path, &name, options)?;
        entries.push(name);
    }
    for path in &files {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let name = format!("{}{}", pack.lang_prefix, file_name.to_string_lossy());
        add_file(&mut zip, path, &name, options)?;
        entries.push(name);
    }
    zip.finish()?;

    let size = fs::metadata(dest)
        .map_err(|source| PackError::Io {
            path: dest.to_path_buf(),
            source,
        })?
        .len();
    Ok(PackReport {
        path: dest.to_path_buf(),
        size,
        entries,
    })
}

pub fn pack(project: &Project) {
    let start = Instant::now();
    let settings = &project.settings;
    let report = die!(
        write_pack(
            &project.root,
            &settings.output_dir(&project.root),
            &settings.pack,
            &settings.pack_file(&project.root),
        ),
        "Error writing resource pack: {}"
    );
    eprintln!(
        "Wrote {} ({} entries, {}) in {:.2} s",
        report.path.display(),
        report.entries.len(),
        format_size(report.size),
        start.elapsed().as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use unreadable_core::settings::{default_toml, parse_settings_toml};

    use super::*;

    fn pack_settings() -> PackSettings {
        parse_settings_toml(default_toml()).unwrap().pack
    }

    fn project_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        fs::create_dir(&out).unwrap();
        fs::write(dir.path().join("pack.mcmeta"), "{\"pack\":{}}").unwrap();
        fs::write(dir.path().join("pack.png"), [0x89, b'P', b'N', b'G']).unwrap();
        fs::write(out.join("zh_py.json"), "{\n  \"k\": \"Nǐhǎo\"\n}\n").unwrap();
        fs::write(out.join("en_i7h.json"), "{}\n").unwrap();
        fs::write(out.join("zh_split.json"), "{}\n").unwrap();
        fs::write(out.join("notes.txt"), "not a language file").unwrap();
        dir
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(512), "0.50 KB");
        assert_eq!(format_size(1_048_576), "1024.00 KB");
        assert_eq!(format_size(3 * 1_048_576 / 2), "1.50 MB");
    }

    #[test]
    fn writes_archive_layout() {
        let dir = project_dir();
        let dest = dir.path().join("pack.zip");
        let report =
            write_pack(dir.path(), &dir.path().join("output"), &pack_settings(), &dest).unwrap();
        assert_eq!(
            report.entries,
            [
                "pack.mcmeta",
                "pack.png",
                "assets/minecraft/lang/en_i7h.json",
                "assets/minecraft/lang/zh_py.json",
            ]
        );
        assert_eq!(report.size, fs::metadata(&dest).unwrap().len());

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 4);
        let mut body = String::new();
        archive
            .by_name("assets/minecraft/lang/zh_py.json")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "{\n  \"k\": \"Nǐhǎo\"\n}\n");
        assert!(archive.by_name("assets/minecraft/lang/zh_split.json").is_err());
    }

    #[test]
    fn missing_icon_fails() {
        let dir = project_dir();
        fs::remove_file(dir.path().join("pack.png")).unwrap();
        let err = write_pack(
            dir.path(),
            &dir.path().join("output"),
            &pack_settings(),
            &dir.path().join("pack.zip"),
        )
        .unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
        assert!(err.to_string().contains("pack.png"));
    }

    #[test]
    fn empty_output_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("zh_split.json"), "{}\n").unwrap();
        let err = write_pack(dir.path(), &out, &pack_settings(), &dir.path().join("p.zip"))
            .unwrap_err();
        assert!(matches!(err, PackError::Empty(_)));
    }
}

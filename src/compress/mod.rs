//! Compressed siblings for build output.
//!
//! Every eligible file under the output directory is replaced by a
//! compressed copy named `<file><ext>` (`index.js` -> `index.js.gz`). The
//! asset canister serves a single content encoding per path, so the
//! uncompressed original is deleted unless `delete_origin` is off.
//!
//! ```text
//! dist/                      dist/
//! ├── index.html             ├── index.html        (excluded)
//! ├── index.js        ──►    ├── index.js.gz
//! ├── logo.png               ├── logo.png          (excluded)
//! └── ii.wasm                └── ii.wasm.gz
//! ```

mod codec;
mod filter;

use filter::Skip;

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;

use crate::config::CompressConfig;
use crate::error::{HookError, HookResult};
use crate::logger::ProgressLine;
use crate::{debug, log};

/// One file that was compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
}

/// Outcome of a compression pass.
#[derive(Debug, Default)]
pub struct CompressReport {
    pub compressed: Vec<CompressedFile>,
    pub excluded: usize,
    pub below_threshold: usize,
}

impl CompressReport {
    pub fn original_bytes(&self) -> u64 {
        self.compressed.iter().map(|f| f.original_size).sum()
    }

    pub fn compressed_bytes(&self) -> u64 {
        self.compressed.iter().map(|f| f.compressed_size).sum()
    }
}

/// Compress every eligible file under `dir`.
///
/// Files are processed in parallel; the first error aborts the pass and is
/// returned once in-flight files finish.
pub fn compress_dir(dir: &Path, config: &CompressConfig) -> HookResult<CompressReport> {
    let mut report = CompressReport::default();
    if !config.enable {
        debug!("compress"; "disabled");
        return Ok(report);
    }

    let mut pending = Vec::new();
    for (path, size) in scan_files(dir)? {
        match filter::check(&path, size, config) {
            None => pending.push(path),
            Some(Skip::Excluded) => report.excluded += 1,
            Some(Skip::BelowThreshold) => report.below_threshold += 1,
            Some(Skip::Compressed) => {}
        }
    }

    if pending.is_empty() {
        log!("compress"; "nothing to compress in {}", dir.display());
        return Ok(report);
    }

    let progress = ProgressLine::new(&[("compress", pending.len())]);
    let results: Vec<HookResult<CompressedFile>> = pending
        .par_iter()
        .map(|path| {
            let result = compress_file(path, config);
            progress.inc("compress");
            result
        })
        .collect();
    progress.finish();

    for result in results {
        let file = result?;
        if config.verbose {
            log!("compress"; "{} {} -> {}", file.output.display(), format_size(file.original_size), format_size(file.compressed_size));
        }
        report.compressed.push(file);
    }

    log!(
        "compress";
        "{} files, {} -> {}",
        report.compressed.len(),
        format_size(report.original_bytes()),
        format_size(report.compressed_bytes())
    );
    Ok(report)
}

/// Compress one file to its sibling and delete the original if configured.
pub fn compress_file(path: &Path, config: &CompressConfig) -> HookResult<CompressedFile> {
    let output = sibling_path(path, &config.ext);

    let input = File::open(path).map_err(|e| HookError::io(path, e))?;
    let writer = File::create(&output).map_err(|e| HookError::io(&output, e))?;
    let original_size = match codec::encode(
        config.algorithm,
        config.level,
        &mut BufReader::new(input),
        BufWriter::new(writer),
    ) {
        Ok(size) => size,
        Err(e) => {
            // no truncated sibling left behind
            fs::remove_file(&output).ok();
            return Err(HookError::io(&output, e));
        }
    };

    let compressed_size = fs::metadata(&output)
        .map_err(|e| HookError::io(&output, e))?
        .len();

    if config.delete_origin {
        fs::remove_file(path).map_err(|e| HookError::io(path, e))?;
    }

    Ok(CompressedFile {
        source: path.to_path_buf(),
        output,
        original_size,
        compressed_size,
    })
}

/// `dist/index.js` + `.gz` -> `dist/index.js.gz`
fn sibling_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ext);
    PathBuf::from(name)
}

/// All regular files under `dir` with their sizes, sorted by path.
fn scan_files(dir: &Path) -> HookResult<Vec<(PathBuf, u64)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).skip_hidden(false) {
        let entry = entry.map_err(|e| HookError::io(dir, io::Error::other(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let size = fs::metadata(&path)
            .map_err(|e| HookError::io(&path, e))?
            .len();
        files.push((path, size));
    }
    files.sort();
    Ok(files)
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < KIB * KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MiB", bytes as f64 / (KIB * KIB) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    const JS: &str = "export const hello = () => console.log('hello');\n";

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn gunzip(path: &Path) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(File::open(path).unwrap())
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_compresses_eligible_files_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "index.js", JS.as_bytes());
        write(root, "index.html", b"<html></html>");
        write(root, "logo.png", &[0x89, b'P', b'N', b'G']);
        write(root, "internet_identity.wasm", &[0x00, b'a', b's', b'm', 1, 0, 0, 0]);

        let report = compress_dir(root, &CompressConfig::default()).unwrap();

        assert_eq!(report.compressed.len(), 2);
        assert_eq!(report.excluded, 2);
        assert!(root.join("index.js.gz").exists());
        assert!(root.join("internet_identity.wasm.gz").exists());
        assert!(!root.join("index.js").exists());
        assert!(!root.join("internet_identity.wasm").exists());
        assert!(root.join("index.html").exists());
        assert!(root.join("logo.png").exists());
        assert!(!root.join("index.html.gz").exists());
        assert!(!root.join("logo.png.gz").exists());

        assert_eq!(gunzip(&root.join("index.js.gz")), JS.as_bytes());
    }

    #[test]
    fn test_nested_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "assets/chunks/vendor.js", JS.as_bytes());
        write(root, "assets/styles/main.css", b"body{}");

        let report = compress_dir(root, &CompressConfig::default()).unwrap();

        assert_eq!(report.compressed.len(), 1);
        assert!(root.join("assets/chunks/vendor.js.gz").exists());
        assert!(root.join("assets/styles/main.css").exists());
    }

    #[test]
    fn test_keep_origin() {
        let dir = TempDir::new().unwrap();
        let js = write(dir.path(), "index.js", JS.as_bytes());
        let config = CompressConfig {
            delete_origin: false,
            ..CompressConfig::default()
        };

        let file = compress_file(&js, &config).unwrap();

        assert!(js.exists());
        assert_eq!(file.output, dir.path().join("index.js.gz"));
        assert_eq!(file.original_size, JS.len() as u64);
    }

    #[test]
    fn test_rerun_does_not_recompress() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.js", JS.as_bytes());
        let config = CompressConfig::default();

        compress_dir(dir.path(), &config).unwrap();
        let report = compress_dir(dir.path(), &config).unwrap();

        assert!(report.compressed.is_empty());
        assert!(!dir.path().join("index.js.gz.gz").exists());
        assert_eq!(gunzip(&dir.path().join("index.js.gz")), JS.as_bytes());
    }

    #[test]
    fn test_threshold_and_custom_ext() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "small.js", b"1");
        write(dir.path(), "large.js", JS.repeat(40).as_bytes());
        let config = CompressConfig {
            threshold: 1025,
            ext: ".zz".into(),
            algorithm: crate::config::Algorithm::Deflate,
            ..CompressConfig::default()
        };

        let report = compress_dir(dir.path(), &config).unwrap();

        assert_eq!(report.compressed.len(), 1);
        assert_eq!(report.below_threshold, 1);
        assert!(dir.path().join("small.js").exists());
        assert!(dir.path().join("large.js.zz").exists());
        assert!(report.compressed_bytes() < report.original_bytes());
    }

    #[test]
    fn test_disabled() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.js", JS.as_bytes());
        let config = CompressConfig {
            enable: false,
            ..CompressConfig::default()
        };

        let report = compress_dir(dir.path(), &config).unwrap();

        assert!(report.compressed.is_empty());
        assert!(dir.path().join("index.js").exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = compress_file(&dir.path().join("gone.js"), &CompressConfig::default()).unwrap_err();
        assert!(matches!(err, HookError::Io { .. }));
    }

    #[test]
    fn test_failed_encode_removes_partial_output() {
        let dir = TempDir::new().unwrap();
        // opens fine, fails on read
        let source = dir.path().join("bundle.js");
        fs::create_dir(&source).unwrap();

        let err = compress_file(&source, &CompressConfig::default()).unwrap_err();

        assert!(matches!(err, HookError::Io { .. }));
        assert!(!dir.path().join("bundle.js.gz").exists());
        assert!(source.is_dir());
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("dist/index.js"), ".gz"),
            PathBuf::from("dist/index.js.gz")
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}

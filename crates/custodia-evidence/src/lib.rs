use core::fmt;
use std::path::{Path, PathBuf};

const BASE_PREFIX: &str = "Evidence_Acquired_Order_";
const FILES_DIR: &str = "Files";
const CERTIFICATES_DIR: &str = "Certificates";

/// The on-disk folder tree for one acquisition run. Created once per run,
/// named deterministically from the order number; re-running with the same
/// order number reuses the existing tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceBundle {
    pub base: PathBuf,
    pub files_dir: PathBuf,
    pub certificates_dir: PathBuf,
}

#[derive(Debug)]
pub struct BundleError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not create evidence folder {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// A failed copy into the bundle. Files copied before the failure are left
/// in place for operator inspection; the store never cleans up after a
/// partial run.
#[derive(Debug)]
pub struct CopyError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not copy {} into evidence folder: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Maps an order number to its folder-naming key. Order numbers are free
/// text and commonly contain `/` (e.g. "15/2024"); path-hostile characters
/// become `_` so the key always names a single directory.
pub fn folder_key(order_number: &str) -> String {
    order_number
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect()
}

/// Creates the bundle tree under `root` with exists-ok semantics.
pub fn prepare_bundle(root: &Path, order_number: &str) -> Result<EvidenceBundle, BundleError> {
    let base = root.join(format!("{BASE_PREFIX}{}", folder_key(order_number)));
    let files_dir = base.join(FILES_DIR);
    let certificates_dir = base.join(CERTIFICATES_DIR);

    for dir in [&base, &files_dir, &certificates_dir] {
        std::fs::create_dir_all(dir).map_err(|source| BundleError {
            path: dir.clone(),
            source,
        })?;
    }

    Ok(EvidenceBundle {
        base,
        files_dir,
        certificates_dir,
    })
}

/// Copies each source into the bundle's `Files/` folder under its base
/// name, preserving the modification timestamp where the platform allows.
/// Aborts on the first failure naming the failing source. Name collisions
/// among distinct sources are the caller's responsibility.
pub fn copy_into(bundle: &EvidenceBundle, sources: &[PathBuf]) -> Result<Vec<PathBuf>, CopyError> {
    let mut copied = Vec::with_capacity(sources.len());

    for source in sources {
        let dest = copy_one(bundle, source).map_err(|e| CopyError {
            path: source.clone(),
            source: e,
        })?;
        copied.push(dest);
    }

    Ok(copied)
}

fn copy_one(bundle: &EvidenceBundle, source: &Path) -> std::io::Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no file name")
    })?;
    let dest = bundle.files_dir.join(name);
    std::fs::copy(source, &dest)?;
    preserve_mtime(source, &dest);
    Ok(dest)
}

// Best effort only; a filesystem that cannot set timestamps still yields a
// usable copy.
fn preserve_mtime(source: &Path, dest: &Path) {
    let Ok(meta) = std::fs::metadata(source) else {
        return;
    };
    let Ok(mtime) = meta.modified() else {
        return;
    };
    if let Ok(file) = std::fs::OpenOptions::new().write(true).open(dest) {
        let _ = file.set_modified(mtime);
    }
}

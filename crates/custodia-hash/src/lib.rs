use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use custodia_domain::Digest32;

const CHUNK_SIZE: usize = 8192;

/// An I/O failure while hashing. The whole batch aborts on the first
/// failure; no partial digest map is ever returned.
#[derive(Debug)]
pub struct HashError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl core::fmt::Display for HashError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "could not hash {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for HashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Streams every file through SHA-256 in fixed-size chunks, reporting
/// overall progress as an integer percentage after each chunk:
/// `floor(((file_index + bytes_read / file_size) / total_files) * 100)`.
/// Zero-size files emit no intra-file progress; the next file's first
/// chunk accounts for the skipped step.
pub fn hash_files<F>(
    paths: &[PathBuf],
    mut on_progress: F,
) -> Result<BTreeMap<PathBuf, Digest32>, HashError>
where
    F: FnMut(u8),
{
    let total_files = paths.len();
    let mut digests = BTreeMap::new();

    for (index, path) in paths.iter().enumerate() {
        let digest = hash_one(path, |file_size, bytes_read| {
            if file_size == 0 {
                return;
            }
            let done = index as f64 + bytes_read as f64 / file_size as f64;
            let percent = (done / total_files as f64 * 100.0).floor();
            on_progress(percent as u8);
        })
        .map_err(|source| HashError {
            path: path.clone(),
            source,
        })?;
        digests.insert(path.clone(), digest);
    }

    Ok(digests)
}

fn hash_one<F>(path: &Path, mut on_chunk: F) -> std::io::Result<Digest32>
where
    F: FnMut(u64, u64),
{
    let file_size = std::fs::metadata(path)?.len();
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; CHUNK_SIZE];
    let mut bytes_read = 0_u64;

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        bytes_read += n as u64;
        on_chunk(file_size, bytes_read);
    }

    Ok(Digest32::from_bytes(hasher.finalize().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new(label: &str) -> Self {
            let mut path = std::env::temp_dir();
            path.push(format!("custodia_hash_test_{}_{}", std::process::id(), label));
            let _ = std::fs::remove_dir_all(&path);
            std::fs::create_dir_all(&path).expect("create temp dir");
            Self { path }
        }

        fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
            let p = self.path.join(name);
            std::fs::write(&p, contents).expect("write test file");
            p
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC_SHA256: &str =
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn known_content_digests() {
        let dir = TestDir::new("known");
        let empty = dir.file("empty.bin", b"");
        let abc = dir.file("abc.txt", b"abc");

        let digests = hash_files(&[empty.clone(), abc.clone()], |_| {}).expect("hash");
        assert_eq!(digests[&empty].to_hex(), EMPTY_SHA256);
        assert_eq!(digests[&abc].to_hex(), ABC_SHA256);
    }

    #[test]
    fn progress_is_overall_floor_percent() {
        let dir = TestDir::new("progress");
        let zero = dir.file("zero.bin", b"");
        let one_chunk = dir.file("one.bin", &vec![1_u8; 8192]);
        let odd = dir.file("odd.bin", &vec![2_u8; 20000]);

        let mut events = Vec::new();
        hash_files(&[zero, one_chunk, odd], |p| events.push(p)).expect("hash");

        // The zero-size file emits nothing; the next file's single chunk
        // jumps straight past the skipped step.
        assert_eq!(events, vec![66, 80, 93, 100]);
    }

    #[test]
    fn final_progress_is_complete() {
        let dir = TestDir::new("final");
        let a = dir.file("a.bin", &vec![7_u8; 100]);
        let b = dir.file("b.bin", &vec![8_u8; 100]);

        let mut last = 0;
        hash_files(&[a, b], |p| last = p).expect("hash");
        assert_eq!(last, 100);
    }

    #[test]
    fn unreadable_path_fails_naming_the_path() {
        let dir = TestDir::new("unreadable");
        let good = dir.file("good.bin", b"data");
        let missing = dir.path.join("missing.bin");

        for paths in [
            vec![missing.clone(), good.clone()],
            vec![good.clone(), missing.clone()],
        ] {
            let err = hash_files(&paths, |_| {}).expect_err("must fail");
            assert_eq!(err.path, missing);
        }
    }

    #[test]
    fn large_file_streams_in_chunks() {
        let dir = TestDir::new("large");
        let big = dir.file("big.bin", &vec![0xA5_u8; 3 * 8192 + 17]);

        let mut events = Vec::new();
        let digests = hash_files(&[big.clone()], |p| events.push(p)).expect("hash");
        assert_eq!(events.len(), 4);
        assert_eq!(*events.last().unwrap(), 100);
        assert_eq!(digests.len(), 1);
        assert_eq!(digests[&big].to_hex().len(), 64);
    }
}

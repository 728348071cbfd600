use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::report::model::{ArtifactHash, ArtifactInfo};

/// Whether a regular file exists at `path`. Directories do not count.
pub fn target_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Fingerprint the binary under analysis.
///
/// The hash covers the file bytes only, so a summary can be tied to the
/// exact build that was analysed.
pub fn fingerprint(path: &Path) -> io::Result<ArtifactInfo> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let size_bytes = io::copy(&mut file, &mut hasher)?;

    Ok(ArtifactInfo {
        path: path.display().to_string(),
        size_bytes,
        hash: ArtifactHash {
            algorithm: "sha256".to_string(),
            value: hex::encode(hasher.finalize()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn temp_target(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn regular_file_exists() {
        let file = temp_target(b"\x7fELF");
        assert!(target_exists(file.path()));
    }

    #[test]
    fn directory_is_not_a_target() {
        let dir = TempDir::new().unwrap();
        assert!(!target_exists(dir.path()));
    }

    #[test]
    fn absent_path_is_not_a_target() {
        assert!(!target_exists(Path::new("./missing_binary")));
    }

    #[test]
    fn fingerprint_is_stable_sha256() {
        let file = temp_target(b"memgate-test");
        let info = fingerprint(file.path()).unwrap();

        assert_eq!(info.size_bytes, 12);
        assert_eq!(info.hash.algorithm, "sha256");
        // echo -n "memgate-test" | sha256sum
        assert_eq!(
            info.hash.value,
            "bf4b4775c4c41f9d370e00a1301de6672fbf7e772793be50e4df2b25709705c5"
        );
    }

    #[test]
    fn fingerprint_of_missing_file_errors() {
        assert!(fingerprint(Path::new("non_existent_binary")).is_err());
    }
}

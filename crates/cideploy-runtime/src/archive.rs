//! Deployment package extraction.
//!
//! Packages are `.zip`, `.tar`, or gzip-compressed `.tar.gz` / `.tgz`
//! archives. Each is unpacked into a fresh temporary directory that is
//! removed when the returned handle is dropped.

use std::fs::File;
use std::path::Path;

use cideploy_common::error::{DeployError, Result};
use tempfile::TempDir;

/// Archive formats accepted as deployment packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    /// Zip archive.
    Zip,
    /// Plain tar archive.
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
}

impl PackageFormat {
    /// Detects the format from the file name.
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }
}

/// Unpacks `archive_path` into a new temporary directory.
///
/// # Errors
///
/// Returns an error if the format is unsupported, the archive cannot be
/// opened, or extraction fails.
pub fn extract_package(archive_path: &Path) -> Result<TempDir> {
    let target = tempfile::Builder::new()
        .prefix("cideploy-package-")
        .tempdir()
        .map_err(|e| DeployError::io(std::env::temp_dir(), e))?;
    unpack_into(archive_path, target.path())?;
    Ok(target)
}

/// Unpacks `archive_path` into an existing directory.
///
/// # Errors
///
/// Returns an error if the format is unsupported, the archive cannot be
/// opened, or extraction fails.
pub fn unpack_into(archive_path: &Path, target: &Path) -> Result<()> {
    tracing::info!(
        archive = %archive_path.display(),
        target = %target.display(),
        "extracting package"
    );

    let format = PackageFormat::detect(archive_path).ok_or_else(|| DeployError::Archive {
        path: archive_path.to_path_buf(),
        message: "unsupported package format (expected .zip, .tar, .tar.gz or .tgz)".into(),
    })?;

    std::fs::create_dir_all(target).map_err(|e| DeployError::io(target, e))?;
    let file = File::open(archive_path).map_err(|e| DeployError::io(archive_path, e))?;

    match format {
        PackageFormat::Zip => {
            let mut archive = zip::ZipArchive::new(file).map_err(|e| archive_error(archive_path, &e))?;
            archive
                .extract(target)
                .map_err(|e| archive_error(archive_path, &e))?;
        }
        PackageFormat::TarGz => {
            let decoder = flate2::read::GzDecoder::new(file);
            tar::Archive::new(decoder)
                .unpack(target)
                .map_err(|e| archive_error(archive_path, &e))?;
        }
        PackageFormat::Tar => {
            tar::Archive::new(file)
                .unpack(target)
                .map_err(|e| archive_error(archive_path, &e))?;
        }
    }

    tracing::info!(target = %target.display(), ?format, "package extracted");
    Ok(())
}

fn archive_error(path: &Path, err: &dyn std::fmt::Display) -> DeployError {
    DeployError::Archive {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

//! Low-level file operations.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Copy a file, creating the destination's parent directories.
    CopyFile { from: PathBuf, to: PathBuf },
    /// Copy a file, then delete the original.
    MoveFile { from: PathBuf, to: PathBuf },
    DeleteFile { path: PathBuf },
    /// Replace the full content of a file, creating it if needed.
    WriteFile { path: PathBuf, content: Vec<u8> },
}

impl Operation {
    /// The file this operation changes.
    pub fn path(&self) -> &Path {
        match self {
            Operation::CopyFile { to, .. } | Operation::MoveFile { to, .. } => to,
            Operation::DeleteFile { path } | Operation::WriteFile { path, .. } => path,
        }
    }

    pub fn execute(&self) -> Result<()> {
        match self {
            Operation::CopyFile { from, to } => {
                copy_file(from, to)?;
                tracing::debug!("Copied {} to {}", from.display(), to.display());
            }
            Operation::MoveFile { from, to } => {
                copy_file(from, to)?;
                fs::remove_file(from)
                    .with_context(|| format!("Failed to delete file: {:?}", from))?;
                tracing::debug!("Moved {} to {}", from.display(), to.display());
            }
            Operation::DeleteFile { path } => {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to delete file: {:?}", path))?;
                tracing::debug!("Deleted {}", path.display());
            }
            Operation::WriteFile { path, content } => {
                create_parent(path)?;
                fs::write(path, content)
                    .with_context(|| format!("Failed to write file: {:?}", path))?;
                tracing::debug!("Wrote {}", path.display());
            }
        }
        Ok(())
    }

    /// Log what `execute` would do.
    pub fn preview(&self) {
        match self {
            Operation::CopyFile { from, to } => {
                tracing::info!("[dry-run] copy {} to {}", from.display(), to.display());
            }
            Operation::MoveFile { from, to } => {
                tracing::info!("[dry-run] move {} to {}", from.display(), to.display());
            }
            Operation::DeleteFile { path } => {
                tracing::info!("[dry-run] delete {}", path.display());
            }
            Operation::WriteFile { path, .. } => {
                tracing::info!("[dry-run] rewrite {}", path.display());
            }
        }
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    create_parent(to)?;
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_copy_creates_parents() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.png");
        let to = dir.path().join("x/y/a.png");
        fs::write(&from, b"img").unwrap();

        Operation::CopyFile {
            from: from.clone(),
            to: to.clone(),
        }
        .execute()
        .unwrap();

        assert!(from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"img");
    }

    #[test]
    fn test_move_removes_original() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.png");
        let to = dir.path().join("moved/a.png");
        fs::write(&from, b"img").unwrap();

        Operation::MoveFile {
            from: from.clone(),
            to: to.clone(),
        }
        .execute()
        .unwrap();

        assert!(!from.exists());
        assert!(to.exists());
    }

    #[test]
    fn test_delete_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let op = Operation::DeleteFile {
            path: dir.path().join("gone.png"),
        };
        assert!(op.execute().is_err());
    }

    #[test]
    fn test_preview_changes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let op = Operation::WriteFile {
            path: path.clone(),
            content: b"x".to_vec(),
        };
        op.preview();
        assert!(!path.exists());
        assert_eq!(op.path(), path.as_path());
    }
}

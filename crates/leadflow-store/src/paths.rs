use crate::error::{Result, StoreError};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "leadflow";
const DB_FILENAME: &str = "leadflow.sqlite3";

/// Where the database goes when no `--db-path` is given.
pub fn data_dir() -> Result<PathBuf> {
    locate_data_dir(env::var_os("XDG_DATA_HOME"), dirs::home_dir())
}

/// `$XDG_DATA_HOME/leadflow`, else `~/.local/share/leadflow`. A set but
/// empty `XDG_DATA_HOME` is an error rather than a silent fallback.
fn locate_data_dir(xdg_data_home: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    match xdg_data_home.map(PathBuf::from) {
        Some(base) if base.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(base)),
        Some(base) => Ok(base.join(APP_DIR)),
        None => home
            .map(|home| home.join(".local").join("share").join(APP_DIR))
            .ok_or(StoreError::MissingHomeDir),
    }
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILENAME)
}

/// An explicit path wins and only its parent is created, permissions
/// untouched. The default location is created private to the user.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    let Some(path) = custom else {
        let dir = data_dir()?;
        fs::create_dir_all(&dir)?;
        make_private(&dir)?;
        return Ok(db_path_in(&dir));
    };
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidDataPath(path));
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(path)
}

#[cfg(unix)]
fn make_private(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_private(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{locate_data_dir, resolve_db_path};
    use crate::error::StoreError;
    use std::ffi::OsString;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn xdg_data_home_takes_precedence() {
        let dir = locate_data_dir(
            Some(OsString::from("/srv/data")),
            Some(PathBuf::from("/home/ada")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/srv/data/leadflow"));
    }

    #[test]
    fn falls_back_to_home_share() {
        let dir = locate_data_dir(None, Some(PathBuf::from("/home/ada"))).unwrap();
        assert_eq!(dir, PathBuf::from("/home/ada/.local/share/leadflow"));
    }

    #[test]
    fn empty_xdg_or_no_home_is_an_error() {
        assert!(matches!(
            locate_data_dir(Some(OsString::new()), Some(PathBuf::from("/home/ada"))),
            Err(StoreError::InvalidDataPath(_))
        ));
        assert!(matches!(
            locate_data_dir(None, None),
            Err(StoreError::MissingHomeDir)
        ));
    }

    #[test]
    fn explicit_path_creates_its_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("leads.sqlite3");
        assert_eq!(resolve_db_path(Some(path.clone())).unwrap(), path);
        assert!(temp.path().join("nested").is_dir());
        assert!(matches!(
            resolve_db_path(Some(PathBuf::new())),
            Err(StoreError::InvalidDataPath(_))
        ));
    }
}

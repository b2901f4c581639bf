//! Discovery of the removable medium that carries the wrapped key.

use std::path::{Path, PathBuf};

use sysinfo::Disks;
use tracing::debug;

/// Outcome of scanning for removable media.
///
/// More than one attached medium is ambiguous. Picking one by enumeration
/// order risks reading or writing the wrong device, so `Many` is a
/// first-class outcome that callers must refuse, not a list to choose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovableMedium {
    /// No removable medium is attached.
    None,
    /// Exactly one removable medium, mounted at the contained path.
    One(PathBuf),
    /// More than one removable medium is attached.
    Many,
}

/// Scan the currently mounted volumes for removable media.
///
/// The scan is recomputed on every call and never cached; it is a pure
/// query with no side effects, safe for a front-end to poll. Each operation
/// that touches the medium performs this scan immediately before use.
pub fn locate() -> RemovableMedium {
    let disks = Disks::new_with_refreshed_list();
    let mounts = disks
        .list()
        .iter()
        .filter(|disk| disk.is_removable())
        .map(|disk| disk.mount_point().to_path_buf());

    let located = classify(mounts);
    debug!(?located, "removable medium scan");
    located
}

/// Classify an enumeration of removable mount points into the three-way
/// discovery result.
///
/// Split out from [`locate`] so the classification is testable without
/// hardware attached.
pub fn classify(mounts: impl IntoIterator<Item = PathBuf>) -> RemovableMedium {
    let mut mounts = mounts.into_iter();
    match (mounts.next(), mounts.next()) {
        (None, _) => RemovableMedium::None,
        (Some(mount), None) => RemovableMedium::One(mount),
        (Some(_), Some(_)) => RemovableMedium::Many,
    }
}

/// Resolve the wrapped-key file on a located medium.
///
/// Joins the medium root with the configured file name and returns the full
/// path only if the file already exists there. Never creates the file.
pub fn resolve_key_path(medium_root: &Path, key_file_name: &str) -> Option<PathBuf> {
    let path = medium_root.join(key_file_name);
    path.is_file().then_some(path)
}

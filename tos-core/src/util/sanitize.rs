use crate::error::{Result, TosError};
use std::path::{Component, Path, PathBuf};

/// Join an archive-internal path onto `root`, refusing anything that would
/// land outside it.
pub fn safe_join(root: &Path, rel: &str) -> Result<PathBuf> {
    let normalized = rel.replace('\\', "/");
    let p = Path::new(&normalized);
    let mut out = root.to_path_buf();
    for c in p.components() {
        match c {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(TosError::UnsafePath(rel.to_string()));
            }
        }
    }
    if out == root {
        return Err(TosError::UnsafePath(rel.to_string()));
    }
    Ok(out)
}

//! Virtual path resolution inside the jail.
//!
//! Every user-supplied path is reduced to a [`VirtualPath`]: a normalized,
//! rooted path string that is independent of the backend's real location.
//! Normalization is total — it never fails, it clamps `..` at the virtual
//! root instead of erroring — so a `VirtualPath` always starts with `/` and
//! never contains empty, `.`, or unresolved `..` components. Mapping to a
//! real backend path is then plain concatenation, which cannot escape the
//! jail by construction.

use std::fmt;
use std::path::{Path, PathBuf};

/// A normalized path inside the jail.
///
/// Invariants: starts with `/`; no empty, `.`, or `..` components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualPath(String);

impl VirtualPath {
    /// The virtual root, `/`.
    pub fn root() -> Self {
        VirtualPath("/".to_string())
    }

    /// Normalize a raw path string into a `VirtualPath`.
    ///
    /// Splits on `/`, drops empty and `.` components, and resolves `..`
    /// against what has been accumulated so far. A `..` with nothing left to
    /// pop is dropped — clamped at the root — rather than rejected. Empty
    /// input normalizes to `/`. Idempotent.
    pub fn normalize(raw: &str) -> Self {
        let mut components: Vec<&str> = Vec::new();
        for component in raw.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other),
            }
        }

        if components.is_empty() {
            return Self::root();
        }

        let mut out = String::new();
        for component in components {
            out.push('/');
            out.push_str(component);
        }
        VirtualPath(out)
    }

    /// Resolve a raw path against a current directory.
    ///
    /// Empty input returns `cwd` unchanged. Absolute input is normalized on
    /// its own (absolute means relative to the jail root, never the real
    /// filesystem root). Relative input is appended to `cwd` and normalized.
    pub fn resolve(raw: &str, cwd: &VirtualPath) -> Self {
        if raw.is_empty() {
            return cwd.clone();
        }
        if raw.starts_with('/') {
            return Self::normalize(raw);
        }

        let mut joined = cwd.0.clone();
        if joined != "/" {
            joined.push('/');
        }
        joined.push_str(raw);
        Self::normalize(&joined)
    }

    /// Map this virtual path to a real path under `root`.
    ///
    /// Concatenation with the leading `/` stripped; lexically a child of
    /// `root` because normalization never leaves a leading `..`.
    pub fn to_real(&self, root: &Path) -> PathBuf {
        root.join(&self.0[1..])
    }

    /// Defensive invariant check: the normalized form is rooted.
    ///
    /// Normalization is total, so this holds for every constructed value; it
    /// exists so callers can assert the invariant at trust boundaries.
    pub fn is_safe(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Path string, always rooted.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final component, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        if self.0 == "/" {
            None
        } else {
            self.0.rsplit('/').next()
        }
    }

    /// Parent path, or `None` for the root.
    pub fn parent(&self) -> Option<VirtualPath> {
        if self.0 == "/" {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(VirtualPath(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Number of components below the root.
    pub fn depth(&self) -> usize {
        if self.0 == "/" {
            0
        } else {
            self.0.matches('/').count()
        }
    }

    /// Append a single entry name. Used when synthesizing listings.
    pub fn child(&self, name: &str) -> Self {
        let mut joined = self.0.clone();
        if joined != "/" {
            joined.push('/');
        }
        joined.push_str(name);
        Self::normalize(&joined)
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for VirtualPath {
    fn default() -> Self {
        Self::root()
    }
}

/// Detect whether a raw, pre-normalization path tries to climb above the
/// virtual root.
///
/// Normalization clamps silently, so an escape attempt is invisible after the
/// fact; this walks the raw input instead, counting `..` pops against the
/// accumulated depth (starting from `cwd` depth for relative paths). Used to
/// warn the user before the clamp is applied.
pub fn escapes_root(raw: &str, cwd: &VirtualPath) -> bool {
    let mut depth = if raw.starts_with('/') { 0 } else { cwd.depth() };

    for component in raw.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if depth == 0 {
                    return true;
                }
                depth -= 1;
            }
            _ => depth += 1,
        }
    }
    false
}

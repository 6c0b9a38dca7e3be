//! Template source loading.
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::config::Config;

/// Load template source by path.
///
/// Source is read fully, nothing is kept open after returning.
pub trait Loader {
    fn load(&self, path: &str) -> io::Result<String>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> io::Result<String>,
{
    fn load(&self, path: &str) -> io::Result<String> {
        self(path)
    }
}

// ===== MemoryLoader =====

/// In memory [`Loader`].
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    templates: HashMap<Box<str>, Box<str>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<Box<str>>, source: impl Into<Box<str>>) {
        self.templates.insert(path.into(), source.into());
    }

    pub fn with(mut self, path: impl Into<Box<str>>, source: impl Into<Box<str>>) -> Self {
        self.insert(path, source);
        self
    }
}

impl Loader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        match self.templates.get(path) {
            Some(source) => Ok(source.to_string()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no template `{path}`"))),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MemoryLoader {
    fn from(value: [(&str, &str); N]) -> Self {
        Self { templates: value.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

// ===== FsLoader =====

/// Filesystem [`Loader`].
///
/// Path resolution:
///
/// - `layout.html`, resolve from templates directory
/// - `/layout.html`, resolve from base directory
/// - `./layout.html`, rejected, there is no current file to be relative to
///
/// Every file read is recorded, see [`FsLoader::reads`].
#[derive(Debug)]
pub struct FsLoader {
    base: PathBuf,
    templ_dir: Box<str>,
    reads: Mutex<Vec<PathBuf>>,
}

impl FsLoader {
    /// Create new [`FsLoader`] with default templates directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::with_config(base, &Config::default())
    }

    pub fn with_config(base: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            base: base.into(),
            templ_dir: config.templ_dir().into(),
            reads: Mutex::new(vec![]),
        }
    }

    /// Resolve template path into filesystem path.
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut dir = self.base.clone();
        let path = match () {
            _ if path.starts_with('.') => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("cannot load `{path}` using relative path"),
                ));
            }
            _ if path.starts_with('/') => path.trim_start_matches('/'),
            _ => {
                dir.push(&*self.templ_dir);
                path
            }
        };
        dir.push(path);
        Ok(normalize(&dir))
    }

    /// All files read so far, in order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Loader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        let path = self.resolve(path)?;
        let source = std::fs::read_to_string(&path)?;
        self.reads.lock().unwrap_or_else(PoisonError::into_inner).push(path);
        Ok(source)
    }
}

/// Copied from [cargo][1]
///
/// [1]: https://github.com/rust-lang/cargo/blob/fede83ccf973457de319ba6fa0e36ead454d2e20/src/cargo/util/paths.rs#L61
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;
    let mut components = path.components().peekable();
    let mut ret = if let Some(c @ Component::Prefix(..)) = components.peek().cloned() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(..) => {}
            Component::RootDir => {
                ret.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                ret.pop();
            }
            Component::Normal(c) => {
                ret.push(c);
            }
        }
    }
    ret
}

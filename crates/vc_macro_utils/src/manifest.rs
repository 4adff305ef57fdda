use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how a workspace crate is reachable
/// from the crate a macro expands in.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_props"));
/// ```
///
/// Reading the manifest is not free, call [`Manifest::shared`] once per
/// macro invocation and reuse the returned path.
///
/// # Resolution rules
///
/// 1. A dependency whose key is `name` resolves to `::name`.
/// 2. A renamed dependency (`alias = { package = "name", .. }`) resolves to `::alias`.
/// 3. For `vc_` crates, a dependency on the facade crate `vc_access` resolves to
///    `::vc_access::short_name` (e.g. `vc_props` -> `::vc_access::props`).
/// 4. Steps 1-3 are repeated for `dev-dependencies`.
/// 5. Otherwise the absolute path `::name` is used.
///
/// A crate that expands its own macros should declare `extern crate self as name;`
/// so rule 5 also works from inside it.
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "vc_access";
const WORKSPACE_PREFIX: &str = "vc_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    fn read(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    /// Parses a manifest from text, mostly useful for tests.
    pub fn from_text(text: &str) -> Self {
        Self {
            manifest: Document::parse(Box::<str>::from(text)).ok(),
            modified_time: None,
        }
    }

    fn parse_path(text: &str) -> Option<syn::Path> {
        syn::parse_str(text).ok()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Self::parse_path(&format!("::{name}"));
        }

        let renamed = deps.iter().find_map(|(key, item)| {
            let package = item.get("package").and_then(Item::as_str)?;
            (package == name).then_some(key)
        });
        if let Some(alias) = renamed {
            return Self::parse_path(&format!("::{alias}"));
        }

        let module = name.strip_prefix(WORKSPACE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Self::parse_path(&format!("::{FACADE_NAME}::{module}"));
        }
        None
    }

    /// Returns the path under which the crate `name` is reachable.
    ///
    /// See the type-level documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let manifest = self.manifest.as_ref();
        let found = ["dependencies", "dev-dependencies"].iter().find_map(|section| {
            match manifest?.get(section)? {
                Item::Table(deps) => Self::find_in_deps(deps, name),
                _ => None,
            }
        });

        found.unwrap_or_else(|| {
            let mut path = syn::Path::from(syn::Ident::new(name, Span::call_site()));
            path.leading_colon = Some(Default::default());
            path
        })
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Parsed manifests are cached per path and re-read when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Self::from_text(""));
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

// -----------------------------------------------------------------------------
// Tests

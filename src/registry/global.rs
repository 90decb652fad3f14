//! Process-wide catalog.
//!
//! The catalog is built once, sealed, and shared read-only afterwards.

use once_cell::sync::OnceCell;

use crate::games;

use super::manager::GameManager;
use super::plugin::{load_plugins, PluginDescriptor};

static CATALOG: OnceCell<GameManager> = OnceCell::new();

/// Build the catalog from the built-in families plus `plugins`.
///
/// Only the first call does any work; later calls (and `catalog`) return
/// the same sealed registry.
pub fn init(plugins: &[PluginDescriptor]) -> &'static GameManager {
    CATALOG.get_or_init(|| {
        let mut manager = games::builtin_manager();
        load_plugins(&mut manager, plugins);
        manager.seal();
        manager
    })
}

/// The shared catalog, built without plugins if `init` was never called.
pub fn catalog() -> &'static GameManager {
    init(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_sealed_and_shared() {
        let a = catalog();
        let b = init(&[]);
        assert!(std::ptr::eq(a, b));
        assert!(a.is_sealed());
        assert!(a.get(56).is_some());
    }
}

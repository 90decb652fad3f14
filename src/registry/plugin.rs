//! Plugin registration.
//!
//! A plugin is a named function that registers extra games. Plugins run
//! after the built-in families and before the catalog is sealed; their
//! games are tagged with the plugin name. A failing plugin is skipped: the
//! games it registered before the failure stay, the rest of the plugins
//! still load.

use tracing::{info, warn};

use crate::core::GameInfoError;

use super::manager::GameManager;

/// Entry point of one plugin.
#[derive(Clone, Copy, Debug)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub register: fn(&mut GameManager) -> Result<(), GameInfoError>,
}

impl PluginDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        register: fn(&mut GameManager) -> Result<(), GameInfoError>,
    ) -> Self {
        Self { name, register }
    }
}

/// Run every plugin against `manager`.
///
/// Returns the failures, one per plugin that stopped early.
pub fn load_plugins(
    manager: &mut GameManager,
    plugins: &[PluginDescriptor],
) -> Vec<(&'static str, GameInfoError)> {
    let mut failures = Vec::new();
    for plugin in plugins {
        info!(plugin = plugin.name, "loading plugin");
        let before = manager.len();
        manager.set_loading_plugin(Some(plugin.name.to_string()));
        let result = (plugin.register)(manager);
        manager.set_loading_plugin(None);
        let added = manager.len() - before;
        match result {
            Ok(()) => info!(plugin = plugin.name, added, "plugin loaded"),
            Err(err) => {
                warn!(plugin = plugin.name, added, error = %err, "plugin failed");
                failures.push((plugin.name, err));
            }
        }
    }
    failures
}

//! The game catalog.
//!
//! `GameManager` owns every registered `GameInfo`, indexed by id and by
//! name. Hidden games can be looked up but are left out of the visible
//! set, the sorted views and the per-type counts.
//!
//! ## Lifecycle
//!
//! Registration happens at startup (built-in families, then plugins). After
//! `seal` the catalog is read-only; the sorted views are computed lazily on
//! first use and cached until the next registration.

use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::OnceCell;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use crate::core::GameInfoError;

use super::info::{GameFlags, GameInfo, GameType, Provenance};
use super::tables::{
    IdGroup, TypeFilter, CHILDREN_GAMES, GAMES_BY_COMPATIBILITY, GAMES_BY_VERSION, POPULAR_GAMES,
};

/// Id-sorted projections of the visible games.
#[derive(Debug, Default)]
struct SortedViews {
    by_id: Vec<u32>,
    by_name: Vec<u32>,
    by_short_name: Vec<u32>,
    /// `(id, altname)` ordered by lowercased alternate name.
    altnames: Vec<(u32, String)>,
}

/// Registry of game descriptors.
#[derive(Debug, Default)]
pub struct GameManager {
    all: FxHashMap<u32, GameInfo>,
    /// Names and alternate names of every game, hidden ones included.
    all_names: FxHashMap<String, u32>,
    visible: FxHashSet<u32>,
    classes: FxHashSet<&'static str>,
    registered_types: FxHashMap<GameType, usize>,
    views: OnceCell<SortedViews>,
    /// 0 when nothing is selected.
    selected: AtomicU32,
    loading_plugin: Option<String>,
    sealed: bool,
}

impl GameManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor.
    ///
    /// Checks run in a fixed order (sealed, descriptor validity, id, name,
    /// class, alternate names) and the first failure is returned; a
    /// rejected descriptor leaves the catalog untouched.
    pub fn register(&mut self, mut gi: GameInfo) -> Result<(), GameInfoError> {
        if let Err(err) = self.check(&gi) {
            warn!(game = gi.id, name = %gi.name, error = %err, "registration rejected");
            return Err(err);
        }

        let mut flags = gi.flags;
        if CHILDREN_GAMES.contains(&gi.id) {
            flags = flags | GameFlags::CHILDREN;
        }
        if POPULAR_GAMES.contains(&gi.id) {
            flags = flags | GameFlags::POPULAR;
        }
        gi.flags = flags;
        gi.si.flags = gi.si.flags | flags;
        if let Some(plugin) = &self.loading_plugin {
            gi.provenance = Provenance::Plugin(plugin.clone());
        }

        self.all_names.insert(gi.name.clone(), gi.id);
        for alt in &gi.altnames {
            self.all_names.insert(alt.clone(), gi.id);
        }
        self.classes.insert(gi.class);
        if !gi.is_hidden() {
            self.visible.insert(gi.id);
            *self.registered_types.entry(gi.si.game_type).or_insert(0) += 1;
            self.views = OnceCell::new();
        }
        debug!(game = gi.id, name = %gi.name, provenance = ?gi.provenance, "game registered");
        self.all.insert(gi.id, gi);
        Ok(())
    }

    fn check(&self, gi: &GameInfo) -> Result<(), GameInfoError> {
        if self.sealed {
            return Err(GameInfoError::RegistrySealed { id: gi.id });
        }
        gi.validate()?;
        if self.all.contains_key(&gi.id) {
            return Err(GameInfoError::DuplicateId { id: gi.id });
        }
        if self.all_names.contains_key(&gi.name) {
            return Err(GameInfoError::DuplicateName {
                name: gi.name.clone(),
            });
        }
        if self.classes.contains(gi.class) {
            return Err(GameInfoError::DuplicateClass {
                class: gi.class.to_string(),
            });
        }
        // Also catches a game listing its own name as an alternate.
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(&gi.name);
        for alt in &gi.altnames {
            if self.all_names.contains_key(alt) || !seen.insert(alt) {
                return Err(GameInfoError::DuplicateAltName { name: alt.clone() });
            }
        }
        Ok(())
    }

    /// Tag the registrations that follow with a plugin name.
    pub fn set_loading_plugin(&mut self, plugin: Option<String>) {
        self.loading_plugin = plugin;
    }

    /// Refuse any further registration.
    pub fn seal(&mut self) {
        if self.sealed {
            return;
        }
        self.sealed = true;
        let plugins = self
            .all
            .values()
            .filter(|gi| matches!(gi.provenance, Provenance::Plugin(_)))
            .count();
        info!(
            total = self.all.len(),
            visible = self.visible.len(),
            plugins,
            "game catalog sealed"
        );
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    // === Lookup ===

    /// Any registered game, hidden ones included.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&GameInfo> {
        self.all.get(&id)
    }

    /// Look up by exact name or alternate name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&GameInfo> {
        self.all_names.get(name).and_then(|id| self.all.get(id))
    }

    /// Every registered game, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &GameInfo> {
        self.all.values()
    }

    /// Games shown in menus, in no particular order.
    pub fn visible(&self) -> impl Iterator<Item = &GameInfo> {
        self.visible.iter().filter_map(|id| self.all.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    // === Sorted Views ===

    fn views(&self) -> &SortedViews {
        self.views.get_or_init(|| {
            let mut by_name = Vec::with_capacity(self.visible.len());
            let mut by_short_name = Vec::with_capacity(self.visible.len());
            let mut altnames = Vec::new();
            for gi in self.visible() {
                by_name.push((gi.name.to_lowercase(), gi.id));
                by_short_name.push((gi.short_name.to_lowercase(), gi.id));
                for alt in &gi.altnames {
                    altnames.push((alt.to_lowercase(), gi.id, alt.clone()));
                }
            }
            by_name.sort();
            by_short_name.sort();
            altnames.sort();

            let mut by_id: Vec<u32> = self.visible.iter().copied().collect();
            by_id.sort_unstable();
            SortedViews {
                by_id,
                by_name: by_name.into_iter().map(|(_, id)| id).collect(),
                by_short_name: by_short_name.into_iter().map(|(_, id)| id).collect(),
                altnames: altnames.into_iter().map(|(_, id, alt)| (id, alt)).collect(),
            }
        })
    }

    /// Visible game ids in ascending order.
    #[must_use]
    pub fn ids_by_id(&self) -> &[u32] {
        &self.views().by_id
    }

    /// Visible game ids ordered by lowercased name.
    #[must_use]
    pub fn ids_by_name(&self) -> &[u32] {
        &self.views().by_name
    }

    /// Visible game ids ordered by lowercased short name.
    #[must_use]
    pub fn ids_by_short_name(&self) -> &[u32] {
        &self.views().by_short_name
    }

    /// `(id, alternate name)` pairs ordered by lowercased alternate name.
    #[must_use]
    pub fn altnames_sorted(&self) -> &[(u32, String)] {
        &self.views().altnames
    }

    // === Groups and Filters ===

    /// Registered ids in a named compatibility group, ascending.
    #[must_use]
    pub fn by_compatibility(&self, group: &str) -> Vec<u32> {
        self.ids_in(GAMES_BY_COMPATIBILITY, group)
    }

    /// Registered ids first released in `version`, ascending.
    #[must_use]
    pub fn by_version(&self, version: &str) -> Vec<u32> {
        self.ids_in(GAMES_BY_VERSION, version)
    }

    fn ids_in(&self, table: &[(&str, IdGroup)], key: &str) -> Vec<u32> {
        let Some((_, group)) = table.iter().find(|(name, _)| *name == key) else {
            return Vec::new();
        };
        let mut ids: Vec<u32> = group.iter().filter(|id| self.all.contains_key(id)).collect();
        ids.sort_unstable();
        ids
    }

    /// Visible ids matching a type filter, ascending.
    #[must_use]
    pub fn filter(&self, filter: &TypeFilter) -> Vec<u32> {
        self.ids_by_id()
            .iter()
            .copied()
            .filter(|id| self.all.get(id).is_some_and(|gi| filter.selector.matches(&gi.si)))
            .collect()
    }

    /// Number of visible games of a type.
    #[must_use]
    pub fn registered_type_count(&self, game_type: GameType) -> usize {
        self.registered_types.get(&game_type).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_children(&self, id: u32) -> bool {
        self.has_flag(id, GameFlags::CHILDREN)
    }

    #[must_use]
    pub fn is_popular(&self, id: u32) -> bool {
        self.has_flag(id, GameFlags::POPULAR)
    }

    fn has_flag(&self, id: u32, flag: GameFlags) -> bool {
        self.all.get(&id).is_some_and(|gi| gi.flags.contains(flag))
    }

    // === Selection ===

    /// Id of the selected game, if any.
    #[must_use]
    pub fn selected(&self) -> Option<u32> {
        match self.selected.load(Ordering::Relaxed) {
            0 => None,
            id => Some(id),
        }
    }

    /// Select a registered game. Works on a sealed catalog.
    pub fn set_selected(&self, id: u32) -> Result<(), GameInfoError> {
        if !self.all.contains_key(&id) {
            return Err(GameInfoError::UnknownGame { id });
        }
        self.selected.store(id, Ordering::Relaxed);
        Ok(())
    }
}

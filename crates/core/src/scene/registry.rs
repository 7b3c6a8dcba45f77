use super::Route;
use crate::value::Options;
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};

/// Everything the navigation bar should show for one route, including the
/// injected `driver` and the `hidden`/`child` flags.
pub type ConfigPayload = Options;

/// Write-only view of the route → payload registry owned by the scene
/// manager.
///
/// Both operations are idempotent. Clearing a route that has no entry is
/// not an error.
pub trait ConfigRegistry {
    fn set_next_config(&self, route: &Route, payload: ConfigPayload);

    fn clear_config(&self, route: &Route);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryOp {
    Set(Route, ConfigPayload),
    Clear(Route),
}

impl RegistryOp {
    pub fn route(&self) -> &Route {
        match self {
            RegistryOp::Set(route, _) | RegistryOp::Clear(route) => route,
        }
    }
}

/// In-memory registry holding the last payload written for each route.
///
/// Per-route write counts and the total number of operations are always
/// tracked. A full journal of every write is only kept when the registry is
/// built with [`SceneRegistry::with_journal`], since it holds a copy of each
/// payload for as long as the registry lives.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    entries: RefCell<IndexMap<Route, ConfigPayload>>,
    writes: RefCell<IndexMap<Route, usize>>,
    operations: Cell<usize>,
    journal: Option<RefCell<Vec<RegistryOp>>>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        SceneRegistry::default()
    }

    /// A registry that records every operation, for replays and tests.
    pub fn with_journal() -> Self {
        SceneRegistry {
            journal: Some(RefCell::default()),
            ..SceneRegistry::default()
        }
    }

    pub fn get(&self, route: &Route) -> Option<ConfigPayload> {
        self.entries.borrow().get(route).cloned()
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.entries.borrow().contains_key(route)
    }

    pub fn routes(&self) -> Vec<Route> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn is_journaling(&self) -> bool {
        self.journal.is_some()
    }

    /// Copy of the recorded operations, empty without a journal.
    pub fn journal(&self) -> Vec<RegistryOp> {
        self.journal
            .as_ref()
            .map(|journal| journal.borrow().clone())
            .unwrap_or_default()
    }

    pub fn journal_len(&self) -> usize {
        self.journal
            .as_ref()
            .map_or(0, |journal| journal.borrow().len())
    }

    /// Sets and clears performed since the registry was created.
    pub fn operation_count(&self) -> usize {
        self.operations.get()
    }

    /// Number of `set_next_config` calls seen for `route`.
    pub fn write_count(&self, route: &Route) -> usize {
        self.writes.borrow().get(route).copied().unwrap_or(0)
    }

    pub fn clear_journal(&self) {
        if let Some(journal) = &self.journal {
            journal.borrow_mut().clear();
        }
    }

    fn record(&self, op: impl FnOnce() -> RegistryOp) {
        self.operations.set(self.operations.get() + 1);
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(op());
        }
    }
}

impl ConfigRegistry for SceneRegistry {
    fn set_next_config(&self, route: &Route, payload: ConfigPayload) {
        tracing::debug!(%route, options = payload.len(), "navigation bar config set");
        *self.writes.borrow_mut().entry(route.clone()).or_default() += 1;
        self.record(|| RegistryOp::Set(route.clone(), payload.clone()));
        self.entries.borrow_mut().insert(route.clone(), payload);
    }

    fn clear_config(&self, route: &Route) {
        let removed = self.entries.borrow_mut().shift_remove(route).is_some();
        tracing::debug!(%route, removed, "navigation bar config cleared");
        self.record(|| RegistryOp::Clear(route.clone()));
    }
}

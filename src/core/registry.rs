//! Target registry: the canonical list of targets and the profile card.
//!
//! Every mutating operation re-reads the stored list, applies its change
//! and persists the full record before returning. Several handles on one
//! store (a running `watch` and a separate `add`, say) therefore never
//! write back each other's stale snapshots.

use crate::core::store::{ITEMS_KEY, KvStore, PROFILE_KEY, load_json, save_json};
use crate::errors::{AppError, AppResult};
use crate::models::profile::Profile;
use crate::models::target::{Target, TargetDraft, Transition};
use crate::utils::time::parse_start;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

/// Decode a stored target list element by element. Malformed elements
/// are skipped with a warning; only a record that is not a JSON array is
/// an error.
pub fn decode_targets(raw: &str) -> AppResult<Vec<Target>> {
    let items: Vec<Value> = serde_json::from_str(raw)?;
    let mut targets = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Target>(item) {
            Ok(t) => targets.push(t),
            Err(e) => warn!(index, error = %e, "skipping malformed stored target"),
        }
    }
    Ok(targets)
}

/// `Ok(None)` when nothing is stored yet.
fn read_targets(store: &dyn KvStore) -> AppResult<Option<Vec<Target>>> {
    match store.get(ITEMS_KEY)? {
        Some(raw) => decode_targets(&raw).map(Some),
        None => Ok(None),
    }
}

pub struct Registry<S: KvStore> {
    store: S,
    /// Insertion order; `list()` derives the start-ordered view.
    targets: Vec<Target>,
    profile: Profile,
    /// The last write did not reach the store; memory is authoritative
    /// until one does.
    unsynced: bool,
}

impl<S: KvStore> Registry<S> {
    /// Load both records from `store`. Missing or corrupt data yields an
    /// empty list and a blank profile.
    pub fn load(store: S) -> Self {
        let targets = read_targets(&store).unwrap_or_else(|e| {
            warn!(key = ITEMS_KEY, error = %e, "stored record is unusable, using defaults");
            None
        });
        let targets = targets.unwrap_or_default();
        let profile: Profile = load_json(&store, PROFILE_KEY, Profile::default());
        debug!(count = targets.len(), "registry loaded");
        Self {
            store,
            targets,
            profile,
            unsynced: false,
        }
    }

    /// Replace the in-memory list with the stored one. The list is kept
    /// as is when nothing readable is stored or when the last write
    /// failed. Returns whether the list was replaced.
    pub fn reload(&mut self) -> bool {
        if self.unsynced {
            return false;
        }
        match read_targets(&self.store) {
            Ok(Some(targets)) => {
                self.targets = targets;
                true
            }
            Ok(None) => false,
            Err(e) => {
                debug!(key = ITEMS_KEY, error = %e, "reload skipped");
                false
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Validate and append a new target. Returns the fresh id, or `None`
    /// (registry untouched) when title/url are blank or start is invalid.
    pub fn add(&mut self, draft: &TargetDraft) -> Option<String> {
        let title = draft.title.trim();
        let url = draft.url.trim();
        if title.is_empty() || url.is_empty() {
            debug!("rejected draft with blank title or url");
            return None;
        }
        let Some(start) = parse_start(&draft.start) else {
            debug!(start = %draft.start, "rejected draft with invalid start");
            return None;
        };

        self.reload();
        let id = self.fresh_id();
        self.targets.push(Target {
            id: id.clone(),
            title: title.to_string(),
            url: url.to_string(),
            start,
            prep_lead_seconds: draft.prep_lead_seconds,
            auto_open: draft.auto_open,
            warned: false,
            opened: false,
        });
        self.persist();
        Some(id)
    }

    /// Remove the target with `id`. Unknown ids are not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        self.reload();
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        let removed = self.targets.len() != before;
        self.persist();
        removed
    }

    /// Flip `auto_open`; returns the new value, or `None` for unknown ids.
    pub fn toggle_auto_open(&mut self, id: &str) -> Option<bool> {
        self.reload();
        let target = self.targets.iter_mut().find(|t| t.id == id)?;
        target.auto_open = !target.auto_open;
        let now_on = target.auto_open;
        self.persist();
        Some(now_on)
    }

    /// Set `warned` or `opened` for `id`. Setting an already-set flag is a
    /// no-op; returns whether the flag changed. Ids no longer in the store
    /// are left alone.
    pub fn mark_phase(&mut self, id: &str, transition: Transition) -> bool {
        self.reload();
        let Some(target) = self.targets.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        let flag = match transition {
            Transition::PreAlert => &mut target.warned,
            Transition::Start => &mut target.opened,
        };
        let changed = !*flag;
        *flag = true;
        self.persist();
        changed
    }

    /// Targets ascending by start; equal starts keep insertion order.
    pub fn list(&self) -> Vec<Target> {
        let mut sorted = self.targets.clone();
        sorted.sort_by_key(|t| t.start);
        sorted
    }

    pub fn get(&self, id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Resolve a full id or a unique id prefix to a full id.
    pub fn resolve(&self, id_or_prefix: &str) -> AppResult<String> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(AppError::UnknownTarget(id_or_prefix.to_string()));
        }
        if let Some(t) = self.get(needle) {
            return Ok(t.id.clone());
        }

        let mut matches = self.targets.iter().filter(|t| t.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(t), None) => Ok(t.id.clone()),
            (Some(_), Some(_)) => Err(AppError::AmbiguousTarget(needle.to_string())),
            (None, _) => Err(AppError::UnknownTarget(needle.to_string())),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
        save_json(&mut self.store, PROFILE_KEY, &self.profile);
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        self.unsynced = !save_json(&mut self.store, ITEMS_KEY, &self.targets);
    }
}

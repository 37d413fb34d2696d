//! The live state of the active scene.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sc_core::object::{ObjectTemplate, ObjectType};
use sc_core::rule::Rule;
use sc_core::scene::ViewMode;

use crate::instance::{InstanceId, RuntimeInstance};
use crate::pool::ObjectPool;
use crate::variables::VariableTable;

/// Bookkeeping that only lives for one tick.
#[derive(Debug, Default)]
pub struct TickScratch {
    /// Instances to remove at the end of the tick.
    pub recycle: HashSet<InstanceId>,
    /// Instances created this tick, appended at the end of the tick.
    pub spawns: Vec<RuntimeInstance>,
    /// Scene requested by a `GOTO_SCENE` rule (last request wins).
    pub scene_request: Option<String>,
    /// Positions at the start of the tick, for heading updates.
    pub start_positions: HashMap<InstanceId, (f64, f64)>,
}

/// Everything the systems read and mutate while a scene plays.
#[derive(Debug, Default)]
pub struct Stage {
    /// Id of the loaded scene.
    pub scene_id: String,
    /// Perspective of the loaded scene.
    pub view: ViewMode,
    /// Live instances in authoring/spawn order.
    pub instances: Vec<RuntimeInstance>,
    /// Global and scene variables.
    pub variables: VariableTable,
    /// The scene's rules, in priority order.
    pub rules: Arc<[Rule]>,
    /// Prefab templates by id.
    pub prefabs: HashMap<String, Arc<ObjectTemplate>>,
    /// Parked prefab instances.
    pub pool: ObjectPool,
    /// Seconds of hit-stop left.
    pub hit_stop: f64,
    /// Per-tick bookkeeping.
    pub scratch: TickScratch,
}

impl Stage {
    /// An empty stage with no scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-tick bookkeeping and remember where everything starts.
    pub fn begin_tick(&mut self) {
        self.scratch.recycle.clear();
        self.scratch.spawns.clear();
        self.scratch.scene_request = None;
        self.scratch.start_positions = self
            .instances
            .iter()
            .map(|i| (i.id, (i.x, i.y)))
            .collect();
    }

    /// Schedule an instance for removal at the end of the tick.
    pub fn mark_recycled(&mut self, id: InstanceId) {
        self.scratch.recycle.insert(id);
    }

    /// Whether an instance is scheduled for removal.
    pub fn is_recycled(&self, id: InstanceId) -> bool {
        self.scratch.recycle.contains(&id)
    }

    /// Record a scene switch request.
    pub fn request_scene(&mut self, scene_id: impl Into<String>) {
        self.scratch.scene_request = Some(scene_id.into());
    }

    /// Whether a scene switch was requested this tick.
    pub fn scene_requested(&self) -> bool {
        self.scratch.scene_request.is_some()
    }

    /// Find a live instance.
    pub fn instance(&self, id: InstanceId) -> Option<&RuntimeInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    /// Find a live instance by template name (case-insensitive).
    pub fn instance_named(&self, name: &str) -> Option<&RuntimeInstance> {
        self.instances
            .iter()
            .find(|i| i.name().eq_ignore_ascii_case(name))
    }

    /// Live instances of a type.
    pub fn instances_of(&self, kind: ObjectType) -> impl Iterator<Item = &RuntimeInstance> {
        self.instances.iter().filter(move |i| i.kind() == kind)
    }

    /// Remove recycled instances (returning prefab instances to their pools)
    /// and append this tick's spawns. Returns each removed id and whether it
    /// was pooled.
    pub fn reap_and_spawn(&mut self) -> Vec<(InstanceId, bool)> {
        let mut removed = Vec::new();
        if !self.scratch.recycle.is_empty() {
            let instances = std::mem::take(&mut self.instances);
            for inst in instances {
                if self.scratch.recycle.contains(&inst.id) {
                    let id = inst.id;
                    let pooled = self.pool.release(inst);
                    removed.push((id, pooled));
                } else {
                    self.instances.push(inst);
                }
            }
            self.scratch.recycle.clear();
        }
        self.instances.append(&mut self.scratch.spawns);
        removed
    }

    /// Whether every live id is unique.
    pub fn ids_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.instances.len());
        self.instances.iter().all(|i| seen.insert(i.id))
    }
}

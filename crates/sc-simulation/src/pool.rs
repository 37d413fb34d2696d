//! Recycling of prefab instances.
//!
//! Each prefab has a free list of parked instances. An instance is owned
//! either by the stage (live) or by its free list (parked), never both.
//! Pools only grow within a scene: the total per prefab is the peak number
//! of simultaneously live spawns, or the pre-allocation if that is larger.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use log::trace;
use sc_core::object::ObjectTemplate;

use crate::instance::RuntimeInstance;

/// Instance counts for one prefab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances ever allocated for the prefab in this scene.
    pub total: usize,
    /// Instances currently parked and ready for reuse.
    pub idle: usize,
}

#[derive(Debug, Default)]
struct PrefabPool {
    idle: VecDeque<RuntimeInstance>,
    total: usize,
}

/// Free lists keyed by prefab template id.
#[derive(Debug, Default)]
pub struct ObjectPool {
    pools: HashMap<String, PrefabPool>,
}

impl ObjectPool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure at least `count` instances of the prefab exist, parking new ones.
    pub fn pre_allocate(&mut self, prefab: &Arc<ObjectTemplate>, count: usize) {
        let pool = self.pools.entry(prefab.id.clone()).or_default();
        while pool.total < count {
            let mut inst = RuntimeInstance::from_template(Arc::clone(prefab));
            inst.park();
            pool.idle.push_back(inst);
            pool.total += 1;
        }
    }

    /// Take a fresh live instance of the prefab, reusing a parked one when possible.
    pub fn acquire(&mut self, prefab: &Arc<ObjectTemplate>) -> RuntimeInstance {
        let pool = self.pools.entry(prefab.id.clone()).or_default();
        match pool.idle.pop_front() {
            Some(mut inst) => {
                inst.reset();
                inst.active = true;
                trace!("reused pooled '{}' as {}", prefab.name, inst.id);
                inst
            }
            None => {
                pool.total += 1;
                trace!("pool '{}' grew to {}", prefab.name, pool.total);
                RuntimeInstance::from_template(Arc::clone(prefab))
            }
        }
    }

    /// Give an instance back. Prefab instances are parked for reuse and
    /// `true` is returned; anything else is dropped.
    pub fn release(&mut self, mut inst: RuntimeInstance) -> bool {
        let Some(prefab_id) = inst.prefab_id().map(str::to_string) else {
            return false;
        };
        inst.park();
        let pool = self.pools.entry(prefab_id).or_default();
        pool.idle.push_back(inst);
        true
    }

    /// Drop every pool.
    pub fn clear(&mut self) {
        self.pools.clear();
    }

    /// Counts for a prefab (zeroes when it has no pool yet).
    pub fn stats(&self, prefab_id: &str) -> PoolStats {
        self.pools
            .get(prefab_id)
            .map(|p| PoolStats {
                total: p.total,
                idle: p.idle.len(),
            })
            .unwrap_or_default()
    }

    /// Ids of every prefab with a pool.
    pub fn prefab_ids(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }
}

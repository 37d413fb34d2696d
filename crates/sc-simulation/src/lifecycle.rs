//! Scene loading: turning an authored scene into a fresh stage.

use std::sync::Arc;

use log::debug;
use sc_core::project::Project;

use crate::error::{SimError, SimResult};
use crate::instance::RuntimeInstance;
use crate::stage::{Stage, TickScratch};
use crate::variables::VariableTable;

/// Load a scene into the stage.
///
/// Pools, prefabs, hit-stop, and per-tick state are always cleared. With
/// `keep_globals` the current variable map carries over; otherwise every
/// declared global is reset to its initial value. The target scene's own
/// variables are reset either way.
///
/// On error (unknown scene) the stage is left untouched.
pub fn load_scene(
    stage: &mut Stage,
    project: &Project,
    scene_id: &str,
    keep_globals: bool,
) -> SimResult<()> {
    let scene = project
        .scene(scene_id)
        .ok_or_else(|| SimError::SceneNotFound(scene_id.to_string()))?;

    stage.pool.clear();
    stage.prefabs.clear();
    stage.hit_stop = 0.0;
    stage.scratch = TickScratch::default();

    if !keep_globals {
        stage.variables = VariableTable::from_declarations(&project.variables);
    }
    stage.variables.initialize(&scene.variables);

    stage.scene_id = scene.id.clone();
    stage.view = scene.view;
    stage.rules = Arc::from(scene.rules.as_slice());

    stage.instances.clear();
    for template in &scene.objects {
        let template = Arc::new(template.clone());
        if template.is_prefab {
            if template.pool_size > 0 {
                stage
                    .pool
                    .pre_allocate(&template, template.pool_size as usize);
            }
            stage.prefabs.insert(template.id.clone(), template);
        } else {
            stage
                .instances
                .push(RuntimeInstance::from_template(template));
        }
    }

    debug!(
        "loaded scene '{}' ({}): {} instances, {} prefabs, {} rules",
        scene.name,
        scene.id,
        stage.instances.len(),
        stage.prefabs.len(),
        stage.rules.len()
    );
    Ok(())
}

//! Loaded model records.
//!
//! Records are keyed by id; a separate id list keeps insertion order for
//! display. The registry is the only code that adds model roots to the
//! scene graph or takes them out.

use std::collections::HashMap;

use shared::{ModelId, ModelSummary, Transform};

use super::normalize::{normalize, NormalizeOptions};
use crate::dispose::dispose;
use crate::loader::{upload, ModelNode};
use crate::resources::ResourcePool;
use crate::scene::{NodeHandle, SceneGraph};

/// Bookkeeping entry for one loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    id: ModelId,
    display_name: String,
    scene_object: NodeHandle,
    default_transform: Transform,
}

impl ModelRecord {
    pub fn id(&self) -> &ModelId {
        &self.id
    }

    /// Original file name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Root node of the model in the scene graph
    pub fn scene_object(&self) -> NodeHandle {
        self.scene_object
    }

    /// Transform captured right after normalization
    pub fn default_transform(&self) -> &Transform {
        &self.default_transform
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            id: self.id.clone(),
            name: self.display_name.clone(),
        }
    }
}

/// Entry of the model selection list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOption {
    None,
    Model(ModelSummary),
}

#[derive(Default)]
pub struct ModelRegistry {
    records: HashMap<ModelId, ModelRecord>,
    order: Vec<ModelId>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&self) -> ModelId {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }

    /// Upload a parsed model, normalize it, add it to the scene and store a record
    pub fn register<G: SceneGraph + ?Sized>(
        &mut self,
        file_name: &str,
        model: ModelNode,
        scene: &mut G,
        pool: &mut ResourcePool,
        options: &NormalizeOptions,
    ) -> ModelId {
        let mut root = upload(model, pool);
        if root.name.is_empty() {
            root.name = file_name.to_string();
        }
        let default_transform = normalize(&mut root, pool, options);
        let scene_object = scene.add(root);

        let id = self.generate_id();
        self.records.insert(
            id.clone(),
            ModelRecord {
                id: id.clone(),
                display_name: file_name.to_string(),
                scene_object,
                default_transform,
            },
        );
        self.order.push(id.clone());
        tracing::info!("Registered model {id} ({file_name})");
        id
    }

    /// Remove a model: detach its root from the scene, release its resources,
    /// then drop the record. Returns false if `id` is unknown.
    pub fn remove<G: SceneGraph + ?Sized>(&mut self, id: &str, scene: &mut G, pool: &mut ResourcePool) -> bool {
        let Some(record) = self.records.get(id) else {
            return false;
        };
        match scene.remove(record.scene_object) {
            Some(root) => {
                dispose(root, pool);
            }
            None => tracing::warn!("Model {id} had no scene node"),
        }
        self.records.remove(id);
        self.order.retain(|other| other != id);
        tracing::info!("Removed model {id}");
        true
    }

    pub fn get(&self, id: &str) -> Option<&ModelRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Records in insertion order
    pub fn list(&self) -> impl Iterator<Item = &ModelRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|other| other == id)
    }

    /// The record that takes `id`'s place once it is removed: the next one,
    /// or the previous one when `id` is last.
    pub fn neighbor_of(&self, id: &str) -> Option<ModelId> {
        let pos = self.position(id)?;
        self.order
            .get(pos + 1)
            .or_else(|| pos.checked_sub(1).and_then(|p| self.order.get(p)))
            .cloned()
    }

    /// Selection list entries: always starts with `None`
    pub fn selection_options(&self) -> Vec<SelectionOption> {
        std::iter::once(SelectionOption::None)
            .chain(self.list().map(|r| SelectionOption::Model(r.summary())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::box_model;
    use crate::scene::Scene;

    fn setup() -> (ModelRegistry, Scene, ResourcePool) {
        (ModelRegistry::new(), Scene::new(), ResourcePool::new())
    }

    fn register(reg: &mut ModelRegistry, scene: &mut Scene, pool: &mut ResourcePool, name: &str) -> ModelId {
        reg.register(name, box_model(1.0, 1.0, 1.0), scene, pool, &NormalizeOptions::default())
    }

    #[test]
    fn test_register_adds_record_and_node() {
        let (mut reg, mut scene, mut pool) = setup();
        let id = register(&mut reg, &mut scene, &mut pool, "a.glb");
        let record = reg.get(&id).unwrap();
        assert_eq!(record.display_name(), "a.glb");
        assert!(scene.contains(record.scene_object()));
        assert_eq!(
            scene.node(record.scene_object()).unwrap().transform,
            *record.default_transform()
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let (mut reg, mut scene, mut pool) = setup();
        let a = register(&mut reg, &mut scene, &mut pool, "same.glb");
        let b = register(&mut reg, &mut scene, &mut pool, "same.glb");
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_remove_releases_everything() {
        let (mut reg, mut scene, mut pool) = setup();
        let id = register(&mut reg, &mut scene, &mut pool, "a.glb");
        let handle = reg.get(&id).unwrap().scene_object();

        assert!(reg.remove(&id, &mut scene, &mut pool));
        assert!(reg.get(&id).is_none());
        assert!(!scene.contains(handle));
        assert_eq!(pool.counts().total(), 0);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (mut reg, mut scene, mut pool) = setup();
        let id = register(&mut reg, &mut scene, &mut pool, "a.glb");
        assert!(!reg.remove("missing", &mut scene, &mut pool));
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(&id));
    }

    #[test]
    fn test_order_stable_after_remove() {
        let (mut reg, mut scene, mut pool) = setup();
        let a = register(&mut reg, &mut scene, &mut pool, "a.glb");
        let b = register(&mut reg, &mut scene, &mut pool, "b.glb");
        let c = register(&mut reg, &mut scene, &mut pool, "c.glb");
        reg.remove(&b, &mut scene, &mut pool);
        let ids: Vec<_> = reg.list().map(|r| r.id().clone()).collect();
        assert_eq!(ids, vec![a.clone(), c.clone()]);
        let names: Vec<_> = reg.list().map(|r| r.display_name().to_string()).collect();
        assert_eq!(names, vec!["a.glb", "c.glb"]);
    }

    #[test]
    fn test_neighbor_of() {
        let (mut reg, mut scene, mut pool) = setup();
        let a = register(&mut reg, &mut scene, &mut pool, "a.glb");
        let b = register(&mut reg, &mut scene, &mut pool, "b.glb");
        let c = register(&mut reg, &mut scene, &mut pool, "c.glb");
        assert_eq!(reg.neighbor_of(&a), Some(b.clone()));
        assert_eq!(reg.neighbor_of(&b), Some(c.clone()));
        assert_eq!(reg.neighbor_of(&c), Some(b));
        assert_eq!(reg.neighbor_of("missing"), None);
    }

    #[test]
    fn test_neighbor_of_single_record() {
        let (mut reg, mut scene, mut pool) = setup();
        let a = register(&mut reg, &mut scene, &mut pool, "a.glb");
        assert_eq!(reg.neighbor_of(&a), None);
    }

    #[test]
    fn test_selection_options_always_has_none() {
        let (mut reg, mut scene, mut pool) = setup();
        assert_eq!(reg.selection_options(), vec![SelectionOption::None]);

        let id = register(&mut reg, &mut scene, &mut pool, "duck.glb");
        let options = reg.selection_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], SelectionOption::None);
        assert_eq!(
            options[1],
            SelectionOption::Model(ModelSummary {
                id,
                name: "duck.glb".into()
            })
        );
    }
}

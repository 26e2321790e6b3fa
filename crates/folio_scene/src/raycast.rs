//! Ray picking against scene subtrees.
//!
//! The interaction engine only depends on [`RayPicker`]; [`SceneRaycaster`]
//! is the built-in implementation testing each node's local pick bounds in
//! world space. Hosts with an exact mesh picker can supply their own.

use folio_core::Ray;
use glam::{Affine3A, Vec3};
use smallvec::SmallVec;

use crate::NodeHandle;
use crate::scene::Scene;

/// One ray/node intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeHandle,
    pub distance: f32,
    pub point: Vec3,
}

pub trait RayPicker {
    /// Intersects `ray` with `candidates` (and their descendants when
    /// `recursive`), returning hits ordered nearest first.
    fn intersect(
        &self,
        scene: &Scene,
        ray: &Ray,
        candidates: &[NodeHandle],
        recursive: bool,
    ) -> Vec<Hit>;
}

/// Bounding-box picker.
///
/// Visibility is deliberately not consulted: callers decide what an invisible
/// hit means.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRaycaster;

impl SceneRaycaster {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn test_node(scene: &Scene, handle: NodeHandle, world: &Affine3A, ray: &Ray, hits: &mut Vec<Hit>) {
        let Some(bounds) = scene.get_node(handle).and_then(|n| n.bounds) else {
            return;
        };
        if let Some(distance) = bounds.transform(world).intersect_ray(ray) {
            hits.push(Hit {
                node: handle,
                distance,
                point: ray.at(distance),
            });
        }
    }
}

impl RayPicker for SceneRaycaster {
    fn intersect(
        &self,
        scene: &Scene,
        ray: &Ray,
        candidates: &[NodeHandle],
        recursive: bool,
    ) -> Vec<Hit> {
        let mut hits = Vec::new();

        for &candidate in candidates {
            if scene.get_node(candidate).is_none() {
                continue;
            }
            let world = scene.compute_world_matrix(candidate);

            if !recursive {
                Self::test_node(scene, candidate, &world, ray, &mut hits);
                continue;
            }

            let mut stack: SmallVec<[(NodeHandle, Affine3A); 16]> = SmallVec::new();
            stack.push((candidate, world));
            while let Some((handle, world)) = stack.pop() {
                Self::test_node(scene, handle, &world, ray, &mut hits);
                if let Some(node) = scene.get_node(handle) {
                    for &child in node.children() {
                        if let Some(c) = scene.get_node(child) {
                            stack.push((child, world * c.transform.local_matrix()));
                        }
                    }
                }
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

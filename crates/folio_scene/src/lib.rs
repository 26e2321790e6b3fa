//! Scene graph module
//!
//! Manages the node hierarchy the tracking engine and the models live in:
//! - [`Node`]: a scene node (parent/children, transform, visibility, pick bounds)
//! - [`Transform`]: position, additive Euler rotation and scale
//! - [`Scene`]: the node arena plus hierarchy operations
//! - [`Camera`]: perspective camera able to turn screen points into rays
//! - [`raycast`]: nearest-first ray intersection against subtrees

pub mod camera;
pub mod node;
pub mod raycast;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use node::Node;
pub use raycast::{Hit, RayPicker, SceneRaycaster};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`Scene`].
    pub struct NodeHandle;
}

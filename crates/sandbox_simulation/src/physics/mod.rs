//! Physics module
//!
//! Rapier как black-box backend + наш слой поверх:
//! - `world` - fixed-step advance, гравитация, ray test
//! - `shape` - ShapeDescriptor → collider
//! - `body` - Body Factory
//! - `registry` - registry визуалов динамических тел + Sync Step

pub mod body;
pub mod registry;
pub mod shape;
pub mod world;

// Re-export основных типов
pub use body::{create_body, BodySpec, BodyVisual, PhysicsMaterial};
pub use registry::{sync_bodies_to_visuals, DynamicBodyEntry, RigidBodyRegistry};
pub use shape::ShapeDescriptor;
pub use world::{ray_test, PhysicsSettings, PhysicsWorldPlugin};

//! Body Factory - создание simulated rigid body по описанию
//!
//! - mass > 0 → `RigidBody::Dynamic` (никогда не засыпает), пара
//!   {visual, body} уходит в `RigidBodyRegistry`
//! - mass = 0 → `RigidBody::Fixed`, в registry не попадает
//! - Visual сразу получает стартовую позу

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use super::registry::RigidBodyRegistry;
use super::shape::ShapeDescriptor;
use crate::error::BodyError;

/// Friction/restitution тела
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.2,
        }
    }
}

impl PhysicsMaterial {
    /// Игрок не отскакивает от пола
    pub fn player() -> Self {
        Self {
            restitution: 0.0,
            ..default()
        }
    }
}

/// Описание тела: форма + масса + стартовая поза
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub shape: ShapeDescriptor,
    pub mass: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub material: PhysicsMaterial,
}

impl BodySpec {
    pub fn new(shape: ShapeDescriptor, mass: f32, position: Vec3) -> Self {
        Self {
            shape,
            mass,
            position,
            rotation: Quat::IDENTITY,
            material: PhysicsMaterial::default(),
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}

/// Link: body → его визуал (ставится любому телу с визуалом, static тоже)
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyVisual(pub Entity);

/// Создать тело в мире физики
///
/// `visual` - entity визуального представления (если есть). Динамическое
/// тело с визуалом регистрируется в `RigidBodyRegistry`; тело без визуала
/// (игрок) живёт только в физике.
///
/// # Errors
/// `BodyError` при невалидной форме или массе - тело не создаётся.
pub fn create_body(
    commands: &mut Commands,
    registry: &mut RigidBodyRegistry,
    visual: Option<Entity>,
    spec: BodySpec,
) -> Result<Entity, BodyError> {
    if !(spec.mass.is_finite() && spec.mass >= 0.0) {
        return Err(BodyError::InvalidMass(spec.mass));
    }
    let collider = spec.shape.collider()?;
    let transform = spec.transform();

    let mut body = commands.spawn((
        transform,
        collider,
        Friction::coefficient(spec.material.friction),
        Restitution::coefficient(spec.material.restitution),
    ));

    if spec.is_dynamic() {
        body.insert((
            RigidBody::Dynamic,
            ColliderMassProperties::Mass(spec.mass),
            Velocity::default(),
            Sleeping::disabled(),
        ));
    } else {
        body.insert(RigidBody::Fixed);
    }

    if let Some(visual) = visual {
        body.insert(BodyVisual(visual));
    }

    let body = body.id();

    if let Some(visual) = visual {
        commands.entity(visual).insert(transform);

        if spec.is_dynamic() {
            registry.insert(visual, body);
        }
    }

    Ok(body)
}

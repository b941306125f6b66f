//! Описание формы тела → collider
//!
//! Tagged enum вместо проверки типа геометрии в runtime: каждая форма
//! явно перечислена, маппинг в collider - чистая функция.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use serde::{Deserialize, Serialize};

use crate::error::BodyError;

/// Половина толщины коллайдера для плоскости (плоскость = тонкий box)
pub const PLANE_HALF_THICKNESS: f32 = 0.1;

/// Примитив формы для Body Factory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescriptor {
    /// Box с половинными размерами по осям
    Box { half_extents: Vec3 },
    /// Вертикальная capsule: `height` - полная высота, включая полусферы
    Capsule { radius: f32, height: f32 },
    /// Горизонтальная плоскость XZ (половинные размеры), коллайдер - тонкий box
    Plane { half_size: Vec2 },
}

impl ShapeDescriptor {
    /// Box по полным размерам (как у визуальной геометрии)
    pub fn cuboid(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Capsule { .. } => "capsule",
            Self::Plane { .. } => "plane",
        }
    }

    /// Fail-fast проверка размеров
    pub fn validate(&self) -> Result<(), BodyError> {
        let invalid = |reason: String| BodyError::InvalidShape {
            shape: self.name(),
            reason,
        };

        match *self {
            Self::Box { half_extents } => {
                if !half_extents.is_finite() || half_extents.min_element() <= 0.0 {
                    return Err(invalid(format!("half extents {half_extents} must be finite and > 0")));
                }
            }
            Self::Capsule { radius, height } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(invalid(format!("radius {radius} must be finite and > 0")));
                }
                if !height.is_finite() || height < radius * 2.0 {
                    return Err(invalid(format!(
                        "height {height} must be finite and >= 2 * radius ({})",
                        radius * 2.0
                    )));
                }
            }
            Self::Plane { half_size } => {
                if !half_size.is_finite() || half_size.min_element() <= 0.0 {
                    return Err(invalid(format!("half size {half_size} must be finite and > 0")));
                }
            }
        }

        Ok(())
    }

    /// Маппинг descriptor → Rapier collider
    pub fn collider(&self) -> Result<Collider, BodyError> {
        self.validate()?;

        let collider = match *self {
            Self::Box { half_extents } => {
                Collider::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Self::Capsule { radius, height } => {
                // capsule_y принимает половину высоты цилиндрической части
                Collider::capsule_y((height - radius * 2.0) * 0.5, radius)
            }
            Self::Plane { half_size } => {
                Collider::cuboid(half_size.x, PLANE_HALF_THICKNESS, half_size.y)
            }
        };

        Ok(collider)
    }
}

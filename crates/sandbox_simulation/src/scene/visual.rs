//! VisualSpec - render-agnostic описание визуала
//!
//! Симуляция не тянет рендер: вешает `VisualSpec` на visual entity,
//! клиент по нему строит mesh + material.

use bevy::prelude::*;

/// Геометрия визуала
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualShape {
    /// Box по полным размерам
    Cuboid { size: Vec3 },
    /// Оружие-prop (клиент собирает его из примитивов)
    Weapon,
}

/// Описание визуала: геометрия + PBR параметры
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VisualSpec {
    pub shape: VisualShape,
    /// sRGB цвет
    pub color: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
    /// sRGB emissive
    pub emissive: [f32; 3],
    pub casts_shadows: bool,
}

impl VisualSpec {
    pub fn new(shape: VisualShape, color: [f32; 3]) -> Self {
        Self {
            shape,
            color,
            roughness: 0.8,
            metallic: 0.1,
            emissive: [0.0; 3],
            casts_shadows: true,
        }
    }

    pub fn with_surface(mut self, roughness: f32, metallic: f32) -> Self {
        self.roughness = roughness;
        self.metallic = metallic;
        self
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn without_shadows(mut self) -> Self {
        self.casts_shadows = false;
        self
    }
}

/// sRGB hex (0xRRGGBB) → [r, g, b] в 0..1
pub fn srgb_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

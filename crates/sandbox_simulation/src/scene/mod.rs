//! Scene domain - что спавнится и как это выглядит
//!
//! - `visual` - VisualSpec (описание для клиента)
//! - `demo` - demo scene + SceneConfig

pub mod demo;
pub mod visual;

pub use demo::{spawn_demo_scene, DemoScenePlugin, SceneConfig, ARCADE_PALETTE};
pub use visual::{srgb_hex, VisualShape, VisualSpec};

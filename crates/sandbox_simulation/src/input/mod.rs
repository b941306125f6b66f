//! Player input module
//!
//! # Архитектура
//!
//! ```text
//! Host input (keyboard, tests)
//!     ↓
//! InputQueue (bounded FIFO) - events.rs
//!     ↓
//! apply_input_queue (раз в кадр) - systems.rs
//!     ↓
//! PlayerState.input (MoveIntent + edge triggers) - intent.rs
//!     ↓
//! Player Controller
//! ```

pub mod events;
pub mod intent;
pub mod systems;

pub use events::*;
pub use intent::*;
pub use systems::*;

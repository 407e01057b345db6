//! Systems that operate on the arena world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They own no state; all state lives in components or in the `Arena`.

pub mod cleanup;
pub mod movement;
pub mod report;
pub mod scripts;
pub mod sensors;
pub mod shots;

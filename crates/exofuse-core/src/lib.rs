//! Core types and trait definitions for the exofuse catalog engine.
//!
//! Free of HTTP, CSV and fusion logic. Every other crate depends on it; it
//! depends only on serde, serde_json and strum.

pub mod planet;
pub mod provenance;
pub mod source;
pub mod system;

pub use planet::{Planet, PlanetType};
pub use provenance::{Catalog, DataFields, DataSource};
pub use source::{CatalogSource, RawRow};
pub use system::{HabitableZone, StarSystem, StellarFields};

/// Fill `slot` from `incoming` only if `slot` is empty.
///
/// Returns `true` when the slot changed.
pub fn fill_null<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>) -> bool {
  match (&slot, incoming) {
    (None, Some(v)) => {
      *slot = Some(v.clone());
      true
    }
    _ => false,
  }
}

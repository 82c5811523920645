//! Catalog fusion: merges archive and community records into one list of
//! star systems, fills derived quantities and labels every planet.
//!
//! # Quick start
//!
//! ```no_run
//! use exofuse_core::RawRow;
//!
//! let archive: Vec<RawRow> = Vec::new();
//! let output = exofuse_fusion::fuse_with_csv(&archive, Some("name,star_name\n"));
//! println!("{} systems", output.systems.len());
//! ```

pub mod classify;
pub mod coords;
mod engine;
pub mod names;
pub mod physics;
mod stats;

pub use classify::classify;
pub use coords::{are_coordinates_close, verify_match};
pub use engine::{Fusion, FusionOutput};
use exofuse_catalog::parse_community_csv;
use exofuse_core::RawRow;
pub use names::{NameMatcher, NameRegistry, normalize};
pub use stats::FusionStats;

/// Run one fusion pass. `community` absent means archive-only fusion.
pub fn fuse(archive: &[RawRow], community: Option<&[RawRow]>) -> FusionOutput {
  Fusion::new().run(archive, community)
}

/// Like [`fuse`], taking the community catalog as CSV text. Text that cannot
/// be parsed as CSV is logged and the run continues archive-only.
pub fn fuse_with_csv(archive: &[RawRow], community_csv: Option<&str>) -> FusionOutput {
  let community = community_csv.and_then(|text| match parse_community_csv(text) {
    Ok(rows) => Some(rows),
    Err(error) => {
      tracing::warn!(%error, "community catalog unreadable; fusing archive only");
      None
    }
  });
  fuse(archive, community.as_deref())
}

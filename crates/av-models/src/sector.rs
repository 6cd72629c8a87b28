//! Sector performance (SECTOR). This endpoint only speaks JSON.

use crate::common::{Percent, ServerResponse};
use std::collections::BTreeMap;

/// Key of the metadata block in the SECTOR response
pub const META_DATA_KEY: &str = "Meta Data";

/// Sector returns grouped by ranking window
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPerformance {
  /// HTTP status and headers
  pub server_response: ServerResponse,

  /// Metadata block (`Information`, `Last Refreshed`)
  pub meta_data: BTreeMap<String, String>,

  /// Ranking window (e.g. `Rank A: Real-Time Performance`) to sector returns
  pub ranks: BTreeMap<String, BTreeMap<String, Percent>>,
}

impl SectorPerformance {
  /// Sector returns for the window whose label starts with `Rank {letter}`
  pub fn rank(&self, letter: char) -> Option<&BTreeMap<String, Percent>> {
    let prefix = format!("Rank {letter}");
    self.ranks.iter().find(|(label, _)| label.starts_with(&prefix)).map(|(_, sectors)| sectors)
  }

  /// Best-performing sector in a window
  pub fn leader(&self, letter: char) -> Option<(&str, Percent)> {
    self
      .rank(letter)?
      .iter()
      .max_by(|a, b| a.1.value().total_cmp(&b.1.value()))
      .map(|(name, pct)| (name.as_str(), *pct))
  }
}

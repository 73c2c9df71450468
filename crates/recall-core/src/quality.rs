//! Quality classifier — maps a learner's feedback action to a recall score.
//!
//! The mapping is a closed enumeration. Text that names no known action is a
//! caller error ([`Error::InvalidAction`]); it never falls back to a default
//! quality.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

/// Qualities at or above this value count as a successful recall.
pub const SUCCESSFUL_RECALL_THRESHOLD: u8 = 3;

/// Highest quality on the 0–5 scale.
pub const MAX_QUALITY: u8 = 5;

// ─── Actions ─────────────────────────────────────────────────────────────────

/// The feedback a learner gives after attempting a due item.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewAction {
  /// Could not recall the solution.
  Forgot,
  /// Recalled it, with difficulty.
  Hard,
  /// Recalled it confidently.
  Easy,
}

impl ReviewAction {
  /// Parse the textual form (`"forgot"`, `"hard"`, `"easy"`).
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::InvalidAction(s.to_owned()))
  }
}

// ─── Quality ─────────────────────────────────────────────────────────────────

/// A recall score on the 0–5 scale.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
  /// Returns `None` when `value` is above [`MAX_QUALITY`].
  pub const fn new(value: u8) -> Option<Self> {
    if value <= MAX_QUALITY { Some(Self(value)) } else { None }
  }

  pub const fn value(self) -> u8 { self.0 }

  pub const fn is_successful_recall(self) -> bool {
    self.0 >= SUCCESSFUL_RECALL_THRESHOLD
  }
}

/// Map a feedback action to its quality score.
pub const fn classify(action: ReviewAction) -> Quality {
  match action {
    ReviewAction::Forgot => Quality(2),
    ReviewAction::Hard => Quality(3),
    ReviewAction::Easy => Quality(5),
  }
}

impl From<ReviewAction> for Quality {
  fn from(action: ReviewAction) -> Self { classify(action) }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn actions_map_to_fixed_qualities() {
    assert_eq!(classify(ReviewAction::Forgot).value(), 2);
    assert_eq!(classify(ReviewAction::Hard).value(), 3);
    assert_eq!(classify(ReviewAction::Easy).value(), 5);
  }

  #[test]
  fn only_forgot_is_a_failed_recall() {
    for action in ReviewAction::iter() {
      let expected = action != ReviewAction::Forgot;
      assert_eq!(classify(action).is_successful_recall(), expected, "{action}");
    }
  }

  #[test]
  fn threshold_boundary() {
    assert!(!Quality::new(2).unwrap().is_successful_recall());
    assert!(Quality::new(3).unwrap().is_successful_recall());
  }

  #[test]
  fn quality_rejects_out_of_scale_values() {
    assert!(Quality::new(0).is_some());
    assert!(Quality::new(5).is_some());
    assert!(Quality::new(6).is_none());
  }

  #[test]
  fn parse_accepts_known_actions() {
    assert_eq!(ReviewAction::parse("forgot").unwrap(), ReviewAction::Forgot);
    assert_eq!(ReviewAction::parse("hard").unwrap(), ReviewAction::Hard);
    assert_eq!(ReviewAction::parse("easy").unwrap(), ReviewAction::Easy);
    assert_eq!(ReviewAction::Easy.to_string(), "easy");
  }

  #[test]
  fn parse_rejects_unknown_actions() {
    for bad in ["", "medium", "Easy", "again"] {
      match ReviewAction::parse(bad) {
        Err(Error::InvalidAction(s)) => assert_eq!(s, bad),
        other => panic!("expected InvalidAction for {bad:?}, got {other:?}"),
      }
    }
  }
}

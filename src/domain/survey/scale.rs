//! Judgment scale - the bidirectional 1-9 pairwise intensity scale.
//!
//! A judgment is a signed integer: positive values favor option A, negative
//! values favor option B, and `1` means both options are equally important.
//! There is no zero point and `-1` is never produced, so the scale has 17
//! distinct values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Every value a respondent may select, in slider order (A-extreme to B-extreme).
pub const PERMITTED_VALUES: [i8; 17] = [9, 8, 7, 6, 5, 4, 3, 2, 1, -2, -3, -4, -5, -6, -7, -8, -9];

/// Value substituted for questions the respondent never touched.
pub const NEUTRAL_VALUE: i8 = 1;

/// Which of the two compared options a judgment favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    A,
    B,
    Equal,
}

impl Direction {
    /// Maps any raw integer to a direction.
    ///
    /// Total over `i8`: the impossible values `0` and `-1` map to `Equal`.
    pub fn from_raw(value: i8) -> Self {
        if value > 1 {
            Direction::A
        } else if value < -1 {
            Direction::B
        } else {
            Direction::Equal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::A => "A",
            Direction::B => "B",
            Direction::Equal => "Equal",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated value on the judgment scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct JudgmentValue(i8);

impl JudgmentValue {
    /// The neutral "equal importance" value.
    pub const NEUTRAL: JudgmentValue = JudgmentValue(NEUTRAL_VALUE);

    /// Creates a judgment value, rejecting anything outside the scale.
    pub fn try_new(value: i8) -> Result<Self, ValidationError> {
        if PERMITTED_VALUES.contains(&value) {
            Ok(Self(value))
        } else if (-9..=9).contains(&value) {
            Err(ValidationError::invalid_format(
                "judgment",
                format!("{} is not on the comparison scale (0 and -1 are never valid)", value),
            ))
        } else {
            Err(ValidationError::out_of_range("judgment", -9, 9, value as i32))
        }
    }

    /// Widening constructor for values arriving as larger integers (JSON, CSV).
    pub fn try_from_i64(value: i64) -> Result<Self, ValidationError> {
        let narrowed = i8::try_from(value).map_err(|_| {
            ValidationError::out_of_range("judgment", -9, 9, value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        })?;
        Self::try_new(narrowed)
    }

    /// Returns the signed value.
    pub fn value(&self) -> i8 {
        self.0
    }

    /// Returns the intensity label shown on the slider (`|value|`).
    pub fn label(&self) -> String {
        self.0.unsigned_abs().to_string()
    }

    /// Returns the favored option.
    pub fn direction(&self) -> Direction {
        Direction::from_raw(self.0)
    }

    /// Returns the human-readable answer written into response records.
    pub fn answer_label(&self) -> String {
        match self.direction() {
            Direction::A => format!("Option A {}x", self.0),
            Direction::B => format!("Option B {}x", self.0.unsigned_abs()),
            Direction::Equal => "Equal (1)".to_string(),
        }
    }

    /// Returns the verbal AHP meaning of the intensity.
    pub fn meaning(&self) -> &'static str {
        match self.0.unsigned_abs() {
            1 => "equally important",
            2 => "equal to moderately more important",
            3 => "moderately more important",
            4 => "moderately to strongly more important",
            5 => "strongly more important",
            6 => "strongly to very strongly more important",
            7 => "very strongly more important",
            8 => "very strongly to extremely more important",
            _ => "extremely more important",
        }
    }
}

impl Default for JudgmentValue {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<i8> for JudgmentValue {
    type Error = ValidationError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<JudgmentValue> for i8 {
    fn from(value: JudgmentValue) -> Self {
        value.0
    }
}

impl fmt::Display for JudgmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One selectable slider position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleOption {
    pub value: i8,
    pub label: String,
    pub direction: Direction,
    pub meaning: &'static str,
}

/// Returns the full scale in slider order.
pub fn scale_options() -> Vec<ScaleOption> {
    PERMITTED_VALUES
        .iter()
        .map(|&v| {
            let value = JudgmentValue(v);
            ScaleOption {
                value: v,
                label: value.label(),
                direction: value.direction(),
                meaning: value.meaning(),
            }
        })
        .collect()
}

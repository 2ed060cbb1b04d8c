//! Prize segments

use serde::{Deserialize, Serialize};

/// One slice of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeSegment {
    /// Label or prize code shown on the slice
    pub label: String,
    /// CSS color of the slice
    pub color: String,
}

impl PrizeSegment {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

const DEFAULT_COLORS: [&str; 8] = [
    "#FF6B6B", // Red
    "#4ECDC4", // Teal
    "#45B7D1", // Blue
    "#96CEB4", // Green
    "#FFEAA7", // Yellow
    "#DDA0DD", // Plum
    "#FFA07A", // Light Salmon
    "#98D8C8", // Mint
];

/// Eight placeholder prizes, "Prize 1" to "Prize 8"
pub fn default_prizes() -> Vec<PrizeSegment> {
    DEFAULT_COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| PrizeSegment::new(format!("Prize {}", i + 1), *color))
        .collect()
}

/// Ordered, non-empty prize table. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    segments: Vec<PrizeSegment>,
}

impl Wheel {
    /// `None` for an empty table
    pub fn new(segments: Vec<PrizeSegment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[PrizeSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn get(&self, index: usize) -> Option<&PrizeSegment> {
        self.segments.get(index)
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self {
            segments: default_prizes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prizes() {
        let prizes = default_prizes();
        assert_eq!(prizes.len(), 8);
        assert_eq!(prizes[0], PrizeSegment::new("Prize 1", "#FF6B6B"));
        assert_eq!(prizes[7].label, "Prize 8");
    }

    #[test]
    fn test_empty_wheel_rejected() {
        assert!(Wheel::new(Vec::new()).is_none());
        let wheel = Wheel::new(vec![PrizeSegment::new("Only", "#fff")]).expect("non-empty");
        assert_eq!(wheel.len(), 1);
    }
}

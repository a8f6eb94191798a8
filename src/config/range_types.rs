use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A radial falloff multiplier constrained to [0.1, 5.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Falloff(f32);

impl Falloff {
    const MIN: f32 = 0.1;
    const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Falloff {
    fn default() -> Self {
        Self::new(1.5)
    }
}

/// A peak sharpness exponent constrained to [0.1, 5.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Sharpness(f32);

impl Sharpness {
    const MIN: f32 = 0.1;
    const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Sharpness {
    fn default() -> Self {
        Self::new(1.5)
    }
}

/// A fraction of the heightmap range constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct HeightFraction(f32);

impl HeightFraction {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for HeightFraction {
    fn default() -> Self {
        Self::new(0.3)
    }
}

/// A center-to-center separation in grid cells constrained to [0.0, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Separation(f32);

impl Separation {
    const MIN: f32 = 0.0;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Separation {
    fn default() -> Self {
        Self::new(15.0)
    }
}

/// A basin carving depth constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct BasinDepth(f32);

impl BasinDepth {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for BasinDepth {
    fn default() -> Self {
        Self::new(0.25)
    }
}

/// An absolute peak height threshold constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct PeakThreshold(f32);

impl PeakThreshold {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for PeakThreshold {
    fn default() -> Self {
        Self::new(0.8)
    }
}

/// A random site attempt cap constrained to [1, 10000]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SiteAttempts(u32);

impl SiteAttempts {
    const MIN: u32 = 1;
    const MAX: u32 = 10_000;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SiteAttempts {
    fn default() -> Self {
        Self::new(100)
    }
}

/// An A* node expansion budget constrained to [1, 10000000]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SearchBudget(u32);

impl SearchBudget {
    const MIN: u32 = 1;
    const MAX: u32 = 10_000_000;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(250_000)
    }
}

/// A per-step cost limit constrained to [1.0, 10000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct StepCostLimit(f32);

impl StepCostLimit {
    const MIN: f32 = 1.0;
    const MAX: f32 = 10_000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for StepCostLimit {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_clamping() {
        assert_eq!(Falloff::new(-1.0).get(), 0.1);
        assert_eq!(Falloff::new(2.0).get(), 2.0);
        assert_eq!(Falloff::new(9.0).get(), 5.0);
    }

    #[test]
    fn test_integer_clamping() {
        assert_eq!(SiteAttempts::new(0).get(), 1);
        assert_eq!(SearchBudget::new(u32::MAX).get(), 10_000_000);
    }

    #[test]
    fn test_display() {
        let threshold = PeakThreshold::new(0.75);
        assert_eq!(format!("{threshold}"), "0.75");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Falloff::default().get(), 1.5);
        assert_eq!(Sharpness::default().get(), 1.5);
        assert_eq!(HeightFraction::default().get(), 0.3);
        assert_eq!(Separation::default().get(), 15.0);
        assert_eq!(PeakThreshold::default().get(), 0.8);
        assert_eq!(SiteAttempts::default().get(), 100);
        assert_eq!(StepCostLimit::default().get(), 50.0);
    }
}

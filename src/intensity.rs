use crate::error::{HeatwaveError, Result};
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

/// Number of shades a commit day can be drawn with.
pub const LEVELS: u8 = 5;

/// Step between two shade boundaries. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ShadeOffset(NonZeroU32);

impl ShadeOffset {
    pub const ONE: ShadeOffset = ShadeOffset(NonZeroU32::MIN);

    pub fn new(offset: i64) -> Result<Self> {
        u32::try_from(offset)
            .ok()
            .and_then(NonZeroU32::new)
            .map(ShadeOffset)
            .ok_or(HeatwaveError::InvalidOffset(offset))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Upper boundary of `level`, inclusive. Level 5 has none.
    pub fn boundary(self, level: IntensityLevel) -> Option<u64> {
        (level.get() < LEVELS).then(|| u64::from(level.get()) * u64::from(self.get()))
    }
}

impl Default for ShadeOffset {
    fn default() -> Self {
        ShadeOffset::ONE
    }
}

impl fmt::Display for ShadeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shade of an active day, 1 (lightest) to 5 (heaviest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IntensityLevel(u8);

impl IntensityLevel {
    pub const MAX: IntensityLevel = IntensityLevel(LEVELS);

    pub fn new(level: u8) -> Option<Self> {
        (1..=LEVELS).contains(&level).then_some(IntensityLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = IntensityLevel> {
        (1..=LEVELS).map(IntensityLevel)
    }
}

/// Shade for a day with `count` commits. Level k covers counts up to
/// `k * offset`; everything above `4 * offset` is level 5. A count of zero
/// has no shade.
pub fn classify(count: u32, offset: ShadeOffset) -> Option<IntensityLevel> {
    if count == 0 {
        return None;
    }
    let count = u64::from(count);
    let level = IntensityLevel::all()
        .find(|&level| offset.boundary(level).map_or(true, |upper| count <= upper))
        .unwrap_or(IntensityLevel::MAX);
    Some(level)
}

/// One row of the legend shown under the heat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub level: IntensityLevel,
    /// Largest count drawn with this level, or for the top level the
    /// smallest one.
    pub value: u64,
    pub open_ended: bool,
}

/// Legend entries for every level, matching `classify` exactly.
pub fn legend(offset: ShadeOffset) -> Vec<LegendEntry> {
    IntensityLevel::all()
        .map(|level| match offset.boundary(level) {
            Some(value) => LegendEntry {
                level,
                value,
                open_ended: false,
            },
            None => LegendEntry {
                level,
                value: u64::from(LEVELS - 1) * u64::from(offset.get()) + 1,
                open_ended: true,
            },
        })
        .collect()
}

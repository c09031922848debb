//! Tariff tables
//!
//! Volume tiers, the water-scarcity flag (bandeira hídrica) surcharge and the
//! sewage fee rate. Every value here is a fixed regulatory constant.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Money, Rate};

/// Minimum billable consumption in cubic meters
///
/// Readings below this volume are billed as if this much had been used.
pub const MINIMUM_BILLABLE_VOLUME: Decimal = dec!(10);

/// Largest consumed volume accepted for billing, in cubic meters
///
/// Keeps every derived amount well inside the decimal range.
pub const MAXIMUM_VOLUME_CONSUMED: Decimal = dec!(1000000000);

/// Sewage fee as a share of (water charge + flag surcharge)
pub const SEWAGE_RATE: Rate = Rate::new(dec!(0.80));

/// Volume-banded unit price
///
/// Bounds are inclusive and evaluated in order; the first tier whose upper
/// bound is not exceeded applies to the whole billable volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffTier {
    /// Up to 10 m³
    Minimum,
    /// Above 10 m³ up to 20 m³
    Residential,
    /// Above 20 m³ up to 50 m³
    Elevated,
    /// Above 50 m³
    Excess,
}

impl TariffTier {
    /// All tiers in evaluation order
    pub const ALL: [TariffTier; 4] = [
        TariffTier::Minimum,
        TariffTier::Residential,
        TariffTier::Elevated,
        TariffTier::Excess,
    ];

    /// Selects the tier for a billable volume
    pub fn for_volume(billable_volume: Decimal) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| match tier.upper_bound() {
                Some(bound) => billable_volume <= bound,
                None => true,
            })
            .unwrap_or(TariffTier::Excess)
    }

    /// Inclusive upper bound of the tier in m³, `None` for the open-ended tier
    pub fn upper_bound(&self) -> Option<Decimal> {
        match self {
            TariffTier::Minimum => Some(dec!(10)),
            TariffTier::Residential => Some(dec!(20)),
            TariffTier::Elevated => Some(dec!(50)),
            TariffTier::Excess => None,
        }
    }

    /// Price per cubic meter
    pub fn rate(&self) -> Money {
        match self {
            TariffTier::Minimum => Money::new(dec!(2.50)),
            TariffTier::Residential => Money::new(dec!(3.50)),
            TariffTier::Elevated => Money::new(dec!(5.00)),
            TariffTier::Excess => Money::new(dec!(6.50)),
        }
    }
}

/// Water-scarcity flag in force for the billing month
///
/// Labels arrive as free text. Only the yellow and red flags carry a
/// surcharge; green and any unrecognized label bill at the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffFlag {
    /// "verde" - no surcharge
    #[default]
    Green,
    /// "amarela" - 10% surcharge
    Yellow,
    /// "vermelha" - 20% surcharge
    Red,
}

impl TariffFlag {
    /// Parses a flag label, case-insensitively
    ///
    /// Never fails: unknown labels fall back to [`TariffFlag::Green`].
    pub fn parse(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "amarela" => TariffFlag::Yellow,
            "vermelha" => TariffFlag::Red,
            _ => TariffFlag::Green,
        }
    }

    /// Surcharge applied on top of the water charge
    pub fn surcharge_rate(&self) -> Rate {
        match self {
            TariffFlag::Green => Rate::ZERO,
            TariffFlag::Yellow => Rate::new(dec!(0.10)),
            TariffFlag::Red => Rate::new(dec!(0.20)),
        }
    }

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            TariffFlag::Green => "verde",
            TariffFlag::Yellow => "amarela",
            TariffFlag::Red => "vermelha",
        }
    }
}

impl fmt::Display for TariffFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for TariffFlag {
    fn from(label: &str) -> Self {
        TariffFlag::parse(label)
    }
}

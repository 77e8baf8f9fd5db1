use crate::model::DeviceRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Devices sharing one icon signature and one protection value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedItem {
    /// Grouping key: `<icon_type>::<suoja>`.
    pub id: String,
    /// Icon signature: sorted icon ids joined with `+`.
    pub icon_type: String,
    /// Icons of the first device in the group, in their original order.
    pub icons: Vec<String>,
    pub suoja: String,
    pub count: usize,
    /// Share of all devices, in percent (one decimal).
    pub percentage: Decimal,
    /// Distinct non-empty cable types in order of first observation.
    pub kaapeli_types: Vec<String>,
    /// True once more than one distinct cable type has been observed.
    pub has_cable_mismatch: bool,
    pub devices: Vec<DeviceRow>,
}

/// Devices sharing one protection value, regardless of icons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedByProtection {
    pub suoja: String,
    pub count: usize,
    /// Share of all devices, in percent (one decimal).
    pub percentage: Decimal,
    pub devices: Vec<DeviceRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResult {
    pub all_devices: Vec<DeviceRow>,
    pub total_count: usize,
    /// Sorted by count, descending; ties keep first-encounter order.
    pub aggregated_items: Vec<AggregatedItem>,
    /// Distinct icon signatures across `aggregated_items`.
    pub unique_types: usize,
    /// Sorted by count, descending; ties keep first-encounter order.
    pub aggregated_by_protection: Vec<AggregatedByProtection>,
    pub unique_protections: usize,
}

/// `count / total * 100`, rounded to one decimal place. Zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(1)
}

use crate::model::{DeviceRow, PageExtractionDataset};
use crate::summary::outcome::{percentage, AggregatedByProtection, AggregatedItem, SummaryResult};
use std::collections::{HashMap, HashSet};

const ICON_SEPARATOR: &str = "+";
const KEY_SEPARATOR: &str = "::";

/// Aggregate a dataset snapshot into a flat device list and two groupings.
///
/// Pure and deterministic: the same snapshot always yields the same result,
/// including device ids and the order of equal-count groups.
pub fn summarize(dataset: &PageExtractionDataset) -> SummaryResult {
    let all_devices = flatten(dataset);
    let total_count = all_devices.len();

    let mut aggregated_items = group_by_signature(&all_devices);
    aggregated_items.sort_by(|a, b| b.count.cmp(&a.count));
    for item in &mut aggregated_items {
        item.percentage = percentage(item.count, total_count);
    }

    let unique_types = aggregated_items
        .iter()
        .map(|item| item.icon_type.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut aggregated_by_protection = group_by_protection(&all_devices);
    aggregated_by_protection.sort_by(|a, b| b.count.cmp(&a.count));
    for group in &mut aggregated_by_protection {
        group.percentage = percentage(group.count, total_count);
    }
    let unique_protections = aggregated_by_protection.len();

    tracing::debug!(
        total_count,
        groups = aggregated_items.len(),
        unique_types,
        unique_protections,
        "summarized dataset"
    );

    SummaryResult {
        all_devices,
        total_count,
        aggregated_items,
        unique_types,
        aggregated_by_protection,
        unique_protections,
    }
}

/// Canonical icon signature: ids sorted ordinally and joined with `+`.
pub fn icon_signature(icons: &[String]) -> String {
    let mut sorted: Vec<&str> = icons.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(ICON_SEPARATOR)
}

/// Present rows in page order then row order, with one counter for the pass.
fn flatten(dataset: &PageExtractionDataset) -> Vec<DeviceRow> {
    let mut devices = Vec::new();
    for (page_index, rows) in dataset.pages() {
        for row in rows.iter().filter(|r| r.is_present()) {
            let device = DeviceRow::from_row(row, page_index, devices.len());
            devices.push(device);
        }
    }
    devices
}

fn group_by_signature(devices: &[DeviceRow]) -> Vec<AggregatedItem> {
    let mut items: Vec<AggregatedItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for device in devices {
        if device.icons.is_empty() || device.suoja.is_empty() {
            continue;
        }

        let icon_type = icon_signature(&device.icons);
        let key = format!("{icon_type}{KEY_SEPARATOR}{}", device.suoja);

        match index.get(&key) {
            Some(&pos) => {
                let item = &mut items[pos];
                item.count += 1;
                item.devices.push(device.clone());

                if !device.kaapeli.is_empty() && !item.kaapeli_types.contains(&device.kaapeli) {
                    item.kaapeli_types.push(device.kaapeli.clone());
                    if item.kaapeli_types.len() > 1 {
                        item.has_cable_mismatch = true;
                    }
                }
            }
            None => {
                let kaapeli_types = if device.kaapeli.is_empty() {
                    Vec::new()
                } else {
                    vec![device.kaapeli.clone()]
                };
                index.insert(key.clone(), items.len());
                items.push(AggregatedItem {
                    id: key,
                    icon_type,
                    icons: device.icons.clone(),
                    suoja: device.suoja.clone(),
                    count: 1,
                    percentage: Default::default(),
                    kaapeli_types,
                    has_cable_mismatch: false,
                    devices: vec![device.clone()],
                });
            }
        }
    }

    items
}

fn group_by_protection(devices: &[DeviceRow]) -> Vec<AggregatedByProtection> {
    let mut groups: Vec<AggregatedByProtection> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for device in devices.iter().filter(|d| !d.suoja.is_empty()) {
        match index.get(device.suoja.as_str()) {
            Some(&pos) => {
                let group = &mut groups[pos];
                group.count += 1;
                group.devices.push(device.clone());
            }
            None => {
                index.insert(device.suoja.as_str(), groups.len());
                groups.push(AggregatedByProtection {
                    suoja: device.suoja.clone(),
                    count: 1,
                    percentage: Default::default(),
                    devices: vec![device.clone()],
                });
            }
        }
    }

    groups
}

use keskus_core::catalog::SymbolCatalog;
use keskus_core::model::ExtractionRow;
use keskus_core::summary::SummaryResult;

pub fn print_summary(summary: &SummaryResult, catalog: &SymbolCatalog) {
    println!("=== Device Summary ===\n");

    if summary.aggregated_items.is_empty() {
        println!("  No devices with both symbols and a protection value.\n");
    } else {
        let types: Vec<String> = summary
            .aggregated_items
            .iter()
            .map(|item| catalog.display_names(&item.icons))
            .collect();
        let type_width = types.iter().map(|t| t.len()).max().unwrap_or(10).max(5);
        let suoja_width = summary
            .aggregated_items
            .iter()
            .map(|item| item.suoja.len())
            .max()
            .unwrap_or(5)
            .max(5);

        println!(
            "  {:<tw$}  {:<sw$}  {:>5}  {:>6}  Cable types",
            "Icons",
            "Suoja",
            "Qty",
            "%",
            tw = type_width,
            sw = suoja_width
        );
        println!("  {}", "-".repeat(type_width + suoja_width + 34));

        for (item, type_name) in summary.aggregated_items.iter().zip(&types) {
            let cables = if item.kaapeli_types.is_empty() {
                "-".to_string()
            } else {
                item.kaapeli_types.join(", ")
            };
            let mismatch = if item.has_cable_mismatch {
                "  (mismatch)"
            } else {
                ""
            };
            println!(
                "  {:<tw$}  {:<sw$}  {:>5}  {:>6}  {}{}",
                type_name,
                item.suoja,
                item.count,
                item.percentage,
                cables,
                mismatch,
                tw = type_width,
                sw = suoja_width
            );
        }
        println!();
    }

    println!("  Total devices:      {}", summary.total_count);
    println!("  Symbol types:       {}", summary.unique_types);
    println!("  Protection values:  {}", summary.unique_protections);

    let mismatched = summary
        .aggregated_items
        .iter()
        .filter(|i| i.has_cable_mismatch)
        .count();
    if mismatched > 0 {
        println!("  Groups with mixed cable types: {mismatched}");
    }
    println!();
}

pub fn print_protection(summary: &SummaryResult) {
    println!("=== By Protection ===\n");

    if summary.aggregated_by_protection.is_empty() {
        println!("  No devices with a protection value.\n");
        return;
    }

    let width = summary
        .aggregated_by_protection
        .iter()
        .map(|p| p.suoja.len())
        .max()
        .unwrap_or(5)
        .max(5);

    for group in &summary.aggregated_by_protection {
        println!(
            "  {:<width$}  {:>5}  {:>6}%",
            group.suoja,
            group.count,
            group.percentage,
            width = width
        );
    }
    println!();
}

pub fn print_devices(summary: &SummaryResult, catalog: &SymbolCatalog) {
    println!("=== All Devices ===\n");

    for device in &summary.all_devices {
        let icons = if device.icons.is_empty() {
            "-".to_string()
        } else {
            catalog.display_names(&device.icons)
        };
        println!(
            "  p{:<3} {:<6} {:<30} {:<10} {:<14} {}",
            device.page_number, device.nro, device.kuvateksti, device.suoja, device.kaapeli, icons
        );
    }
    println!();
}

/// Print rows of one page, numbering them from `first_row` (1-based).
pub fn print_rows(page: usize, first_row: usize, rows: &[ExtractionRow]) {
    println!("=== Page {page} ===\n");

    for (offset, row) in rows.iter().enumerate() {
        let number = first_row + offset;
        if !row.is_present() {
            println!("  {number:>3}  (empty)");
            continue;
        }
        println!(
            "  {:>3}  nro: {}  suoja: {}  kaapeli: {}",
            number, row.nro, row.suoja, row.kaapeli
        );
        if !row.kuvateksti.is_empty() {
            println!("       {}", row.kuvateksti);
        }
        if !row.icons.is_empty() {
            println!("       icons: {}", row.icons.join(", "));
        }
    }
    println!();
}

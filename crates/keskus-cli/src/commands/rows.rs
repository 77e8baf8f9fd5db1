use keskus_core::error::KeskusError;
use keskus_core::model::ExtractionRow;

use super::Context;
use crate::output;

/// Fields to overwrite on a row. `None` keeps the stored value.
pub struct RowEdit {
    pub icons: Option<String>,
    pub nro: Option<String>,
    pub kuvateksti: Option<String>,
    pub suoja: Option<String>,
    pub kaapeli: Option<String>,
}

impl RowEdit {
    fn apply(self, row: &mut ExtractionRow) {
        if let Some(icons) = self.icons {
            row.icons = icons
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(nro) = self.nro {
            row.nro = nro;
        }
        if let Some(kuvateksti) = self.kuvateksti {
            row.kuvateksti = kuvateksti;
        }
        if let Some(suoja) = self.suoja {
            row.suoja = suoja;
        }
        if let Some(kaapeli) = self.kaapeli {
            row.kaapeli = kaapeli;
        }
    }
}

pub fn get(
    ctx: &Context,
    page: usize,
    row: Option<usize>,
    output_format: &str,
) -> Result<(), KeskusError> {
    let store = ctx.open_store()?;
    let page_index = page - 1;

    match row {
        Some(row) => match store.get_row(page_index, row - 1) {
            Some(r) => match output_format {
                "json" => output::json::print(r)?,
                _ => output::table::print_rows(page, row, std::slice::from_ref(r)),
            },
            None => eprintln!("No row {row} on page {page}"),
        },
        None => {
            let rows = store.get_page(page_index);
            match output_format {
                "json" => output::json::print(&rows)?,
                _ if rows.is_empty() => eprintln!("Page {page} has no rows"),
                _ => output::table::print_rows(page, 1, rows),
            }
        }
    }

    Ok(())
}

pub fn set(ctx: &Context, page: usize, row: usize, edit: RowEdit) -> Result<(), KeskusError> {
    let mut store = ctx.open_store()?;
    let (page_index, row_index) = (page - 1, row - 1);

    let mut updated = store.get_row(page_index, row_index).cloned().unwrap_or_default();
    edit.apply(&mut updated);
    store.set_row(page_index, row_index, updated)?;

    eprintln!("Updated page {page}, row {row}");
    Ok(())
}

pub fn clear_page(ctx: &Context, page: usize) -> Result<(), KeskusError> {
    let mut store = ctx.open_store()?;
    store.set_page(page - 1, Vec::new())?;
    eprintln!("Cleared page {page}");
    Ok(())
}

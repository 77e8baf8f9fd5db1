use crate::catalog::{parse_catalog_str, SymbolCatalog};
use crate::error::KeskusError;

const BUILTIN_SYMBOLS_JSON: &str = include_str!("../../../../catalog/symbols.json");

/// Load the symbol table shipped with the crate.
pub fn load_builtin() -> Result<SymbolCatalog, KeskusError> {
    parse_catalog_str(BUILTIN_SYMBOLS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = load_builtin().unwrap();
        assert_eq!(catalog.symbols().len(), 7);
    }

    #[test]
    fn test_builtin_contains_known_ids() {
        let catalog = load_builtin().unwrap();
        for id in [
            "KATKAISIJA_3_4",
            "KYTKINVAROKE_3",
            "TULPPAVAROKE_3",
            "JOHDONSUOJA_1",
            "JOHDONSUOJA_3",
            "VIKAVIRTASUOJA",
            "YHDISTELMASUOJA",
        ] {
            assert!(catalog.by_id(id).is_some(), "missing {id}");
        }
    }
}

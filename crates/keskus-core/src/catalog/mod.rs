pub mod builtin;

use crate::error::KeskusError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A drawable electrical symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Stable identifier stored in extraction rows.
    pub id: String,
    /// Human-readable name, as printed in the diagram legend.
    pub name: String,
    /// Identifier used by the extraction service (underscores for spaces).
    pub api_id: String,
    pub icon_file_name: String,
}

impl Symbol {
    pub fn icon_path(&self) -> String {
        format!("/el_icons/{}", self.icon_file_name)
    }
}

/// Static lookup table from symbol identifiers to display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolCatalog {
    #[serde(default)]
    pub name: Option<String>,
    symbols: Vec<Symbol>,
}

impl SymbolCatalog {
    /// The symbol table shipped with the crate.
    pub fn builtin() -> Result<Self, KeskusError> {
        builtin::load_builtin()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn by_id(&self, id: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn by_api_id(&self, api_id: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.api_id == api_id)
    }

    /// Resolve a symbol string from the extraction service: by display name
    /// first, then by api id.
    pub fn resolve(&self, key: &str) -> Option<&Symbol> {
        self.by_name(key).or_else(|| self.by_api_id(key))
    }

    /// Display name for an icon id, falling back to the raw id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id(id).map(|s| s.name.as_str()).unwrap_or(id)
    }

    /// Display names for a sequence of icon ids joined with `" + "`.
    pub fn display_names(&self, ids: &[String]) -> String {
        ids.iter()
            .map(|id| self.display_name(id))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Load a custom catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<SymbolCatalog, KeskusError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeskusError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let catalog: SymbolCatalog =
        serde_json::from_str(&content).map_err(|e| KeskusError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<SymbolCatalog, KeskusError> {
    let catalog: SymbolCatalog = serde_json::from_str(json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &SymbolCatalog) -> Result<(), KeskusError> {
    if catalog.symbols.is_empty() {
        return Err(KeskusError::CatalogInvalid(
            "symbols must not be empty".into(),
        ));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    let mut api_ids = HashSet::new();

    for symbol in &catalog.symbols {
        if symbol.id.is_empty() || symbol.name.is_empty() {
            return Err(KeskusError::CatalogInvalid(
                "symbol id and name must not be empty".into(),
            ));
        }
        if !ids.insert(symbol.id.as_str()) {
            return Err(KeskusError::CatalogInvalid(format!(
                "duplicate symbol id '{}'",
                symbol.id
            )));
        }
        if !names.insert(symbol.name.as_str()) {
            return Err(KeskusError::CatalogInvalid(format!(
                "duplicate symbol name '{}'",
                symbol.name
            )));
        }
        if !symbol.api_id.is_empty() && !api_ids.insert(symbol.api_id.as_str()) {
            return Err(KeskusError::CatalogInvalid(format!(
                "duplicate api id '{}'",
                symbol.api_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SymbolCatalog {
        SymbolCatalog::builtin().unwrap()
    }

    #[test]
    fn test_lookup_by_id_name_and_api_id() {
        let c = catalog();
        assert_eq!(c.by_id("JOHDONSUOJA_1").unwrap().name, "JOHDONSUOJA 1-NAP");
        assert_eq!(c.by_name("JOHDONSUOJA 1-NAP").unwrap().id, "JOHDONSUOJA_1");
        assert_eq!(c.by_api_id("JOHDONSUOJA_1-NAP").unwrap().id, "JOHDONSUOJA_1");
        assert!(c.by_id("NOPE").is_none());
    }

    #[test]
    fn test_resolve_prefers_name_then_api_id() {
        let c = catalog();
        assert_eq!(c.resolve("3 ja 4-NAP KATKAISIJA").unwrap().id, "KATKAISIJA_3_4");
        assert_eq!(c.resolve("3_ja_4-NAP_KATKAISIJA").unwrap().id, "KATKAISIJA_3_4");
        assert!(c.resolve("KATKAISIJA_3_4").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let c = catalog();
        assert_eq!(c.display_name("VIKAVIRTASUOJA"), "VIKAVIRTASUOJA");
        assert_eq!(c.display_name("UNKNOWN_X"), "UNKNOWN_X");
        assert_eq!(
            c.display_names(&["JOHDONSUOJA_3".into(), "VIKAVIRTASUOJA".into()]),
            "JOHDONSUOJA 3-NAP + VIKAVIRTASUOJA"
        );
    }

    #[test]
    fn test_icon_path() {
        let c = catalog();
        assert_eq!(
            c.by_id("YHDISTELMASUOJA").unwrap().icon_path(),
            "/el_icons/YHDISTELMASUOJA icon.svg"
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{
            "symbols": [
                { "id": "A", "name": "A one", "api_id": "A_1", "icon_file_name": "a.svg" },
                { "id": "A", "name": "A two", "api_id": "A_2", "icon_file_name": "a.svg" }
            ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(parse_catalog_str(r#"{ "symbols": [] }"#).is_err());
    }

    #[test]
    fn test_load_catalog_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, KeskusError::CatalogLoad { .. }));
    }
}

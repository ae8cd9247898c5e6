use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use utoipa::ToSchema;

/// One prize line from the event stock sheet: name plus the total allotment
/// for the whole event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrizeDefinition {
    pub name: String,
    pub total: i64,
}

/// Static prize catalog for one event.
///
/// Loaded once at startup from the JSON produced by the stock-sheet
/// conversion step (`[{"name": "...", "total": n}]`). The sheet's summary
/// row is dropped here; stock accounting only ever sees assignable prizes.
#[derive(Debug, Clone)]
pub struct PrizeCatalog {
    prizes: Vec<PrizeDefinition>,
}

impl PrizeCatalog {
    pub fn load(path: impl AsRef<Path>, grand_total_label: &str) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read prize catalog {}: {e}",
                path.display()
            ))
        })?;
        let definitions: Vec<PrizeDefinition> = serde_json::from_str(&raw).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to parse prize catalog {}: {e}",
                path.display()
            ))
        })?;
        Self::from_definitions(definitions, grand_total_label)
    }

    pub fn from_definitions(
        definitions: Vec<PrizeDefinition>,
        grand_total_label: &str,
    ) -> AppResult<Self> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut prizes = Vec::with_capacity(definitions.len());

        for def in definitions {
            let name = def.name.trim().to_string();
            // The conversion script can leave a summary row and zero rows in
            // the file; neither is an assignable prize.
            if name.is_empty() || def.total <= 0 || name.eq_ignore_ascii_case(grand_total_label) {
                continue;
            }
            if !seen.insert(name.clone()) {
                return Err(AppError::ConfigError(format!(
                    "Duplicate prize name in catalog: {name}"
                )));
            }
            prizes.push(PrizeDefinition {
                name,
                total: def.total,
            });
        }

        if prizes.is_empty() {
            return Err(AppError::ConfigError(
                "Prize catalog contains no assignable prizes".to_string(),
            ));
        }

        Ok(PrizeCatalog { prizes })
    }

    pub fn list(&self) -> &[PrizeDefinition] {
        &self.prizes
    }

    pub fn total_stock(&self, name: &str) -> Option<i64> {
        self.prizes.iter().find(|p| p.name == name).map(|p| p.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, total: i64) -> PrizeDefinition {
        PrizeDefinition {
            name: name.to_string(),
            total,
        }
    }

    #[test]
    fn test_grand_total_row_is_dropped() {
        let catalog = PrizeCatalog::from_definitions(
            vec![
                def("Bono $500 MXN", 10),
                def("Termo Premium", 5),
                def("TOTAL DE BONOS", 15),
            ],
            "TOTAL DE BONOS",
        )
        .unwrap();

        assert_eq!(catalog.list().len(), 2);
        assert!(catalog.total_stock("TOTAL DE BONOS").is_none());
        assert_eq!(catalog.total_stock("Bono $500 MXN"), Some(10));
    }

    #[test]
    fn test_zero_and_empty_rows_are_dropped() {
        let catalog = PrizeCatalog::from_definitions(
            vec![def("", 3), def("Día Libre", 0), def("Smartwatch", 2)],
            "TOTAL DE BONOS",
        )
        .unwrap();

        assert_eq!(catalog.list().len(), 1);
        assert_eq!(catalog.total_stock("Smartwatch"), Some(2));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = PrizeCatalog::from_definitions(
            vec![def("Termo Premium", 5), def("Termo Premium", 3)],
            "TOTAL DE BONOS",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let result =
            PrizeCatalog::from_definitions(vec![def("TOTAL DE BONOS", 15)], "TOTAL DE BONOS");
        assert!(result.is_err());
    }
}

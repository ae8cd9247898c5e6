use crate::catalog::{PrizeCatalog, PrizeDefinition};
use crate::error::AppResult;
use crate::models::PrizeInventoryResponse;
use crate::services::HistoryService;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;

/// Derives remaining prize stock from the static catalog and the winning
/// records in the history store. Pure read side, no state of its own.
#[derive(Clone)]
pub struct InventoryService {
    pool: DatabaseConnection,
    catalog: Arc<PrizeCatalog>,
    history: HistoryService,
}

impl InventoryService {
    pub fn new(
        pool: DatabaseConnection,
        catalog: Arc<PrizeCatalog>,
        history: HistoryService,
    ) -> Self {
        Self {
            pool,
            catalog,
            history,
        }
    }

    /// Prizes still assignable, evaluated on the given connection so a play
    /// transaction sees stock consistent with its own view of the ledger.
    ///
    /// A failed history read degrades to an empty set: a missing store must
    /// block wins, never overrun stock.
    pub async fn available<C: ConnectionTrait>(&self, conn: &C) -> Vec<PrizeDefinition> {
        match self.history.winning_prize_names(conn).await {
            Ok(winning_names) => derive_available(self.catalog.list(), &winning_names),
            Err(e) => {
                log::warn!("Inventory derivation failed, treating stock as exhausted: {e}");
                Vec::new()
            }
        }
    }

    /// Per-prize totals for the admin panel. Unlike `available`, a store
    /// error surfaces to the caller here.
    pub async fn overview(&self) -> AppResult<Vec<PrizeInventoryResponse>> {
        let winning_names = self.history.winning_prize_names(&self.pool).await?;
        let distributed = count_by_name(&winning_names);

        Ok(self
            .catalog
            .list()
            .iter()
            .map(|p| {
                let given = distributed.get(p.name.as_str()).copied().unwrap_or(0);
                PrizeInventoryResponse {
                    name: p.name.clone(),
                    total: p.total,
                    distributed: given,
                    remaining: (p.total - given).max(0),
                }
            })
            .collect())
    }
}

fn count_by_name(winning_names: &[String]) -> HashMap<&str, i64> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for name in winning_names {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Catalog entries whose distributed count has not reached their allotment.
pub fn derive_available(
    catalog: &[PrizeDefinition],
    winning_names: &[String],
) -> Vec<PrizeDefinition> {
    let distributed = count_by_name(winning_names);
    catalog
        .iter()
        .filter(|p| distributed.get(p.name.as_str()).copied().unwrap_or(0) < p.total)
        .cloned()
        .collect()
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

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_untouched_catalog_is_fully_available() {
        let catalog = vec![def("Bono $500 MXN", 1), def("Termo Premium", 3)];
        let available = derive_available(&catalog, &[]);
        assert_eq!(available.len(), 2);
    }

    #[test]
    fn test_exhausted_prize_drops_out() {
        let catalog = vec![def("Bono $500 MXN", 1), def("Termo Premium", 3)];
        let available = derive_available(&catalog, &names(&["Bono $500 MXN"]));
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Termo Premium");
    }

    #[test]
    fn test_partial_distribution_keeps_prize() {
        let catalog = vec![def("Termo Premium", 3)];
        let available = derive_available(&catalog, &names(&["Termo Premium", "Termo Premium"]));
        assert_eq!(available.len(), 1);
    }

    #[test]
    fn test_everything_distributed_yields_empty_set() {
        let catalog = vec![def("Bono $500 MXN", 1), def("Termo Premium", 2)];
        let winning = names(&["Bono $500 MXN", "Termo Premium", "Termo Premium"]);
        assert!(derive_available(&catalog, &winning).is_empty());
    }

    #[test]
    fn test_unknown_prize_names_are_ignored() {
        // Records can reference prizes from an older catalog file.
        let catalog = vec![def("Termo Premium", 1)];
        let available = derive_available(&catalog, &names(&["Smartwatch Básico"]));
        assert_eq!(available.len(), 1);
    }
}

//! Transaction encoding into a boolean membership table

use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};

use crate::error::AnalysisError;

/// Encoded transactions: the sorted item universe and a one-hot membership
/// table with one row per transaction and one column per universe item.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketData {
    universe: Vec<String>,
    index: HashMap<String, u32>,
    table: Array2<bool>,
}

impl BasketData {
    /// Sorted list of every distinct item seen across all transactions.
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    /// Column index of an item label, if it occurs in the universe.
    pub fn item_index(&self, label: &str) -> Option<u32> {
        self.index.get(label).copied()
    }

    /// Label of a universe column.
    pub fn item_label(&self, index: u32) -> &str {
        &self.universe[index as usize]
    }

    /// The boolean membership table (transaction x item).
    pub fn table(&self) -> &Array2<bool> {
        &self.table
    }

    pub fn n_transactions(&self) -> usize {
        self.table.nrows()
    }

    /// Occurrence count per universe item, in universe (column) order.
    pub fn item_frequencies(&self) -> Vec<usize> {
        (0..self.universe.len())
            .map(|c| self.table.column(c).iter().filter(|&&present| present).count())
            .collect()
    }
}

/// Encode raw transactions into a [`BasketData`] membership table.
///
/// Duplicate items within one transaction collapse to a single occurrence and
/// item order within a transaction does not matter, so the encoding is
/// idempotent. Empty transactions are dropped; if the sequence is empty or
/// every transaction in it is, the encoder fails with
/// [`AnalysisError::EmptyInput`].
pub fn encode_transactions(
    transactions: &[Vec<String>],
) -> crate::Result<BasketData, AnalysisError> {
    let baskets: Vec<&Vec<String>> = transactions.iter().filter(|t| !t.is_empty()).collect();
    if baskets.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let universe: Vec<String> = baskets
        .iter()
        .flat_map(|basket| basket.iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let index: HashMap<String, u32> = universe
        .iter()
        .enumerate()
        .map(|(i, label)| (label.clone(), i as u32))
        .collect();

    let mut table = Array2::from_elem((baskets.len(), universe.len()), false);
    for (row, basket) in baskets.iter().enumerate() {
        for item in basket.iter() {
            // Every item is in the universe; duplicates just set the cell again.
            if let Some(&col) = index.get(item) {
                table[[row, col as usize]] = true;
            }
        }
    }

    Ok(BasketData { universe, index, table })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_basic() {
        let transactions = vec![basket(&["Milk", "Bread"]), basket(&["Bread", "Butter"])];
        let data = encode_transactions(&transactions).unwrap();

        assert_eq!(data.universe(), &["Bread", "Butter", "Milk"]);
        assert_eq!(data.n_transactions(), 2);

        let t = data.table();
        // Row 0: Bread, Milk
        assert_eq!(t[[0, 0]], true);
        assert_eq!(t[[0, 1]], false);
        assert_eq!(t[[0, 2]], true);
        // Row 1: Bread, Butter
        assert_eq!(t[[1, 0]], true);
        assert_eq!(t[[1, 1]], true);
        assert_eq!(t[[1, 2]], false);
    }

    #[test]
    fn test_duplicates_collapse_and_order_is_irrelevant() {
        let a = vec![basket(&["Milk", "Bread", "Milk"])];
        let b = vec![basket(&["Bread", "Milk"])];
        assert_eq!(encode_transactions(&a).unwrap(), encode_transactions(&b).unwrap());
    }

    #[test]
    fn test_idempotent() {
        let transactions = vec![basket(&["Milk", "Bread"]), basket(&["Eggs"])];
        let first = encode_transactions(&transactions).unwrap();
        let second = encode_transactions(&transactions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_items_that_never_co_occur_share_the_universe() {
        let transactions = vec![basket(&["Milk"]), basket(&["Eggs"])];
        let data = encode_transactions(&transactions).unwrap();
        assert_eq!(data.universe(), &["Eggs", "Milk"]);
        assert_eq!(data.item_frequencies(), vec![1, 1]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            encode_transactions(&empty),
            Err(AnalysisError::EmptyInput)
        ));

        // All-empty baskets reduce to the same condition after dropping them.
        let all_empty = vec![Vec::new(), Vec::new()];
        assert!(matches!(
            encode_transactions(&all_empty),
            Err(AnalysisError::EmptyInput)
        ));
    }

    #[test]
    fn test_empty_baskets_are_dropped() {
        let transactions = vec![basket(&["Milk"]), Vec::new(), basket(&["Bread"])];
        let data = encode_transactions(&transactions).unwrap();
        assert_eq!(data.n_transactions(), 2);
    }

    #[test]
    fn test_item_lookup() {
        let transactions = vec![basket(&["Milk", "Bread"])];
        let data = encode_transactions(&transactions).unwrap();
        assert_eq!(data.item_index("Bread"), Some(0));
        assert_eq!(data.item_index("Milk"), Some(1));
        assert_eq!(data.item_index("Caviar"), None);
        assert_eq!(data.item_label(1), "Milk");
    }
}

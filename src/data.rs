//! Transaction log loading using Polars

use polars::prelude::*;

/// Load a transaction log from a CSV file and group it into baskets.
///
/// Each row pairs a transaction id with one purchased item; rows sharing a
/// transaction id form one basket. Baskets keep first-appearance order (of
/// both transactions and items), items are deduplicated per basket, and the
/// item column is read as text so integer product codes work unchanged.
///
/// # Arguments
/// * `file_path` - Path to the CSV file
/// * `transaction_col` - Column name for transaction IDs
/// * `item_col` - Column name for product/item names
///
/// # Returns
/// * One `Vec<String>` of distinct items per transaction
pub fn load_transactions(
    file_path: &str,
    transaction_col: &str,
    item_col: &str,
) -> crate::Result<Vec<Vec<String>>> {
    let df = CsvReader::from_path(file_path)?.has_header(true).finish()?;

    let grouped = df
        .lazy()
        .select([col(transaction_col), col(item_col).cast(DataType::Utf8)])
        .drop_nulls(None)
        .group_by_stable([col(transaction_col)])
        .agg([col(item_col).unique_stable().alias("items")])
        .collect()?;

    let lists = grouped.column("items")?.list()?;
    let mut transactions = Vec::with_capacity(lists.len());
    for basket in lists.into_iter() {
        let Some(series) = basket else { continue };
        let mut items: Vec<String> = Vec::new();
        for item in series.utf8()?.into_iter().flatten() {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            // unique_stable already dropped exact duplicates; trimming can
            // re-introduce them, so dedup again on the cleaned value.
            if !items.iter().any(|existing| existing == item) {
                items.push(item.to_string());
            }
        }
        if !items.is_empty() {
            transactions.push(items);
        }
    }

    if transactions.is_empty() {
        anyhow::bail!(
            "no transactions found in {file_path} \
             (check the '{transaction_col}' and '{item_col}' columns)"
        );
    }

    Ok(transactions)
}

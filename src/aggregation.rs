//! Grouped sums and top/bottom-N rankings.

use crate::error::Result;
use crate::schema::{Dimension, Direction, GroupTotal, Metric, Record};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sums `metric` per distinct value of `dimension`.
///
/// Groups come back in first-appearance order. Keys are compared exactly, so
/// `"Acme"` and `"acme "` are different groups.
pub fn group_totals<'a, I>(records: I, dimension: Dimension, metric: Metric) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<GroupTotal> = Vec::new();

    for record in records {
        let key = dimension.key(record);
        let value = metric.value(record);

        match index.get(key) {
            Some(&slot) => totals[slot].total += value,
            None => {
                index.insert(key, totals.len());
                totals.push(GroupTotal {
                    key: key.to_string(),
                    total: value,
                });
            }
        }
    }

    totals
}

/// Returns at most `n` groups ordered by total (descending for [`Direction::Top`],
/// ascending for [`Direction::Bottom`]).
///
/// Equal totals keep their first-appearance order. Fewer than `n` groups yields all
/// of them, and an empty input yields an empty ranking.
pub fn rank<'a, I>(
    records: I,
    dimension: Dimension,
    metric: Metric,
    n: usize,
    direction: Direction,
) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut totals = group_totals(records, dimension, metric);

    // sort_by is stable, which is what keeps ties in first-appearance order
    match direction {
        Direction::Top => totals.sort_by(|a, b| compare_totals(b.total, a.total)),
        Direction::Bottom => totals.sort_by(|a, b| compare_totals(a.total, b.total)),
    }

    totals.truncate(n);
    totals
}

/// [`rank`] with the group-by and metric fields given by column name
/// (`"Product"`, `"Net Sales"`, ...).
pub fn rank_by_field<'a, I>(
    records: I,
    group_by: &str,
    metric: &str,
    n: usize,
    direction: Direction,
) -> Result<Vec<GroupTotal>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let dimension: Dimension = group_by.parse()?;
    let metric: Metric = metric.parse()?;
    Ok(rank(records, dimension, metric, n, direction))
}

fn compare_totals(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesDashboardError;
    use chrono::NaiveDate;

    fn record(product: &str, customer: &str, net_sales: f64) -> Record {
        Record {
            period_raw: "3.2024".to_string(),
            product: product.to_string(),
            customer: customer.to_string(),
            company: "A".to_string(),
            region: "North".to_string(),
            net_sales,
            month: 3,
            year: 2024,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn keys(ranking: &[GroupTotal]) -> Vec<&str> {
        ranking.iter().map(|g| g.key.as_str()).collect()
    }

    #[test]
    fn test_group_totals_sums_in_first_appearance_order() {
        let records = vec![
            record("Y", "C1", 10.0),
            record("X", "C1", 5.0),
            record("Y", "C2", 2.5),
            record("X", "C2", -1.0),
        ];

        let totals = group_totals(&records, Dimension::Product, Metric::NetSales);
        assert_eq!(keys(&totals), vec!["Y", "X"]);
        assert!((totals[0].total - 12.5).abs() < 0.01);
        assert!((totals[1].total - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_top_and_bottom_ordering() {
        let records = vec![
            record("A", "C1", 30.0),
            record("B", "C1", 10.0),
            record("C", "C1", 20.0),
        ];

        let top = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Top);
        assert_eq!(keys(&top), vec!["A", "C", "B"]);

        let bottom = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Bottom);
        assert_eq!(keys(&bottom), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rank_truncates_to_n() {
        let records: Vec<Record> = (0..25)
            .map(|i| record(&format!("P{:02}", i), "C1", i as f64))
            .collect();

        let top = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Top);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].key, "P24");
        assert_eq!(top[9].key, "P15");

        let bottom = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Bottom);
        assert_eq!(bottom.len(), 10);
        assert_eq!(bottom[0].key, "P00");
    }

    #[test]
    fn test_fewer_groups_than_n_returns_all() {
        let records = vec![record("X", "C1", 1.0), record("Y", "C1", 2.0), record("X", "C1", 3.0)];
        let top = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Top);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let records = vec![
            record("B", "C1", 5.0),
            record("A", "C1", 5.0),
            record("C", "C1", 9.0),
            record("D", "C1", 5.0),
        ];

        let top = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Top);
        assert_eq!(keys(&top), vec!["C", "B", "A", "D"]);

        let bottom = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Bottom);
        assert_eq!(keys(&bottom), vec!["B", "A", "D", "C"]);

        for _ in 0..5 {
            let again = rank(&records, Dimension::Product, Metric::NetSales, 10, Direction::Top);
            assert_eq!(again, top);
        }
    }

    #[test]
    fn test_negative_sales_pull_groups_below_zero() {
        let records = vec![
            record("X", "C1", 100.0),
            record("Y", "C1", 20.0),
            record("Y", "C1", -50.0),
        ];

        let bottom = rank(&records, Dimension::Product, Metric::NetSales, 1, Direction::Bottom);
        assert_eq!(bottom[0].key, "Y");
        assert!((bottom[0].total + 30.0).abs() < 0.01);
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let records = vec![record("Acme", "C1", 1.0), record("acme", "C1", 1.0), record("Acme ", "C1", 1.0)];
        let totals = group_totals(&records, Dimension::Product, Metric::NetSales);
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_empty_ranking() {
        let records: Vec<Record> = Vec::new();
        assert!(rank(&records, Dimension::Customer, Metric::NetSales, 10, Direction::Top).is_empty());
        assert!(rank(&records, Dimension::Customer, Metric::NetSales, 10, Direction::Bottom).is_empty());
    }

    #[test]
    fn test_rank_by_field() {
        let records = vec![record("X", "C1", 100.0), record("Y", "C2", 50.0)];

        let customers = rank_by_field(&records, "Customer", "Net Sales", 10, Direction::Top).unwrap();
        assert_eq!(keys(&customers), vec!["C1", "C2"]);

        let err = rank_by_field(&records, "Client", "Net Sales", 10, Direction::Top).unwrap_err();
        assert!(matches!(err, SalesDashboardError::UnknownField(_)));
    }
}

use crate::schema::{Metric, MonthlySeriesPoint, Record, SeriesPoint};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line of a trend chart: a region and its yearly totals, x ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendLine {
    pub region: String,
    pub points: Vec<(i32, f64)>,
}

/// Sums `metric` per (year, region).
///
/// Output is ordered by year ascending; within a year, regions keep the order in
/// which they first appear among that year's records. Line charts drawing one
/// series per region rely on the x-ascending order.
pub fn series_by_year_and_region<'a, I>(records: I, metric: Metric) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index: HashMap<(i32, &'a str), usize> = HashMap::new();
    let mut series: Vec<SeriesPoint> = Vec::new();

    for record in records {
        let key = (record.year, record.region.as_str());
        let value = metric.value(record);

        match index.get(&key) {
            Some(&slot) => series[slot].total += value,
            None => {
                index.insert(key, series.len());
                series.push(SeriesPoint {
                    year: record.year,
                    region: record.region.clone(),
                    total: value,
                });
            }
        }
    }

    series.sort_by_key(|p| p.year);
    series
}

/// Same as [`series_by_year_and_region`] at monthly resolution, keyed by the
/// normalized first-of-month date.
pub fn series_by_month_and_region<'a, I>(records: I, metric: Metric) -> Vec<MonthlySeriesPoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index: HashMap<(NaiveDate, &'a str), usize> = HashMap::new();
    let mut series: Vec<MonthlySeriesPoint> = Vec::new();

    for record in records {
        let key = (record.date, record.region.as_str());
        let value = metric.value(record);

        match index.get(&key) {
            Some(&slot) => series[slot].total += value,
            None => {
                index.insert(key, series.len());
                series.push(MonthlySeriesPoint {
                    date: record.date,
                    region: record.region.clone(),
                    total: value,
                });
            }
        }
    }

    series.sort_by_key(|p| p.date);
    series
}

/// Regroups a year x region series into one line per region, regions in
/// first-appearance order.
pub fn split_by_region(series: &[SeriesPoint]) -> Vec<TrendLine> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut lines: Vec<TrendLine> = Vec::new();

    for point in series {
        let slot = *index.entry(point.region.as_str()).or_insert_with(|| {
            lines.push(TrendLine {
                region: point.region.clone(),
                points: Vec::new(),
            });
            lines.len() - 1
        });
        lines[slot].points.push((point.year, point.total));
    }

    for line in &mut lines {
        line.points.sort_by_key(|(year, _)| *year);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::parse_period;

    fn record(period: &str, region: &str, net_sales: f64) -> Record {
        let parsed = parse_period(period).unwrap();
        Record {
            period_raw: period.to_string(),
            product: "X".to_string(),
            customer: "C1".to_string(),
            company: "A".to_string(),
            region: region.to_string(),
            net_sales,
            month: parsed.month,
            year: parsed.year,
            date: parsed.date,
        }
    }

    #[test]
    fn test_year_region_series_ordering() {
        let records = vec![
            record("1.2024", "South", 10.0),
            record("2.2023", "North", 5.0),
            record("3.2024", "North", 7.0),
            record("4.2023", "East", 1.0),
            record("5.2024", "South", 3.0),
            record("6.2023", "North", 2.0),
        ];

        let series = series_by_year_and_region(&records, Metric::NetSales);
        let flat: Vec<(i32, &str, f64)> = series
            .iter()
            .map(|p| (p.year, p.region.as_str(), p.total))
            .collect();

        assert_eq!(
            flat,
            vec![
                (2023, "North", 7.0),
                (2023, "East", 1.0),
                (2024, "South", 13.0),
                (2024, "North", 7.0),
            ]
        );
    }

    #[test]
    fn test_series_length_matches_distinct_pairs() {
        let records = vec![
            record("1.2022", "A", 1.0),
            record("2.2022", "A", 1.0),
            record("1.2022", "B", 1.0),
            record("1.2023", "A", 1.0),
        ];
        let series = series_by_year_and_region(&records, Metric::NetSales);
        assert_eq!(series.len(), 3);
        assert!(series.windows(2).all(|w| w[0].year <= w[1].year));
    }

    #[test]
    fn test_empty_series() {
        let records: Vec<Record> = Vec::new();
        assert!(series_by_year_and_region(&records, Metric::NetSales).is_empty());
        assert!(split_by_region(&[]).is_empty());
    }

    #[test]
    fn test_monthly_series() {
        let records = vec![
            record("2.2024", "North", 4.0),
            record("1.2024", "North", 1.0),
            record("02.2024", "North", 6.0),
        ];
        let series = series_by_month_and_region(&records, Metric::NetSales);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!((series[1].total - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_split_by_region() {
        let records = vec![
            record("1.2023", "North", 1.0),
            record("1.2023", "South", 2.0),
            record("1.2024", "South", 3.0),
            record("1.2024", "North", 4.0),
        ];
        let series = series_by_year_and_region(&records, Metric::NetSales);
        let lines = split_by_region(&series);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].region, "North");
        assert_eq!(lines[0].points, vec![(2023, 1.0), (2024, 4.0)]);
        assert_eq!(lines[1].region, "South");
        assert_eq!(lines[1].points, vec![(2023, 2.0), (2024, 3.0)]);
    }
}

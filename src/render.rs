use crate::dispatcher::{ChartData, ViewModel, ViewModelBundle};
use crate::error::Result;
use csv::WriterBuilder;

impl ViewModelBundle {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Flattens every chart into `chart,title,company,series,label,value` rows.
    /// Placeholders contribute no rows.
    pub fn to_csv(&self) -> Result<String> {
        let mut wtr = WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(["chart", "title", "company", "series", "label", "value"])?;

        for vm in self.iter() {
            let company = vm.company.as_deref().unwrap_or("");
            match &vm.data {
                ChartData::Bar { bars } => {
                    for bar in bars {
                        let value = format!("{:.2}", bar.total);
                        wtr.write_record([
                            vm.id.as_str(),
                            vm.title.as_str(),
                            company,
                            "",
                            bar.key.as_str(),
                            value.as_str(),
                        ])?;
                    }
                }
                ChartData::Line { points } => {
                    for point in points {
                        let year = point.year.to_string();
                        let value = format!("{:.2}", point.total);
                        wtr.write_record([
                            vm.id.as_str(),
                            vm.title.as_str(),
                            company,
                            point.region.as_str(),
                            year.as_str(),
                            value.as_str(),
                        ])?;
                    }
                }
                ChartData::Placeholder => {}
            }
        }

        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Sales Dashboard\n\n");
        output.push_str("## General Sales Analysis\n\n");
        for vm in &self.global_rankings {
            push_chart(&mut output, vm);
        }

        output.push_str("## Sales Evolution by Region\n\n");
        push_chart(&mut output, &self.sales_evolution);

        output.push_str("## Company-Specific Analysis\n\n");
        for vm in &self.company_rankings {
            push_chart(&mut output, vm);
        }

        output
    }
}

fn push_chart(output: &mut String, vm: &ViewModel) {
    match &vm.company {
        Some(company) => output.push_str(&format!("### {} - {}\n\n", vm.title, company)),
        None => output.push_str(&format!("### {}\n\n", vm.title)),
    }

    if let Some(notice) = &vm.notice {
        output.push_str(&format!("> {}\n\n", notice));
    }

    match &vm.data {
        ChartData::Placeholder => {}
        ChartData::Bar { bars } if bars.is_empty() => output.push_str("_No data_\n\n"),
        ChartData::Bar { bars } => {
            output.push_str("| # | Label | Net Sales |\n|---|---|---:|\n");
            for (idx, bar) in bars.iter().enumerate() {
                output.push_str(&format!("| {} | {} | {:.2} |\n", idx + 1, bar.key, bar.total));
            }
            output.push('\n');
        }
        ChartData::Line { points } if points.is_empty() => output.push_str("_No data_\n\n"),
        ChartData::Line { points } => {
            output.push_str("| Year | Region | Net Sales |\n|---|---|---:|\n");
            for point in points {
                output.push_str(&format!(
                    "| {} | {} | {:.2} |\n",
                    point.year, point.region, point.total
                ));
            }
            output.push('\n');
        }
    }
}

//! CSV export and display helpers for projection output

use csv::Writer;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AnalysisResult;
use crate::projection::ProjectionResult;
use crate::sales::SaleHorizonRow;

/// Write any slice of serializable rows as CSV with a header line
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> AnalysisResult<()> {
    let mut csv = Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Flat sale-table record; one line per year
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaleHorizonRecord {
    year: u32,
    sale_price_primary: f64,
    commission_primary: f64,
    taxable_basis_primary: f64,
    taxes_primary: f64,
    net_primary: f64,
    sale_price_ocean_as_is: f64,
    commission_ocean_as_is: f64,
    taxable_basis_ocean_as_is: f64,
    taxes_ocean_as_is: f64,
    net_ocean_as_is: f64,
    sale_price_ocean_renovated: f64,
    commission_ocean_renovated: f64,
    taxable_basis_ocean_renovated: f64,
    taxes_ocean_renovated: f64,
    net_ocean_renovated: f64,
}

impl From<&SaleHorizonRow> for SaleHorizonRecord {
    fn from(row: &SaleHorizonRow) -> Self {
        Self {
            year: row.year,
            sale_price_primary: row.primary.sale_price,
            commission_primary: row.primary.commission,
            taxable_basis_primary: row.primary.taxable_basis,
            taxes_primary: row.primary.taxes,
            net_primary: row.primary.net_proceeds,
            sale_price_ocean_as_is: row.ocean_as_is.sale_price,
            commission_ocean_as_is: row.ocean_as_is.commission,
            taxable_basis_ocean_as_is: row.ocean_as_is.taxable_basis,
            taxes_ocean_as_is: row.ocean_as_is.taxes,
            net_ocean_as_is: row.ocean_as_is.net_proceeds,
            sale_price_ocean_renovated: row.ocean_renovated.sale_price,
            commission_ocean_renovated: row.ocean_renovated.commission,
            taxable_basis_ocean_renovated: row.ocean_renovated.taxable_basis,
            taxes_ocean_renovated: row.ocean_renovated.taxes,
            net_ocean_renovated: row.ocean_renovated.net_proceeds,
        }
    }
}

/// Write the sale table as CSV
pub fn write_sale_horizon<W: Write>(writer: W, rows: &[SaleHorizonRow]) -> AnalysisResult<()> {
    let records: Vec<SaleHorizonRecord> = rows.iter().map(SaleHorizonRecord::from).collect();
    write_rows(writer, &records)
}

/// Write every table of a projection into `dir`, returning the files written
pub fn write_projection_csvs(dir: &Path, result: &ProjectionResult) -> AnalysisResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let files = [
        dir.join("option1_sell.csv"),
        dir.join("option2_rent.csv"),
        dir.join("option3_renovate.csv"),
        dir.join("sale_breakdown.csv"),
    ];

    write_rows(File::create(&files[0])?, &result.breakdown.option1)?;
    write_rows(File::create(&files[1])?, &result.breakdown.option2)?;
    write_rows(File::create(&files[2])?, &result.breakdown.option3)?;
    write_rows(File::create(&files[3])?, &[result.sale_breakdown])?;

    log::info!("Wrote {} CSV files to {}", files.len(), dir.display());
    Ok(files.to_vec())
}

/// Series entry for display; missing years read as 0
pub fn value_at(series: &[f64], index: usize) -> f64 {
    series.get(index).copied().unwrap_or(0.0)
}

/// Whole dollars with thousands separators, e.g. `-$1,234,568`
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::SaleBreakdown;
    use crate::sales::{sale_horizon, SaleHorizonOcean, SaleHorizonPrimary};

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(5_695_850.0), "$5,695,850");
        assert_eq!(format_currency(-317_705.52), "-$317,706");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn test_value_at_missing_is_zero() {
        let series = [1.0, 2.0];
        assert_eq!(value_at(&series, 1), 2.0);
        assert_eq!(value_at(&series, 5), 0.0);
    }

    #[test]
    fn test_write_rows_header_and_values() {
        let sale = SaleBreakdown::calculate(8_500_000.0, 8_500_000.0, 37.1);
        let mut buf = Vec::new();
        write_rows(&mut buf, &[sale]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "saleValue,commission,netSaleProceeds,taxBasis,capitalGains,capitalGainsTax,afterTaxProceeds"
        );
        assert!(lines.next().unwrap().starts_with("8500000.0,510000.0,7990000.0"));
    }

    #[test]
    fn test_write_projection_csvs_to_dir() {
        let result = crate::projection::project(
            &Default::default(),
            &Default::default(),
            &Default::default(),
        )
        .unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("tables");

        let files = write_projection_csvs(&out, &result).unwrap();
        assert_eq!(files.len(), 4);

        let option3 = fs::read_to_string(out.join("option3_renovate.csv")).unwrap();
        // Header plus one line per projected year
        assert_eq!(option3.lines().count(), 6);
        assert!(option3.starts_with("year,rentalIncome,propertyManagementFee"));

        let sale = fs::read_to_string(out.join("sale_breakdown.csv")).unwrap();
        assert_eq!(sale.lines().count(), 2);
        for file in &files {
            assert!(file.exists());
        }
    }

    #[test]
    fn test_write_sale_horizon_one_line_per_year() {
        let rows = sale_horizon(&SaleHorizonPrimary::default(), &SaleHorizonOcean::default(), 37.1, 3).unwrap();
        let mut buf = Vec::new();
        write_sale_horizon(&mut buf, &rows).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("year,salePricePrimary,commissionPrimary"));
    }
}

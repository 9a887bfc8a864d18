//! Property Analyzer CLI
//!
//! Runs the strategy projection, the sale table or an assumption sweep.
//! Inputs come from an optional JSON document plus an optional
//! `entity,field,value` override CSV. Supports JSON output via --json.
//! Accepts assumption overrides via environment variables:
//!   ANALYSIS_YEARS, INVESTMENT_RETURN_RATE, INFLATION_RATE,
//!   CAPITAL_GAINS_TAX_RATE, PROPERTY_TAX_RATE

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::{self, File};
use std::path::PathBuf;

use property_analyzer::property::{load_inputs, load_overrides, AssumptionField};
use property_analyzer::report::{format_currency, value_at, write_projection_csvs, write_sale_horizon};
use property_analyzer::{
    AnalysisInputs, FinancialAssumptions, ProjectionEngine, ProjectionResult, Recommendation,
    SaleHorizonEngine, SaleHorizonRow, ScenarioRunner,
};

#[derive(Parser, Debug)]
#[command(
    name = "property_analyzer",
    about = "Sell / rent / renovate projections for a primary residence and an ocean-view property"
)]
struct Cli {
    #[arg(long, global = true, help = "JSON input document; omitted fields use defaults")]
    input: Option<PathBuf>,
    #[arg(long, global = true, help = "CSV of entity,field,value overrides applied in order")]
    overrides: Option<PathBuf>,
    #[arg(long, global = true, help = "Analysis horizon in years")]
    years: Option<u32>,
    #[arg(long, global = true, help = "Print JSON instead of tables")]
    json: bool,
    #[arg(long, global = true, help = "Directory to write CSV tables into")]
    csv_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project all three strategies and recommend one
    Project,
    /// Year-by-year sale proceeds for each property
    Sales {
        #[arg(long, help = "Capital gains rate in percent; defaults to the assumption set")]
        capital_gains_rate: Option<f64>,
    },
    /// Re-run the projection for several values of one assumption
    Sweep {
        #[arg(long, value_parser = parse_assumption_field, help = "Assumption key, e.g. investmentReturnRate")]
        field: AssumptionField,
        #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
        values: Vec<f64>,
    },
}

fn parse_assumption_field(s: &str) -> Result<AssumptionField, String> {
    s.parse().map_err(|e: property_analyzer::AnalysisError| e.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse<'a> {
    inputs: &'a AnalysisInputs,
    result: &'a ProjectionResult,
    recommendation: Recommendation,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = build_inputs(&cli)?;

    match &cli.command {
        Command::Project => run_project(&cli, &inputs),
        Command::Sales { capital_gains_rate } => run_sales(&cli, &inputs, *capital_gains_rate),
        Command::Sweep { field, values } => run_sweep(&cli, inputs, *field, values),
    }
}

/// File inputs, then override CSV, then environment, then --years
fn build_inputs(cli: &Cli) -> Result<AnalysisInputs> {
    let mut inputs = match &cli.input {
        Some(path) => load_inputs(path).with_context(|| format!("loading inputs from {}", path.display()))?,
        None => AnalysisInputs::default(),
    };
    if let Some(path) = &cli.overrides {
        inputs = load_overrides(path, inputs)
            .with_context(|| format!("applying overrides from {}", path.display()))?;
    }

    inputs.assumptions = inputs.assumptions.with_env_overrides();
    if let Some(years) = cli.years {
        inputs.assumptions.analysis_timeframe_years = years;
    }

    inputs.validate().context("validating inputs")?;
    Ok(inputs)
}

fn run_project(cli: &Cli, inputs: &AnalysisInputs) -> Result<()> {
    let engine = ProjectionEngine::new(inputs.assumptions.clone());
    let result = engine.project(&inputs.primary, &inputs.ocean)?;
    let recommendation = result.recommendation()?;

    if let Some(dir) = &cli.csv_dir {
        write_projection_csvs(dir, &result).with_context(|| format!("writing CSV to {}", dir.display()))?;
    }

    if cli.json {
        let response = ProjectionResponse {
            inputs,
            result: &result,
            recommendation,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_projection(&result, engine.assumptions());
    println!();
    println!(
        "Recommended: {} ({} cumulative return after {} years, NPV {})",
        recommendation.name,
        format_currency(recommendation.cumulative_return),
        result.years,
        format_currency(result.get(recommendation.strategy).npv)
    );
    Ok(())
}

fn print_projection(result: &ProjectionResult, assumptions: &FinancialAssumptions) {
    println!(
        "Projection over {} years (return {}%, inflation {}%, capital gains {}%)",
        result.years,
        assumptions.investment_return_rate,
        assumptions.inflation_rate,
        assumptions.capital_gains_tax_rate
    );

    for projection in result.strategies() {
        println!();
        println!("{}  (initial {}, NPV {})",
            projection.name,
            format_currency(projection.initial_investment),
            format_currency(projection.npv)
        );
        println!("{:>4} {:>16} {:>16} {:>18}", "Year", "Cashflow", "Property", "Cumulative");
        println!("{}", "-".repeat(57));
        for i in 0..result.years as usize {
            println!(
                "{:>4} {:>16} {:>16} {:>18}",
                i + 1,
                format_currency(value_at(&projection.net_cashflow, i)),
                format_currency(value_at(&projection.property_values, i)),
                format_currency(value_at(&projection.cumulative_return, i)),
            );
        }
    }

    let sale = &result.sale_breakdown;
    println!();
    println!(
        "Ocean view sale: {} less {} commission, {} tax -> {} after tax",
        format_currency(sale.sale_value),
        format_currency(sale.commission),
        format_currency(sale.capital_gains_tax),
        format_currency(sale.after_tax_proceeds)
    );
}

/// Sale table from the `sales` section of the inputs
fn run_sales(cli: &Cli, inputs: &AnalysisInputs, capital_gains_rate: Option<f64>) -> Result<()> {
    let rate = capital_gains_rate.unwrap_or(inputs.assumptions.capital_gains_tax_rate);
    let rows = SaleHorizonEngine::new(rate, inputs.assumptions.analysis_timeframe_years)
        .project(&inputs.sales.primary, &inputs.sales.ocean)?;

    if let Some(dir) = &cli.csv_dir {
        fs::create_dir_all(dir)?;
        let path = dir.join("sale_horizon.csv");
        write_sale_horizon(File::create(&path)?, &rows)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print_sales(&rows, rate);
    Ok(())
}

fn print_sales(rows: &[SaleHorizonRow], rate: f64) {
    println!("Net sale proceeds after 6% commission and {}% capital gains", rate);
    println!("{:>4} {:>16} {:>16} {:>16}", "Year", "Primary", "Ocean as-is", "Ocean renovated");
    println!("{}", "-".repeat(55));
    for row in rows {
        println!(
            "{:>4} {:>16} {:>16} {:>16}",
            row.year,
            format_currency(row.primary.net_proceeds),
            format_currency(row.ocean_as_is.net_proceeds),
            format_currency(row.ocean_renovated.net_proceeds),
        );
    }
}

fn run_sweep(cli: &Cli, inputs: AnalysisInputs, field: AssumptionField, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        bail!("sweep needs at least one value");
    }
    let runner = ScenarioRunner::new(inputs);
    let points = runner.sweep(field, values)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("Sweep of {}", field);
    println!(
        "{:>10} {:>18} {:>18} {:>18}  {}",
        "Value", "Option 1", "Option 2", "Option 3", "Recommended"
    );
    println!("{}", "-".repeat(100));
    for point in &points {
        let [o1, o2, o3] = point.final_cumulative_returns;
        println!(
            "{:>10} {:>18} {:>18} {:>18}  {}",
            point.value,
            format_currency(o1),
            format_currency(o2),
            format_currency(o3),
            point.recommendation.name
        );
    }
    Ok(())
}

use fish_forecast::{
    ForecastConfig, ForecastEngine, PeriodKey, ProductionLevel, ProductionProjection,
    ProductionSeries, RevenueLevel,
};
use harvest_math::{estimate, HarvestInput, PlantingRating, RackLayout, YieldRating};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::Path;
use std::{env, fs, process};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One row of recorded production as entered by the user
#[derive(Debug, Deserialize)]
struct Observation {
    month: String,
    year: i32,
    production_kg: f64,
}

#[derive(Debug, Deserialize)]
struct HarvestSection {
    #[serde(default)]
    layout: RackLayout,
    input: HarvestInput,
}

/// Everything a report needs, read from one JSON file
#[derive(Debug, Deserialize)]
struct Session {
    observations: Vec<Observation>,
    horizon: usize,
    unit_price: f64,
    #[serde(default)]
    config: Option<ForecastConfig>,
    #[serde(default)]
    harvest: Option<HarvestSection>,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fish_forecast=info,forecast_report=info".into()),
        )
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: forecast_report <session.json>");
        process::exit(2);
    };

    match run(Path::new(&path)) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Build the report for a session file
fn run(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let session: Session = serde_json::from_str(&fs::read_to_string(path)?)?;
    let engine = ForecastEngine::new(session.config.unwrap_or_default())?;

    let mut report = String::new();
    let mut series = ProductionSeries::new();

    writeln!(report, "== Fish production forecast ==")?;
    for row in &session.observations {
        let added = PeriodKey::parse(&row.month, row.year)
            .and_then(|period| series.append(period, row.production_kg));
        if let Err(e) = added {
            warn!(month = %row.month, year = row.year, "observation rejected");
            writeln!(report, "rejected {} {}: {}", row.month, row.year, e)?;
        }
    }

    writeln!(report)?;
    writeln!(report, "Historical production")?;
    for point in series.ordered_snapshot() {
        writeln!(report, "  {:<10}{:>10.2} kg", point.period, point.production_kg)?;
    }

    match engine.project(&series, session.horizon, session.unit_price) {
        Ok(projection) => write_projection(&mut report, &projection)?,
        Err(e) => writeln!(report, "\nforecast unavailable: {}", e)?,
    }

    if let Some(harvest) = &session.harvest {
        write_harvest(&mut report, harvest)?;
    }

    Ok(report)
}

fn write_projection(report: &mut String, projection: &ProductionProjection) -> std::fmt::Result {
    let forecast = &projection.forecast;

    writeln!(report)?;
    writeln!(report, "Forecast ({}, {} months)", forecast.model(), forecast.horizon())?;
    for point in forecast.points() {
        writeln!(report, "  {:<10}{:>10.2} kg", point.period, point.production_kg)?;
    }

    writeln!(report)?;
    writeln!(report, "First forecast month")?;
    writeln!(report, "  feed required:     {:.2} kg", projection.metrics.feed_kg)?;
    writeln!(report, "  estimated revenue: {:.0}", projection.metrics.revenue)?;

    let production_note = match projection.outlook.production {
        ProductionLevel::Low => "low production, review rearing and feeding",
        ProductionLevel::Stable => "stable production, continue current rearing",
        ProductionLevel::High => "high production, prepare feed stock and sales",
    };
    let revenue_note = match projection.outlook.revenue {
        RevenueLevel::Low => "low revenue, review sale price and production costs",
        RevenueLevel::Good => "revenue on track",
    };
    writeln!(report, "  outlook: {}; {}", production_note, revenue_note)
}

fn write_harvest(
    report: &mut String,
    harvest: &HarvestSection,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(report)?;
    writeln!(report, "== Harvest estimate ==")?;

    let result = match estimate(&harvest.layout, &harvest.input) {
        Ok(result) => result,
        Err(e) => {
            writeln!(report, "estimate unavailable: {}", e)?;
            return Ok(());
        }
    };

    writeln!(report, "  harvest:            {:.2} kg", result.harvest_kg)?;
    writeln!(report, "  feed required:      {:.2} kg", result.feed_kg)?;
    writeln!(report, "  rearing period:     {} days", result.rearing_days)?;
    writeln!(
        report,
        "  start-up cost:      {:.0} (fingerlings {:.0}, plants {:.0})",
        result.total_cost, result.fingerling_cost, result.plant_cost
    )?;
    writeln!(report, "  yield per litre:    {:.4} kg/l", result.yield_per_litre)?;
    writeln!(
        report,
        "  planting capacity:  {:.2}%",
        result.planting_efficiency * 100.0
    )?;

    if result.yield_rating() == YieldRating::Low {
        writeln!(report, "  yield per litre is low, review stocking density or feed")?;
    }
    if result.planting_rating() == PlantingRating::BelowCapacity {
        writeln!(report, "  planting is below capacity, more plants would use more nutrients")?;
    }

    Ok(())
}

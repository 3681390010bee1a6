use fish_forecast::{ForecastEngine, PeriodKey, ProductionSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fourteen months of catfish harvests, entered out of order
    let records = [
        ("March", 2024, 11.0),
        ("January", 2024, 10.0),
        ("February", 2024, 12.0),
        ("April", 2024, 13.5),
        ("May", 2024, 15.0),
        ("June", 2024, 16.5),
        ("July", 2024, 16.0),
        ("August", 2024, 14.5),
        ("September", 2024, 13.0),
        ("October", 2024, 12.0),
        ("November", 2024, 11.5),
        ("December", 2024, 11.0),
        ("January", 2025, 12.0),
        ("February", 2025, 13.5),
    ];

    let mut series = ProductionSeries::new();
    for (month, year, kg) in records {
        series.append(PeriodKey::parse(month, year)?, kg)?;
    }
    println!("Loaded {} months of production", series.size());

    let engine = ForecastEngine::default();
    let projection = engine.project(&series, 6, 20_000.0)?;

    println!("Forecast using {}:", projection.forecast.model());
    for point in projection.forecast.points() {
        println!("{}: {:.2} kg", point.period, point.production_kg);
    }

    println!("Feed for the first month: {:.2} kg", projection.metrics.feed_kg);
    println!("Revenue for the first month: {:.0}", projection.metrics.revenue);
    println!("Outlook: {:?}", projection.outlook);

    Ok(())
}

use std::path::Path;

pub fn run(input: &Path, fill_gaps: bool, output: &str) -> anyhow::Result<()> {
    let buckets = growth_series::load_timestamps(input)?;
    let series = buckets.into_series(fill_gaps)?;

    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&series)?),
        "csv" => {
            println!("period,count");
            for o in series.iter() {
                println!("{},{}", o.period, o.count);
            }
        }
        other => anyhow::bail!("unknown output format: {other} (expected csv or json)"),
    }
    Ok(())
}

use std::path::Path;

use growth_core::GrowthConfig;

pub fn run(path: &Path, input: &str, force: bool) -> anyhow::Result<()> {
    let output = path.join("growth.toml");
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let config = GrowthConfig::scaffold(input);
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

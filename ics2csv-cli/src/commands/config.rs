use anyhow::Result;
use ics2csv_core::Ics2CsvConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = Ics2CsvConfig::config_path()?;
    let config = Ics2CsvConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Effective settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    if let Err(e) = config.timezone() {
        println!("\n{}", e.to_string().red());
    }

    Ok(())
}

use anyhow::Result;
use owo_colors::OwoColorize;
use tripcal_core::config::TripcalConfig;

pub fn init(force: bool) -> Result<()> {
    let path = TripcalConfig::config_path()?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\n\
            Use --force to overwrite it",
            path.display()
        );
    }

    TripcalConfig::create_default_config(&path)?;
    println!("{} {}", "Created".green(), path.display());

    Ok(())
}

pub fn path() -> Result<()> {
    let config_path = TripcalConfig::config_path()?;
    let config = TripcalConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Output:     {}", config.output_path().display());
    println!();
    println!("{}", "Service".bold());
    println!("  Provider:   {:?}", config.provider);
    println!("  Model:      {}", config.model);
    let api_key = if config.api_key.is_some() {
        "set".green().to_string()
    } else {
        "missing".red().to_string()
    };
    println!("  API key:    {}", api_key);

    Ok(())
}

use anyhow::{Context, Result};

use crate::app::App;

pub fn show(app: &App) -> Result<()> {
    let text = toml::to_string_pretty(&app.config).context("Failed to render configuration")?;
    println!("# {}", app.config_file.display());
    print!("{}", text);
    Ok(())
}

pub fn init(app: &App) -> Result<()> {
    if app.config_file.exists() {
        println!("Configuration already exists at {}", app.config_file.display());
        return Ok(());
    }
    app.config_service.save_config(&app.config)?;
    println!("Wrote {}", app.config_file.display());
    Ok(())
}

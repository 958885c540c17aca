use std::sync::Arc;

use anyhow::{Result, bail};
use reverie_application::CustomThemeService;
use reverie_core::theme::{Theme, ThemeSource};
use reverie_interaction::DryrunStudio;

use crate::app::App;

fn source_label(theme: &Theme) -> &'static str {
    match theme.source {
        ThemeSource::BuiltIn => "built-in",
        ThemeSource::Secret => "secret",
        ThemeSource::Custom => "custom",
    }
}

pub fn list(app: &App) {
    for theme in app.registry.all_themes() {
        let marker = if app.registry.is_favorite(&theme.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<24} {:<28} {}",
            marker,
            theme.id,
            theme.display_name,
            source_label(&theme)
        );
    }
}

pub async fn favorite(app: &App, id: &str) -> Result<()> {
    if !app.registry.contains(id) {
        bail!("Unknown theme: {}", id);
    }
    if app.registry.toggle_favorite(id).await {
        println!("Added {} to favorites", id);
    } else {
        println!("Removed {} from favorites", id);
    }
    Ok(())
}

pub async fn unlock(app: &App, code: &str) -> Result<()> {
    match app.registry.unlock_with_code(code).await {
        Some(theme) => {
            println!("Unlocked {} ({})", theme.display_name, theme.id);
            Ok(())
        }
        None => bail!("That code doesn't unlock anything"),
    }
}

pub async fn create(app: &App, prompt: &str) -> Result<()> {
    let service = CustomThemeService::new(app.registry.clone(), Arc::new(DryrunStudio::new()));
    match service.create_theme(prompt).await? {
        Some(theme) => println!("Created {} ({})", theme.display_name, theme.id),
        None => println!("No theme could be designed from that description"),
    }
    Ok(())
}

use anyhow::Result;
use reverie_core::preference::PreferenceRepository;
use reverie_core::session::ReflectionMode;

use crate::app::App;

pub async fn run(app: &App, mode: Option<ReflectionMode>) -> Result<()> {
    match mode {
        Some(mode) => {
            app.preferences.set_reflection_mode(mode).await?;
            println!("Reflection mode set to {}", mode);
        }
        None => println!("{}", app.preferences.get_reflection_mode().await),
    }
    Ok(())
}

use std::path::Path;

use anyhow::Result;

use gridscroll_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, normalized: bool, write: bool) -> Result<()> {
    let mut config = config.clone();
    if normalized {
        config.scroll = config.scroll.normalized();
    }

    if write {
        config.save(path)?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };
    println!("# gridscroll configuration ({})", source);
    print!("{}", config.to_toml()?);
    Ok(())
}

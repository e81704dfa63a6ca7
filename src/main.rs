use std::path::PathBuf;

use vitrine::{ShowcaseConfig, VitrineApp};

/// `vitrine [MODEL.obj] [#RRGGBB]`
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let mut config = ShowcaseConfig::default();
    if let Some(path) = args.next() {
        config = config.with_model_path(PathBuf::from(path));
    }
    if let Some(background) = args.next() {
        config = config.with_background_hex(&background.to_string_lossy())?;
    }

    VitrineApp::new(config)?.run()?;
    Ok(())
}

mod bootstrap;

use std::io;

use anyhow::Result;
use chirp_core::settings::Settings;
use chirp_data::events::TracingListener;
use chirp_data::Feed;
use chirp_shell::app::App;
use chirp_shell::render::{render_recent, render_stats};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Chirp v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(view = %settings.view, recent = settings.recent, "settings resolved");

    let storage = bootstrap::open_storage(&settings)?;
    let feed = Feed::builder(storage).with_listener(TracingListener).build();
    let recent = settings.recent as usize;

    match settings.view.as_str() {
        "menu" => {
            let app = App::new(feed, recent);
            let mut input = io::stdin().lock();
            let mut out = io::stdout().lock();
            app.run(&mut input, &mut out)?;
        }

        "stats" => {
            print!("{}", render_stats(&feed.stats()?));
        }

        "recent" => {
            print!("{}", render_recent(&feed.list_recent(recent)?));
        }

        unknown => {
            eprintln!("Unknown view: {}", unknown);
        }
    }

    Ok(())
}

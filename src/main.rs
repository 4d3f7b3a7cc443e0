// Entry point for the console Minesweeper
// Loads settings, sets up logging and hands stdin/stdout to the console loop

use std::error::Error;
use std::io;

use tracing::{info, warn};
use xtsweep::swp_console::Console;
use xtsweep::swp_settings::{load_or_create, settings_path};
use xtsweep::{GameSession, swp_log};

fn main() -> Result<(), Box<dyn Error>> {
    // Load or create user settings (difficulty, records, log level)
    let settings = swp_log::during_startup(load_or_create);

    swp_log::init(swp_log::resolve_level(&settings.log_level));

    let (config, adjustments) = settings.board_config();
    for a in &adjustments {
        info!("{}", a);
    }
    info!(difficulty = config.difficulty().name(), "starting");

    let session = GameSession::new(config);
    let stdin = io::stdin();
    let mut console = Console::new(session, settings, stdin.lock(), io::stdout());
    if let Some(path) = settings_path() {
        console = console.persist_to(path);
    }
    console.run()?;

    // Last difficulty choice and records, whatever the console already wrote
    if let Err(e) = console.settings().save() {
        warn!("could not save settings: {}", e);
    }
    Ok(())
}

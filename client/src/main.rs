mod driver;
mod error;
mod settings;

use std::io;
use std::time::Duration;

use clap::Parser;

use crate::driver::{Controller, Session, SessionOptions};
use crate::error::ClientError;
use crate::settings::Settings;

fn main() -> Result<(), ClientError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::parse();
    let config = settings.agent_config()?;
    let x = Controller::new(settings.x, config, settings.seed);
    let o = Controller::new(settings.o, config, settings.seed.map(|s| s.wrapping_add(1)));
    let options = SessionOptions {
        delay: Duration::from_millis(settings.delay_ms),
        random_start: settings.random_start,
        learn: settings.learn,
        seed: settings.seed.map(|s| s.wrapping_add(2)),
    };

    let mut session = Session::new(x, o, io::stdin().lock(), io::stdout(), options);
    let tally = session.play(settings.games)?;
    if settings.games > 1 {
        println!("{}", tally);
    }
    Ok(())
}

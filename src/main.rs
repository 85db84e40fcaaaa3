//! Brickbat entry point
//!
//! Usage: `brickbat [settings.json] [--seed N] [--mute]`. Logging is
//! controlled by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use brickbat::audio::{AudioSink, Bell, Silent};
use brickbat::input::InputController;
use brickbat::platform::{InputSource, Presenter, TerminalInput, TerminalPresenter};
use brickbat::renderer::FrameBuilder;
use brickbat::sim::{GameState, Tuning};
use brickbat::{Exit, Runner, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "A bat-and-ball brick breaker for the terminal")]
struct Args {
    /// Settings JSON file (defaults are used when absent)
    settings: Option<PathBuf>,

    /// RNG seed, overriding the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// no bell on bounces
    #[arg(long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings =
        Settings::load(args.settings.as_deref()).context("failed to load settings")?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.mute {
        settings.sound = false;
    }
    let seed = settings.run_seed();
    log::info!("Brickbat starting (seed {})", seed);

    let background = settings.assets.background(settings.background_fill);
    let frames = FrameBuilder::new(background, settings.assets.splash());

    let presenter =
        TerminalPresenter::new(settings.playfield()).context("failed to set up the terminal")?;
    let input = TerminalInput::new().context("failed to set up keyboard input")?;

    // Without release events a held key would repeat forever
    let repeat = if input.reports_releases() {
        settings.key_repeat
    } else {
        None
    };
    let controller = InputController::new(repeat, settings.tick_rate);

    let state = GameState::new(
        Tuning::from(&settings),
        presenter.surface_size(),
        seed,
        settings.splash_ticks(),
    );

    let audio: Box<dyn AudioSink> = if settings.sound {
        Box::new(Bell::new(std::io::stdout(), false))
    } else {
        Box::new(Silent)
    };

    let mut runner = Runner::new(
        state,
        controller,
        frames,
        presenter,
        input,
        audio,
        settings.tick_rate,
    );
    let Exit::Quit = runner.run().context("game loop failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_settings_path_is_optional() {
        let args = Args::try_parse_from(["brickbat"]).unwrap();
        assert_eq!(args.settings, None);
        assert_eq!(args.seed, None);
        assert!(!args.mute);
    }

    #[test]
    fn test_args_parse_path_and_flags() {
        let args =
            Args::try_parse_from(["brickbat", "game.json", "--seed", "7", "--mute"]).unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("game.json")));
        assert_eq!(args.seed, Some(7));
        assert!(args.mute);
    }

    #[test]
    fn test_args_reject_unknown_flags() {
        assert!(Args::try_parse_from(["brickbat", "--fast"]).is_err());
    }
}

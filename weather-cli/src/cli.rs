use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode};
use ir_weather_core::{
    Config, Coordinates, LocationProvider, OpenWeatherProvider, PermissionStatus, PipelineHandle,
    ScreenState, WeatherProvider,
    location::{Consent, FixedLocation, IpLocation, StaticAnswer},
    view,
};

use crate::{
    logging,
    prompt::{self, InquirePrompt},
    ui,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "ir-weather", version, about = "Current weather for your location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default location.
    Configure,

    /// Show current weather (the default).
    Show(ShowArgs),

    /// Print where the config file lives.
    ConfigPath,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Latitude to use instead of looking the position up.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to use instead of looking the position up.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Print the result once instead of opening the full-screen view.
    #[arg(long)]
    pub plain: bool,

    /// Allow location access without asking.
    #[arg(short, long)]
    pub yes: bool,
}

impl ShowArgs {
    fn coordinates(&self) -> anyhow::Result<Option<Coordinates>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                let coords = Coordinates::new(lat, lon);
                if !coords.is_valid() {
                    bail!("Coordinates out of range: {coords}");
                }
                Ok(Some(coords))
            }
            _ => Ok(None),
        }
    }
}

impl Cli {
    pub fn is_full_screen(&self) -> bool {
        match &self.command {
            None => true,
            Some(Command::Show(args)) => !args.plain,
            Some(_) => false,
        }
    }

    pub async fn run(self) -> anyhow::Result<ExitCode> {
        logging::init_tracing(self.is_full_screen());

        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show(args)) => show(args).await,
            None => show(ShowArgs::default()).await,
        }
    }
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let fixed = Confirm::new("Use a fixed location instead of looking it up each time?")
        .with_default(config.location.is_some())
        .prompt()?;

    let location = if fixed {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number")
            .prompt()?;

        let coords = Coordinates::new(latitude, longitude);
        if !coords.is_valid() {
            bail!("Coordinates out of range: {coords}");
        }
        Some(coords)
    } else {
        None
    };
    config.set_fixed_location(location);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

async fn show(args: ShowArgs) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    // Fail before any prompt or request when there is no key.
    let weather: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherProvider::from_config(&config)?);

    let fixed = args.coordinates()?.or_else(|| config.fixed_location());

    let state = if args.plain {
        let location: Arc<dyn LocationProvider> = match fixed {
            Some(coords) => Arc::new(FixedLocation::new(coords)),
            None if args.yes => Arc::new(Consent::new(
                IpLocation::new(config.timeout())?,
                StaticAnswer(PermissionStatus::Granted),
            )),
            None => Arc::new(Consent::new(IpLocation::new(config.timeout())?, InquirePrompt)),
        };
        run_plain(location, weather).await
    } else {
        let (screen_prompt, requests) = prompt::screen_prompt();
        let location: Arc<dyn LocationProvider> = match fixed {
            Some(coords) => Arc::new(FixedLocation::new(coords)),
            None if args.yes => Arc::new(Consent::new(
                IpLocation::new(config.timeout())?,
                StaticAnswer(PermissionStatus::Granted),
            )),
            None => Arc::new(Consent::new(IpLocation::new(config.timeout())?, screen_prompt)),
        };
        ui::run(location, weather, requests).await?
    };

    Ok(match state {
        ScreenState::PermissionDenied | ScreenState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn run_plain(
    location: Arc<dyn LocationProvider>,
    weather: Arc<dyn WeatherProvider>,
) -> ScreenState {
    let mut pipeline = PipelineHandle::spawn(location, weather);
    let mut state = ScreenState::default();

    while let Some(event) = pipeline.events.recv().await {
        state.apply(event);
    }

    println!("{}", view::render(&state));
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_is_full_screen() {
        let cli = Cli::parse_from(["ir-weather"]);
        assert!(cli.command.is_none());
        assert!(cli.is_full_screen());
    }

    #[test]
    fn show_plain_with_coordinates() {
        let cli = Cli::parse_from([
            "ir-weather", "show", "--plain", "--lat", "23.8103", "--lon", "90.4125",
        ]);
        assert!(!cli.is_full_screen());

        let Some(Command::Show(args)) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(
            args.coordinates().unwrap(),
            Some(Coordinates::new(23.8103, 90.4125))
        );
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::parse_from(["ir-weather", "show", "--lat", "-33.86", "--lon", "-151.2"]);
        let Some(Command::Show(args)) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.lat, Some(-33.86));
    }

    #[test]
    fn lat_requires_lon() {
        let err = Cli::try_parse_from(["ir-weather", "show", "--lat", "1.0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        let args = ShowArgs {
            lat: Some(91.0),
            lon: Some(0.0),
            ..ShowArgs::default()
        };
        assert!(args.coordinates().is_err());
    }
}

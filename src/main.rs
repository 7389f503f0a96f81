mod cli;

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{parse_input, rejected_input, Cli, Input, HELP};
use forecast_core::{AppError, Config};
use forecast_ui::{AppServices, WeatherModel};
use forecast_weather::{TemperatureUnit, WeatherProvider};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let err = AppError::from_report(e);
            tracing::error!("{}", err);
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    forecast_core::init("warn")?;

    let config = Config::load_validated(cli.config.as_deref())?;

    let api_key = match config.weather.resolve_api_key(cli.api_key.as_deref()) {
        Ok(key) => key,
        Err(e) => {
            let err = AppError::from(e);
            tracing::error!("{}", err);
            eprintln!("{}", err.user_message());
            return Ok(ExitCode::from(2));
        }
    };

    let timeout = Duration::from_secs(config.weather.request_timeout_secs);
    let provider = WeatherProvider::with_base_url(api_key, &config.weather.api_base_url, timeout)
        .context("Failed to create weather provider")?;
    let services = Arc::new(AppServices::new(provider)?);

    let unit = if cli.fahrenheit {
        TemperatureUnit::Fahrenheit
    } else {
        config.weather.temperature_unit
    };

    let mut model = WeatherModel::new(services, unit);
    // A search is two sequential requests.
    let wait = timeout * 2 + Duration::from_secs(1);

    tracing::info!("Forecast started");

    match cli.query {
        Some(query) => run_once(&mut model, query, wait),
        None => run_interactive(&mut model, wait),
    }
}

fn run_once(model: &mut WeatherModel, query: String, wait: Duration) -> Result<ExitCode> {
    model.set_query(query);
    model.submit();
    model.wait_idle(wait);

    print!("{}", model.render());

    if model.state().snapshot().is_some() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run_interactive(model: &mut WeatherModel, wait: Duration) -> Result<ExitCode> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();

    println!("{}\n", HELP);

    loop {
        model.poll_channel();
        print!("{}\nforecast> ", model.render());
        stdout.flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;
        let input = parse_input(&line);

        if let Some(hint) = rejected_input(&input, model.state()) {
            println!("{}", hint);
            continue;
        }

        match input {
            Input::Query(text) => model.set_query(text),
            Input::Submit => model.submit(),
            Input::Pick(n) => model.pick_suggestion(n - 1),
            Input::ToggleUnit => model.toggle_unit(),
            Input::NewSearch => model.new_search(),
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Quit => break,
            Input::Unknown(cmd) => {
                println!("Unknown command: {} (try :help)", cmd);
                continue;
            }
        }

        model.wait_idle(wait);
    }

    println!();
    Ok(ExitCode::SUCCESS)
}

use log::{error, info};
use nmea_gps_simulator::{
    CancellationToken, SentenceGenerator, SerialTransmitter, Simulator, SimulatorConfig,
};
use std::env;
use std::process::ExitCode;

fn load_config() -> Result<SimulatorConfig, Box<dyn std::error::Error>> {
    // Optional path to a JSON config file; defaults otherwise
    match env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Ok(SimulatorConfig::from_file(path)?)
        }
        None => Ok(SimulatorConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    config.validate()?;

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let mut transmitter = SerialTransmitter::open(config.serial.clone())?;
    let simulator = Simulator::new(SentenceGenerator::new(config.position), config.emit_interval());

    let summary = simulator.run(&mut transmitter, &token)?;
    println!("Stopped by user ({} sentences sent)", summary.sentences_sent);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

mod config;
mod errors;
mod gps;
mod link;
mod logging;
mod nmea;
mod sampler;
mod scheduler;
mod station;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::Args;
use gps::GpsReceiver;
use link::{Link, LogLink, MqttLink};
use logging::Logger;
use sampler::Sampler;
use scheduler::{IntervalTicks, Schedule};
use station::Station;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logger = Logger::init(&args.log_dir).context("failed to initialize logging")?;

    info!("Starting telemetry sampler");
    info!("Logging to {}", logger.path().display());
    info!(
        "Tick: {:?}, transmit every {} ticks, receive every {} ticks",
        args.interval(),
        args.transmit_every,
        args.receive_every
    );

    let gps = if args.no_gps {
        info!("GPS disabled, positions will be simulated");
        None
    } else {
        match GpsReceiver::open(&args.gps_port, args.gps_baud) {
            Ok(gps) => Some(gps),
            Err(e) => {
                error!("Failed to initialize GPS: {}", e);
                None
            }
        }
    };

    let sampler = Sampler::new(rand::thread_rng(), gps);
    if !sampler.has_gps() {
        info!("Using simulated position data");
    }

    let schedule = Schedule::station(args.transmit_every, args.receive_every);

    match args.mqtt_broker.as_deref() {
        Some(broker) => {
            let client_id = format!("sampler-{}", uuid::Uuid::new_v4());
            let link = MqttLink::connect(broker, args.mqtt_port, client_id, args.device_id.clone());
            run(Station::new(sampler, link, schedule), &args).await;
        }
        None => {
            run(Station::new(sampler, LogLink::new(), schedule), &args).await;
        }
    }

    drop(logger);
    Ok(())
}

async fn run<R: rand::Rng, L: Link>(mut station: Station<R, L>, args: &Args) {
    let mut ticks = IntervalTicks::new(args.interval());

    tokio::select! {
        _ = station.run(&mut ticks) => {
            error!("Sampler loop terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Terminating program after {} ticks", station.counter());
}

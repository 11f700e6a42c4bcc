use crate::config::{MQTT_CHANNEL_CAPACITY, MQTT_KEEP_ALIVE_SECS};
use crate::errors::Result;
use crate::telemetry::Transmission;
use chrono::{DateTime, Utc};
use rumqttc::{AsyncClient, MqttOptions, QoS};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

/// Transport a transmission record is handed to.
pub trait Link {
    fn transmit(&mut self, tick: u64, transmission: &Transmission) -> Result<()>;
}

/// Placeholder radio: every transmission becomes a log line.
#[derive(Debug)]
pub struct LogLink;

impl LogLink {
    pub fn new() -> Self {
        info!("LoRa setup simulated. SX127x module unavailable.");
        Self
    }
}

impl Link for LogLink {
    fn transmit(&mut self, _tick: u64, transmission: &Transmission) -> Result<()> {
        info!("Simulated LoRa transmission: {}", transmission.record());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    device_id: &'a str,
    tick: u64,
    timestamp: DateTime<Utc>,
    readings: &'a Transmission,
    record: String,
}

/// Publishes each transmission to `telemetry/{device_id}` on an MQTT broker.
pub struct MqttLink {
    client: AsyncClient,
    device_id: String,
    topic: String,
}

impl MqttLink {
    /// Must be called inside a tokio runtime; spawns the event loop poller.
    pub fn connect(broker: &str, port: u16, client_id: String, device_id: String) -> Self {
        info!("Connecting to MQTT broker at {}:{}", broker, port);

        let mut mqtt_options = MqttOptions::new(client_id, broker, port);
        mqtt_options.set_keep_alive(Duration::from_secs(MQTT_KEEP_ALIVE_SECS));
        mqtt_options.set_clean_session(true);

        let (client, mut eventloop) = AsyncClient::new(mqtt_options, MQTT_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            loop {
                if let Err(e) = eventloop.poll().await {
                    error!("MQTT eventloop error: {}", e);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        });

        let topic = format!("telemetry/{}", device_id);
        Self {
            client,
            device_id,
            topic,
        }
    }

    fn payload(&self, tick: u64, transmission: &Transmission) -> Result<Vec<u8>> {
        let envelope = Envelope {
            device_id: &self.device_id,
            tick,
            timestamp: Utc::now(),
            readings: transmission,
            record: transmission.record(),
        };
        Ok(serde_json::to_vec(&envelope)?)
    }
}

impl Link for MqttLink {
    fn transmit(&mut self, tick: u64, transmission: &Transmission) -> Result<()> {
        info!("Simulated LoRa transmission: {}", transmission.record());

        let payload = self.payload(tick, transmission)?;
        self.client
            .try_publish(&self.topic, QoS::AtLeastOnce, false, payload)?;
        Ok(())
    }
}

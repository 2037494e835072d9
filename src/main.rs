use bmx055::config::{load_bus_config, load_sensor_config, OutputFormat};
use bmx055::registry::init_device;
use bmx055::{init_tracing, run_sampling};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("[bmx055] starting up...");

    // Load configuration from CONFIG_PATH or default
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    let bus_config = load_bus_config(&format!("{}/buses.toml", config_path))?;
    let sensor_config = load_sensor_config(&format!("{}/sensors.toml", config_path))?;
    info!("[config] loaded from {}", config_path);

    let mut device = match init_device(&bus_config, &sensor_config.device) {
        Ok(device) => device,
        Err(e) => {
            error!("[bmx055] initialization failed: {}", e);
            return Err(e.into());
        }
    };

    let format = sensor_config.sampling.format;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("[bmx055] failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let stats = run_sampling(
        &mut device,
        &sensor_config.sampling,
        |msg| match format {
            OutputFormat::Json => match msg.to_json() {
                Ok(line) => println!("{}", line),
                Err(e) => error!("[bmx055] failed to serialize sample: {}", e),
            },
            OutputFormat::Log => {
                let s = msg.sample;
                info!(
                    "ACC: {} {} {} GYR: {} {} {} MAG: {} {} {}",
                    s.accel.x,
                    s.accel.y,
                    s.accel.z,
                    s.gyro.x,
                    s.gyro.y,
                    s.gyro.z,
                    s.mag.x,
                    s.mag.y,
                    s.mag.z
                );
            }
        },
        shutdown,
    )
    .await?;

    info!(
        "[bmx055] done: {} samples, {} read errors",
        stats.published, stats.errors
    );
    Ok(())
}

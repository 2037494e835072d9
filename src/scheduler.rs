use crate::bus::RegisterBus;
use crate::config::SamplingConfig;
use crate::device::SensorDevice;
use crate::errors::ConfigResult;
use crate::messages::{Header, SampleMessage};
use std::future::Future;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Counters reported when a sampling run ends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SamplingStats {
    pub published: u64,
    pub errors: u64,
}

/// Poll the device at `config.frequency` and hand every complete sample to
/// `publish`.
///
/// The config is validated first, so an out-of-range frequency is reported
/// instead of producing a zero period. Failed reads are logged and counted;
/// the loop keeps going. The run ends after `config.max_samples` published
/// samples or when `shutdown` resolves.
pub async fn run_sampling<B, F, S>(
    device: &mut SensorDevice<B>,
    config: &SamplingConfig,
    mut publish: F,
    shutdown: S,
) -> ConfigResult<SamplingStats>
where
    B: RegisterBus,
    F: FnMut(SampleMessage),
    S: Future<Output = ()>,
{
    config.validate()?;
    let period = Duration::from_micros(1_000_000 / u64::from(config.frequency));
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut stats = SamplingStats::default();
    let mut seq = 0u64;
    info!("[{}] sampling at {}Hz", config.device_id, config.frequency);

    loop {
        if config.max_samples.is_some_and(|max| stats.published >= max) {
            debug!("[{}] sample limit reached", config.device_id);
            break;
        }

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("[{}] shutdown requested", config.device_id);
                break;
            }
            _ = ticker.tick() => {}
        }

        match device.read_all() {
            Ok(sample) => {
                seq += 1;
                let header = Header::new(config.device_id.clone(), seq);
                publish(SampleMessage::new(header, sample));
                stats.published += 1;
            }
            Err(e) => {
                warn!("[{}] sensor read error: {}", config.device_id, e);
                stats.errors += 1;
            }
        }
    }

    info!(
        "[{}] sampling stopped: {} published, {} errors",
        config.device_id, stats.published, stats.errors
    );
    Ok(stats)
}

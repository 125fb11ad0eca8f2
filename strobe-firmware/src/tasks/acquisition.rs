//! Acquisition task
//!
//! Runs the capture state machine at the sample period. Each completed
//! capture is rasterized and queued for the display, then the next capture
//! is armed straight away. Keypad changes restart the capture with the new
//! settings.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use strobe_core::acquisition::{AcquisitionController, TickOutcome};
use strobe_core::config::{ConfigRequest, Configuration, FIFO_DEPTH};
use strobe_core::raster::{Frame, Rasterizer};
use strobe_core::traits::{DisplayError, DisplayOutput, InputController};
use strobe_drivers::display::sh1106;

use crate::channels::{CONFIG_UPDATE, FRAME_CHANNEL};
use crate::pins::FifoSource;

type Controller = AcquisitionController<FifoSource, FIFO_DEPTH>;

/// Hands frames to the display task without waiting
///
/// If the previous frame is still being drawn the new one is dropped.
struct FrameSender;

impl DisplayOutput for FrameSender {
    fn show(&mut self, frame: Frame) -> Result<(), DisplayError> {
        FRAME_CHANNEL
            .try_send(frame)
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u16, u16) {
        (sh1106::WIDTH, sh1106::HEIGHT)
    }
}

/// Latest settings received from the keypad task
struct PendingSettings {
    request: ConfigRequest,
    changed: bool,
}

impl InputController for PendingSettings {
    fn read_config(&mut self) -> ConfigRequest {
        self.request
    }

    fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }
}

/// Ticker period for one sample, at least one timer tick
fn sample_period(config: &Configuration) -> Duration {
    Duration::from_nanos(config.sample_rate().period_nanos()).max(Duration::from_ticks(1))
}

#[embassy_executor::task]
pub async fn acquisition_task(
    source: FifoSource,
    initial: ConfigRequest,
    pre_trigger: usize,
    overrun_poll_limit: u8,
) {
    info!("Acquisition task started");

    let (width, height) = FrameSender.dimensions();
    let rasterizer = match Rasterizer::new(width, height) {
        Ok(r) => r,
        Err(e) => {
            error!("Bad raster size: {}", e);
            return;
        }
    };

    let mut controller = Controller::new(source, pre_trigger).with_overrun_limit(overrun_poll_limit);
    let mut pending = PendingSettings {
        request: initial,
        changed: true,
    };
    apply_settings(&mut controller, &mut pending);

    let mut ticker = Ticker::every(sample_period(controller.config()));
    let mut display = FrameSender;

    loop {
        match select(ticker.next(), CONFIG_UPDATE.wait()).await {
            Either::First(()) => match controller.tick() {
                TickOutcome::Triggered(cause) => {
                    trace!("Triggered ({})", cause);
                }
                TickOutcome::Completed(completion) => {
                    debug!(
                        "Capture complete: {} with {} samples",
                        completion,
                        controller.buffered()
                    );
                    if let Err(e) = controller.present(&rasterizer, &mut display) {
                        debug!("Frame dropped: {}", e);
                    }
                    controller.restart();
                }
                _ => {}
            },
            Either::Second(request) => {
                pending.request = request;
                pending.changed = true;
                apply_settings(&mut controller, &mut pending);
                ticker = Ticker::every(sample_period(controller.config()));
            }
        }
    }
}

fn apply_settings(controller: &mut Controller, pending: &mut PendingSettings) {
    if let Some(out_of_range) = controller.reconfigure(pending) {
        if out_of_range.any() {
            warn!("Settings clamped: {}", out_of_range.fields());
        }
        let config = controller.config();
        info!(
            "Capture armed: {} S/s, level {} mV, delay {}",
            config.sample_rate().samples_per_s(),
            config.trigger_level_mv(),
            config.trigger_delay()
        );
    }

    let stats = controller.stats();
    trace!(
        "Stats: {} complete, {} overrun, {} cancelled",
        stats.completed,
        stats.overruns,
        stats.cancelled
    );
}

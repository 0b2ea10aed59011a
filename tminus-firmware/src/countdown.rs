//! Start-up sequence and render loop
//!
//! Runs from settings to the countdown, and returns only after a failure
//! has been shown for its hold time. The caller then resets the chip.

use defmt::*;
use embassy_time::Delay;
use embedded_io_async::{Read, Write};

use tminus_core::config::DEFAULT_SWAP_DELAY_S;
use tminus_core::traits::SegmentDisplay;
use tminus_core::{error_hold, Driver, Fault};
use tminus_drivers::link::BridgeLink;

use crate::settings;
use crate::timed::TimedLink;

/// Bring the clock up and run it until something fails
pub async fn run<D, U>(mut display: D, link: BridgeLink<U>) -> Fault
where
    D: SegmentDisplay,
    U: Read + Write,
{
    let config = match settings::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Settings rejected: {}", e);
            error_hold(&mut display, &mut Delay, DEFAULT_SWAP_DELAY_S).await;
            return Fault::Config(e);
        }
    };
    let hold_s = config.swap_delay_s;

    if let Err(e) = display.set_brightness(config.brightness).await {
        error!("Failed to set brightness: {}", e);
        error_hold(&mut display, &mut Delay, hold_s).await;
        return e.into();
    }

    let mut link = TimedLink::new(link);
    info!("Joining {}...", config.credentials.ssid.as_str());
    if let Err(e) = link.join(&config.credentials).await {
        error!("Join failed: {}", e);
        error_hold(&mut display, &mut Delay, hold_s).await;
        return e.into();
    }
    info!("Connected to time service");

    let mut driver = Driver::new(config, link, display, Delay);
    if let Err(fault) = driver.announce().await {
        error!("{}", fault);
        driver.hold(&fault).await;
        return fault;
    }

    let mut mode = driver.mode();
    loop {
        match driver.cycle().await {
            Ok(next) => {
                if next != mode {
                    info!("Render mode {} -> {}", mode, next);
                    if next.is_terminal() {
                        info!("Latched until restart");
                    }
                    mode = next;
                }
            }
            Err(fault) => {
                error!("{}", fault);
                warn!("Holding error for {}s", hold_s);
                driver.hold(&fault).await;
                return fault;
            }
        }
    }
}

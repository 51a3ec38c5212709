use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// One redraw request for the live board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub sequence: u64,
    pub at: DateTime<FixedOffset>,
}

/// Host wall clock, as the instant handed to clock faces
pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Spawn a background thread sending one tick per `interval`
///
/// The thread ends once `stop` is set or the receiver is dropped. The first
/// tick is sent immediately.
pub fn spawn_ticker<F>(
    sender: Sender<Tick>,
    interval: Duration,
    stop: Arc<AtomicBool>,
    now: F,
) -> thread::JoinHandle<()>
where
    F: Fn() -> DateTime<FixedOffset> + Send + 'static,
{
    thread::spawn(move || {
        info!(interval_ms = interval.as_millis() as u64, "Clock ticker started");
        let mut sequence = 0u64;
        while !stop.load(Ordering::Relaxed) {
            let tick = Tick {
                sequence,
                at: now(),
            };
            if sender.send(tick).is_err() {
                debug!("Tick receiver dropped, stopping ticker");
                break;
            }
            sequence += 1;
            thread::sleep(interval);
        }
        info!(ticks = sequence, "Clock ticker stopped");
    })
}

/// Flag set on Ctrl-C / SIGTERM so the redraw loop can exit cleanly
pub fn interrupt_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));

    #[cfg(unix)]
    {
        use anyhow::Context;
        use signal_hook::consts::{SIGINT, SIGTERM};

        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&flag))
                .with_context(|| format!("Failed to register handler for signal {signal}"))?;
        }
    }

    Ok(flag)
}

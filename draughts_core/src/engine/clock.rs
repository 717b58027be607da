/// Wall-clock milliseconds. Browsers and workers have no `SystemTime`, so
/// wasm builds read `performance.now()` instead.
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        if let Some(window) = web_sys::window() {
            return window.performance().map(|p| p.now()).unwrap_or(0.0);
        }
        let global = js_sys::global();
        if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
            return worker.performance().map(|p| p.now()).unwrap_or(0.0);
        }
        0.0 // Fail safe instead of panic
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        let since_the_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        #[allow(clippy::cast_precision_loss)]
        let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
            1000.0,
            f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
        );
        time_ms
    }
}

/// Seed for the tie-breaking RNG when none is configured.
pub fn clock_seed() -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let micros = (now_ms() * 1000.0) as u64;
    micros
}

#[cfg(not(target_arch = "wasm32"))]
type Started = std::time::Instant;
// performance.now() in milliseconds; `Instant` is unavailable in the browser.
#[cfg(target_arch = "wasm32")]
type Started = f64;

fn start_now() -> Started {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::Instant::now()
    }
    #[cfg(target_arch = "wasm32")]
    {
        now_ms()
    }
}

fn ms_since(start: Started) -> f64 {
    #[cfg(not(target_arch = "wasm32"))]
    {
        start.elapsed().as_secs_f64() * 1000.0
    }
    #[cfg(target_arch = "wasm32")]
    {
        now_ms() - start
    }
}

/// The moment a turn's search must stop. Shared unchanged by every depth
/// iteration and every recursive call of that turn. Natively measured on the
/// monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Started,
    limit_ms: Option<f64>,
}

impl Deadline {
    pub fn starting_now(limit_ms: Option<u64>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let limit_ms = limit_ms.map(|ms| ms as f64);
        Self {
            start: start_now(),
            limit_ms,
        }
    }

    pub fn unlimited() -> Self {
        Self::starting_now(None)
    }

    pub fn elapsed_ms(&self) -> f64 {
        ms_since(self.start)
    }

    pub fn expired(&self) -> bool {
        self.limit_ms
            .is_some_and(|limit| self.elapsed_ms() > limit)
    }
}

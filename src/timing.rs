//! Wall-clock timing of a single operation

use std::time::{Duration, Instant};

/// A value together with how long it took to produce
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

#[inline]
pub fn time<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// `label: 0.000123s`, the format used for every timing line
pub fn format_elapsed(label: &str, elapsed: Duration) -> String {
    format!("{label}: {:.6}s", elapsed.as_secs_f64())
}

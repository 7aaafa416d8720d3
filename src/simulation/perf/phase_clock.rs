//! Lap timing for the step phases.

#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now() -> Stamp {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> Stamp {
    std::time::Instant::now()
}

#[cfg(target_arch = "wasm32")]
fn ms_between(from: Stamp, to: Stamp) -> f64 {
    to - from
}

#[cfg(not(target_arch = "wasm32"))]
fn ms_between(from: Stamp, to: Stamp) -> f64 {
    to.duration_since(from).as_secs_f64() * 1000.0
}

/// Splits a step into consecutive phases. A disabled clock never reads the
/// time source and reports zero for every lap.
pub(crate) struct PhaseClock {
    marks: Option<(Stamp, Stamp)>,
}

impl PhaseClock {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            marks: enabled.then(|| {
                let t = now();
                (t, t)
            }),
        }
    }

    /// Milliseconds since the previous lap (or since creation).
    pub(crate) fn lap(&mut self) -> f64 {
        match &mut self.marks {
            Some((_, last)) => {
                let t = now();
                let ms = ms_between(*last, t);
                *last = t;
                ms
            }
            None => 0.0,
        }
    }

    /// Milliseconds since creation.
    pub(crate) fn total(&self) -> f64 {
        self.marks.map_or(0.0, |(first, _)| ms_between(first, now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_clock_reads_zero() {
        let mut clock = PhaseClock::new(false);
        assert_eq!(clock.lap(), 0.0);
        assert_eq!(clock.total(), 0.0);
    }

    #[test]
    fn laps_never_exceed_total() {
        let mut clock = PhaseClock::new(true);
        let a = clock.lap();
        let b = clock.lap();
        assert!(a >= 0.0 && b >= 0.0);
        assert!(a + b <= clock.total() + 1e-9);
    }
}

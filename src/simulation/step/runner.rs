use crate::rigid_body_system::BASE_DELTA_MS;

/// Steps allowed per host callback before the backlog is dropped
const MAX_SUBSTEPS: u32 = 3;

/// Fixed-timestep driver fed with host frame timestamps.
///
/// Each callback converts elapsed host time into whole engine steps. After
/// a long pause (background tab) at most `MAX_SUBSTEPS` steps run and the
/// remaining backlog is discarded instead of replayed.
#[derive(Clone, Debug)]
pub struct Runner {
    delta_ms: f32,
    last_timestamp: Option<f64>,
    accumulator: f64,
    steps: u64,
    enabled: bool,
}

impl Runner {
    pub fn new(time_scale: f32) -> Self {
        Self {
            delta_ms: BASE_DELTA_MS * time_scale,
            last_timestamp: None,
            accumulator: 0.0,
            steps: 0,
            enabled: true,
        }
    }

    /// Engine delta per step, already scaled
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time in ms, scaled by `time_scale`
    pub fn elapsed_ms(&self) -> f64 {
        self.steps as f64 * f64::from(self.delta_ms)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn stop(&mut self) {
        self.enabled = false;
    }

    /// Number of steps due at `timestamp_ms`. The first callback runs one
    /// step so the world moves on the first frame.
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        if !self.enabled {
            return 0;
        }
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            return self.count(1);
        };

        let frame = f64::from(BASE_DELTA_MS);
        self.accumulator += (timestamp_ms - last).max(0.0);
        let due = (self.accumulator / frame).floor() as u32;
        self.accumulator -= f64::from(due) * frame;
        if due > MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        self.count(due.min(MAX_SUBSTEPS))
    }

    fn count(&mut self, n: u32) -> u32 {
        self.steps += u64::from(n);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_callback_runs_one_step() {
        let mut r = Runner::new(1.0);
        assert_eq!(r.advance(1234.0), 1);
    }

    #[test]
    fn steady_frames_run_one_step_each() {
        let mut r = Runner::new(1.0);
        r.advance(0.0);
        let mut total = 0;
        for i in 1..=60 {
            total += r.advance(i as f64 * 1000.0 / 60.0 + 0.01);
        }
        assert_eq!(total, 60);
        assert!((r.elapsed_ms() - 61.0 * 1000.0 / 60.0).abs() < 1e-3);
    }

    #[test]
    fn long_pause_is_capped() {
        let mut r = Runner::new(1.0);
        r.advance(0.0);
        assert_eq!(r.advance(10_000.0), MAX_SUBSTEPS);
        assert_eq!(r.advance(10_000.0 + 1000.0 / 60.0 + 0.01), 1);
    }

    #[test]
    fn time_scale_scales_delta_and_stop_halts() {
        let mut r = Runner::new(0.5);
        assert!((r.delta_ms() - BASE_DELTA_MS * 0.5).abs() < 1e-6);
        r.stop();
        assert_eq!(r.advance(0.0), 0);
    }
}

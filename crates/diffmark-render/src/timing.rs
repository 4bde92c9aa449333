//! Opt-in per-stage render timing, enabled with `DIFFMARK_RENDER_TIMING=1`.

use std::time::{Duration, Instant};

fn parse_env_bool(v: &str) -> bool {
    match v.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => false,
        _ => true,
    }
}

fn render_timing_enabled() -> bool {
    static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var("DIFFMARK_RENDER_TIMING")
            .ok()
            .is_some_and(|v| parse_env_bool(&v))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Fragment,
    Assemble,
    PostProcess,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RenderTimings {
    pub total: Duration,
    pub fragment: Duration,
    pub assemble: Duration,
    pub post_process: Duration,
}

impl RenderTimings {
    fn stage_mut(&mut self, stage: Stage) -> &mut Duration {
        match stage {
            Stage::Fragment => &mut self.fragment,
            Stage::Assemble => &mut self.assemble,
            Stage::PostProcess => &mut self.post_process,
        }
    }
}

/// Measures one `render_document` call. A disabled timer runs stages untouched.
#[derive(Debug)]
pub(crate) struct RenderTimer {
    started: Option<Instant>,
    timings: RenderTimings,
}

impl RenderTimer {
    pub(crate) fn from_env() -> Self {
        Self::new(render_timing_enabled())
    }

    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            started: enabled.then(Instant::now),
            timings: RenderTimings::default(),
        }
    }

    /// Runs `f`, adding its wall time to `stage` when timing is on.
    pub(crate) fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        if self.started.is_none() {
            return f();
        }
        let start = Instant::now();
        let out = f();
        *self.timings.stage_mut(stage) += start.elapsed();
        out
    }

    /// Logs the collected timings for a document of `bytes` bytes. Returns `None` when disabled.
    pub(crate) fn finish(mut self, bytes: usize) -> Option<RenderTimings> {
        let started = self.started?;
        self.timings.total = started.elapsed();
        let timings = self.timings;
        tracing::info!(
            total = ?timings.total,
            fragment = ?timings.fragment,
            assemble = ?timings.assemble,
            post_process = ?timings.post_process,
            bytes,
            "render timing"
        );
        Some(timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_bool_parsing() {
        for off in ["", "0", "false", "No", " off "] {
            assert!(!parse_env_bool(off), "{off:?}");
        }
        for on in ["1", "true", "yes", "on"] {
            assert!(parse_env_bool(on), "{on:?}");
        }
    }

    #[test]
    fn disabled_timer_runs_stages_and_reports_nothing() {
        let mut timer = RenderTimer::new(false);
        let value = timer.time(Stage::Fragment, || 7);
        assert_eq!(value, 7);
        assert_eq!(timer.finish(0), None);
    }

    #[test]
    fn enabled_timer_accumulates_per_stage() {
        let mut timer = RenderTimer::new(true);
        timer.time(Stage::Assemble, || std::thread::sleep(Duration::from_millis(1)));
        let first = timer.timings.assemble;
        assert!(first >= Duration::from_millis(1));
        timer.time(Stage::Assemble, || ());
        assert!(timer.timings.assemble >= first);

        let timings = timer.finish(42).expect("enabled timer reports");
        assert_eq!(timings.fragment, Duration::ZERO);
        assert_eq!(timings.post_process, Duration::ZERO);
        assert!(timings.total >= timings.assemble);
    }
}

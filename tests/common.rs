#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use freqi::{Diagnostic, DiagnosticSink, Engine};

/// Tolerance for comparing computed frequencies.
pub const EPSILON: f64 = 1e-9;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON * b.abs().max(1.0)
}

/// Sink that keeps every diagnostic for later inspection.
#[derive(Default)]
pub struct Recorder(Mutex<Vec<Diagnostic>>);

impl Recorder {
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl DiagnosticSink for Recorder {
    fn report(&self, diagnostic: Diagnostic) {
        self.0.lock().unwrap().push(diagnostic);
    }
}

pub fn recording_engine() -> (Engine, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    (Engine::with_sink(recorder.clone()), recorder)
}

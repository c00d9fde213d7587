//! Scale and chord frequencies from an interval pattern.

use crate::augment::AugmentRequest;
use crate::config::ScaleConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::freq::equal_temperament;

impl ScaleConfig {
    /// The interval pattern, augmented if `intervalStartIndex + numNotes`
    /// reaches past its end.
    ///
    /// Configs read with [`ScaleConfig::from_config`] keep both counts within
    /// [`MAX_NOTES`](crate::config::MAX_NOTES); a config built by hand is
    /// taken as it is.
    pub fn extended_intervals(&self) -> Vec<f64> {
        let required = self.interval_start_index.saturating_add(self.num_notes);
        let len = self.intervals.len();
        if required <= len {
            return self.intervals.clone();
        }

        AugmentRequest {
            original: self.intervals.clone(),
            difference: required - len,
            amount_to_add: self.amount_to_add,
            repeat_multiple: self.repeat_multiple,
        }
        .run()
    }

    /// Frequencies for this config in playback order, reporting dropped notes
    /// to `sink`.
    ///
    /// One note is produced per interval from `intervalStartIndex` to the end
    /// of the extended pattern, so the output tracks the pattern length
    /// rather than `numNotes` when the pattern is already long enough.
    pub fn frequencies(&self, sink: &dyn DiagnosticSink) -> Vec<f64> {
        let intervals = self.extended_intervals();
        sink.report(Diagnostic::Building {
            label: self.label.clone(),
            intervals: intervals.len(),
        });

        let notes = intervals.len().saturating_sub(self.interval_start_index);
        let mut scale = Vec::with_capacity(notes);
        for (index, interval) in intervals
            .iter()
            .skip(self.interval_start_index)
            .enumerate()
        {
            let final_index = interval + self.root_note;
            let note = equal_temperament(self.start_freq, self.num_semitones, final_index, None);
            if note.is_finite() {
                scale.push(note);
            } else {
                sink.report(Diagnostic::Anomaly {
                    label: self.label.clone(),
                    index,
                    value: note,
                });
            }
        }
        scale
    }
}

use crate::core::models::condition::PresenceCondition;

/// Events emitted while scanning condition tables and correcting orientations.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart {
        name: &'static str,
    },
    PhaseFinish,

    /// A detection pass over `total_conditions` table entries begins.
    ScanStart {
        total_conditions: u64,
        observations: usize,
    },
    /// `fraction` of the observations fell in the zero-residue class.
    ConditionTested {
        condition: PresenceCondition,
        fraction: f64,
    },
    /// The pass ended, either on the flagged condition or after the last entry.
    ScanFinish {
        flagged: Option<PresenceCondition>,
    },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::vector::LatticeVector;
    use std::sync::Mutex;

    fn even_h() -> PresenceCondition {
        PresenceCondition::new(LatticeVector::new(1, 0, 0), 2)
    }

    #[test]
    fn silent_reporter_ignores_events() {
        ProgressReporter::new().report(Progress::ConditionTested {
            condition: even_h(),
            fraction: 0.5,
        });
    }

    #[test]
    fn callback_receives_events_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            events.lock().unwrap().push(e);
        }));

        reporter.report(Progress::ScanStart {
            total_conditions: 2,
            observations: 10,
        });
        reporter.report(Progress::ConditionTested {
            condition: even_h(),
            fraction: 1.0,
        });
        reporter.report(Progress::ScanFinish {
            flagged: Some(even_h()),
        });
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::ScanStart {
                    total_conditions: 2,
                    observations: 10
                },
                Progress::ConditionTested {
                    condition: even_h(),
                    fraction: 1.0
                },
                Progress::ScanFinish {
                    flagged: Some(even_h())
                },
            ]
        );
    }
}

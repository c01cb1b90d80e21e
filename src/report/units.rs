//! Equity and match-winning-chance formatting.
//!
//! Percentages are used only when the match has a finite length, the
//! settings ask for MWC and a match equity table is loaded. Anything else
//! (including session play with MWC requested) prints raw equity.

use super::types::{ExportSettings, OutputUnits};
use crate::met::MatchEquityTable;
use crate::state::MatchState;

/// Formats equities for one decision point
pub struct ValueFormat<'a> {
    met: Option<&'a MatchEquityTable>,
    state: &'a MatchState,
    digits: usize,
}

impl<'a> ValueFormat<'a> {
    pub fn new(settings: &ExportSettings, met: Option<&'a MatchEquityTable>, state: &'a MatchState) -> Self {
        let met = match settings.units {
            OutputUnits::Mwc if state.match_length > 0 => met,
            _ => None,
        };
        Self { met, state, digits: settings.digits }
    }

    pub fn uses_mwc(&self) -> bool {
        self.met.is_some()
    }

    /// Signed difference `value - reference`, e.g. "-0.123" or "-1.234%"
    pub fn delta(&self, value: f64, reference: f64) -> String {
        match self.met {
            Some(met) => {
                let diff = 100.0 * met.eq_to_mwc(value, self.state) - 100.0 * met.eq_to_mwc(reference, self.state);
                format!("{:+w$.p$}%", diff, w = self.digits + 3, p = self.digits)
            }
            None => format!("{:+w$.p$}", value - reference, w = self.digits + 4, p = self.digits),
        }
    }

    /// A single equity, e.g. "+0.123" or "54.321%"
    pub fn value(&self, value: f64) -> String {
        match self.met {
            Some(met) => {
                format!("{:w$.p$}%", 100.0 * met.eq_to_mwc(value, self.state), w = self.digits + 4, p = self.digits)
            }
            None => format!("{:+w$.p$}", value, w = self.digits + 4, p = self.digits),
        }
    }

    /// Standard deviation, always unsigned
    pub fn spread(&self, value: f64) -> String {
        match self.met {
            Some(met) => {
                let width = met.eq_to_mwc(value, self.state) - met.eq_to_mwc(0.0, self.state);
                format!("{:.p$}%", 100.0 * width.abs(), p = self.digits)
            }
            None => format!("{:.p$}", value.abs(), p = self.digits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn met() -> MatchEquityTable {
        MatchEquityTable {
            pre_crawford: vec![vec![0.5, 0.68, 0.75], vec![0.32, 0.5, 0.6], vec![0.25, 0.4, 0.5]],
            post_crawford: vec![0.5, 0.49, 0.32],
        }
    }

    #[test]
    fn test_equity_format() {
        let settings = ExportSettings::default();
        let state = MatchState::default();
        let fmt = ValueFormat::new(&settings, None, &state);
        assert!(!fmt.uses_mwc());
        assert_eq!(fmt.delta(0.1, 0.3), " -0.200");
        assert_eq!(fmt.value(0.25), " +0.250");
        assert_eq!(fmt.spread(-0.0126), "0.013");
    }

    #[test]
    fn test_mwc_needs_match_length() {
        let table = met();
        let settings = ExportSettings { units: OutputUnits::Mwc, ..ExportSettings::default() };

        let session = MatchState::default();
        assert!(!ValueFormat::new(&settings, Some(&table), &session).uses_mwc());

        let state = MatchState { match_length: 3, ..MatchState::default() };
        let fmt = ValueFormat::new(&settings, Some(&table), &state);
        assert!(fmt.uses_mwc());
        assert_eq!(fmt.delta(1.0, 0.0), "+10.000%");
        assert_eq!(fmt.value(0.0), " 50.000%");
    }

    #[test]
    fn test_mwc_needs_table() {
        let settings = ExportSettings { units: OutputUnits::Mwc, ..ExportSettings::default() };
        let state = MatchState { match_length: 3, ..MatchState::default() };
        assert!(!ValueFormat::new(&settings, None, &state).uses_mwc());
    }

    #[test]
    fn test_digits_control_width() {
        let settings = ExportSettings { digits: 1, ..ExportSettings::default() };
        let state = MatchState::default();
        assert_eq!(ValueFormat::new(&settings, None, &state).delta(0.0, 0.26), " -0.3");
    }
}

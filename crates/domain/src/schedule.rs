//! Time-window scheduling of a single actuator.

use crate::command::ActuatorCommand;
use crate::id::DeviceId;
use crate::reading::RawValue;
use crate::time::TimeOfDay;
use crate::window::TimeWindow;

/// An actuator that must be on inside `window` and off outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub actuator: DeviceId,
    pub window: TimeWindow,
}

/// Outcome of evaluating a [`Schedule`] against the cached actuator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The actuator never reported, or reported something other than `0`/`1`.
    Unknown,
    /// The cached state already matches the desired one.
    NoChange { on: bool },
    /// The actuator must be switched.
    Switch(ActuatorCommand),
}

impl Schedule {
    #[must_use]
    pub fn new(actuator: DeviceId, window: TimeWindow) -> Self {
        Self { actuator, window }
    }

    /// Decide what to do at `now` given the last cached actuator value.
    ///
    /// Never guesses: an absent or unrecognised value yields [`Decision::Unknown`].
    #[must_use]
    pub fn decide(&self, now: TimeOfDay, cached: Option<&RawValue>) -> Decision {
        let Some(actual) = cached.and_then(RawValue::as_switch) else {
            return Decision::Unknown;
        };
        let desired = self.window.contains(now);
        if desired == actual {
            Decision::NoChange { on: actual }
        } else {
            Decision::Switch(ActuatorCommand::new(self.actuator.clone(), desired))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_time_of_day;

    fn pump_schedule() -> Schedule {
        Schedule::new(
            DeviceId::new("RelaySwitch3").unwrap(),
            "05:00-23:00".parse().unwrap(),
        )
    }

    fn at(s: &str) -> TimeOfDay {
        parse_time_of_day(s).unwrap()
    }

    #[test]
    fn should_switch_on_when_in_window_and_off() {
        let decision = pump_schedule().decide(at("12:00"), Some(&RawValue::from("0")));
        let Decision::Switch(cmd) = decision else {
            panic!("expected a switch decision, got {decision:?}");
        };
        assert_eq!(cmd.to_frame(), "set:RelaySwitch3:1");
    }

    #[test]
    fn should_switch_off_when_outside_window_and_on() {
        let decision = pump_schedule().decide(at("23:30"), Some(&RawValue::from("1")));
        let Decision::Switch(cmd) = decision else {
            panic!("expected a switch decision, got {decision:?}");
        };
        assert_eq!(cmd.to_frame(), "set:RelaySwitch3:0");
    }

    #[test]
    fn should_not_change_when_state_matches() {
        let schedule = pump_schedule();
        assert_eq!(
            schedule.decide(at("12:00"), Some(&RawValue::from("1"))),
            Decision::NoChange { on: true }
        );
        assert_eq!(
            schedule.decide(at("03:00"), Some(&RawValue::from("0"))),
            Decision::NoChange { on: false }
        );
    }

    #[test]
    fn should_be_unknown_when_never_reported() {
        assert_eq!(pump_schedule().decide(at("12:00"), None), Decision::Unknown);
    }

    #[test]
    fn should_be_unknown_when_value_is_not_a_switch_state() {
        assert_eq!(
            pump_schedule().decide(at("12:00"), Some(&RawValue::from("42"))),
            Decision::Unknown
        );
    }
}

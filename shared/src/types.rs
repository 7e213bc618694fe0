use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::PickerError;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_DAY: u32 = MINUTES_PER_HOUR * HOURS_PER_DAY;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier correlating a picker with its bound element and rendered surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickerId(String);

impl PickerId {
    pub fn generate() -> Self {
        Self(format!("timepicker-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PickerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PickerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Time Value
// ============================================================================

/// A wall-clock time with minute resolution. Always within 00:00..=23:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Applies one step button. Hours wrap modulo 24; minutes wrap modulo 60
    /// and carry or borrow exactly one hour.
    pub fn stepped(self, action: StepAction, step: u32) -> Self {
        let step = step.clamp(1, MINUTES_PER_HOUR);
        let next_hour = (self.hour + 1) % HOURS_PER_DAY;
        let previous_hour = (self.hour + HOURS_PER_DAY - 1) % HOURS_PER_DAY;
        match (action.field, action.direction) {
            (Field::Hour, Direction::Up) => Self {
                hour: next_hour,
                ..self
            },
            (Field::Hour, Direction::Down) => Self {
                hour: previous_hour,
                ..self
            },
            (Field::Minute, Direction::Up) => {
                let minute = self.minute + step;
                Self {
                    hour: if minute >= MINUTES_PER_HOUR {
                        next_hour
                    } else {
                        self.hour
                    },
                    minute: minute % MINUTES_PER_HOUR,
                }
            }
            (Field::Minute, Direction::Down) => {
                if self.minute < step {
                    Self {
                        hour: previous_hour,
                        minute: self.minute + MINUTES_PER_HOUR - step,
                    }
                } else {
                    Self {
                        hour: self.hour,
                        minute: self.minute - step,
                    }
                }
            }
        }
    }

    /// Builds a time from minutes since midnight. Values past 23:59 are rejected.
    pub fn from_total_minutes(total: i64) -> Result<Self, PickerError> {
        if !(0..i64::from(MINUTES_PER_DAY)).contains(&total) {
            return Err(PickerError::OutOfRange(total));
        }
        let total = total as u32;
        Ok(Self {
            hour: total / MINUTES_PER_HOUR,
            minute: total % MINUTES_PER_HOUR,
        })
    }

    pub fn total_minutes(&self) -> u32 {
        self.hour * MINUTES_PER_HOUR + self.minute
    }

    pub fn hour_label(&self) -> String {
        format!("{:02}", self.hour)
    }

    pub fn minute_label(&self) -> String {
        format!("{:02}", self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    /// Accepts exactly `HH:MM`; `9:05` or `09:05:00` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !shaped {
            return Err(());
        }
        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ())?;
        Ok(Self {
            hour: time.hour(),
            minute: time.minute(),
        })
    }
}

// ============================================================================
// Step Actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hour,
    Minute,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Hour => "hour",
            Field::Minute => "minute",
        }
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(Field::Hour),
            "minute" => Ok(Field::Minute),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "increment" => Ok(Direction::Up),
            "down" | "decrement" => Ok(Direction::Down),
            _ => Err(()),
        }
    }
}

/// One of the four step buttons on the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepAction {
    pub field: Field,
    pub direction: Direction,
}

impl StepAction {
    pub const HOUR_UP: Self = Self::new(Field::Hour, Direction::Up);
    pub const HOUR_DOWN: Self = Self::new(Field::Hour, Direction::Down);
    pub const MINUTE_UP: Self = Self::new(Field::Minute, Direction::Up);
    pub const MINUTE_DOWN: Self = Self::new(Field::Minute, Direction::Down);

    pub const fn new(field: Field, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Parses a stringly `(field, action)` pair, e.g. from element data attributes.
    pub fn parse(field: &str, action: &str) -> Option<Self> {
        Some(Self::new(field.parse().ok()?, action.parse().ok()?))
    }
}

// ============================================================================
// Presentation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }

    /// Picks the theme from an element's class attribute. `dark` wins over `light`.
    pub fn from_classes(classes: &str) -> Self {
        let mut theme = Theme::System;
        for class in classes.split_whitespace() {
            match class {
                "dark" => return Theme::Dark,
                "light" => theme = Theme::Light,
                _ => {}
            }
        }
        theme
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Change,
    Show,
    Dismiss,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Change, EventKind::Show, EventKind::Dismiss];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Change => "change",
            EventKind::Show => "show",
            EventKind::Dismiss => "dismiss",
        }
    }
}

impl FromStr for EventKind {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "change" => Ok(EventKind::Change),
            "show" => Ok(EventKind::Show),
            "dismiss" => Ok(EventKind::Dismiss),
            _ => Err(PickerError::UnknownEvent(s.to_string())),
        }
    }
}

/// Where a page-wide pointer activation landed relative to a picker's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationTarget {
    Popup,
    Toggle,
    Outside,
}

/// Snapshot handed to listeners and returned by `value()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerValue {
    pub hour: u32,
    pub minute: u32,
    pub total_minutes: u32,
    pub button_active: bool,
    pub id: PickerId,
    pub value: String,
}

// ============================================================================
// Selectors
// ============================================================================

/// The two lookup forms a picker can be attached with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
}

impl Selector {
    /// The CSS form of the selector, for `querySelectorAll`.
    pub fn to_css(&self) -> String {
        match self {
            Selector::Id(id) => format!("#{}", id),
            Selector::Class(class) => format!(".{}", class),
        }
    }
}

impl FromStr for Selector {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid_name = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        match s.split_at_checked(1) {
            Some(("#", name)) if valid_name(name) => Ok(Selector::Id(name.to_string())),
            Some((".", name)) if valid_name(name) => Ok(Selector::Class(name.to_string())),
            _ => Err(PickerError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_from_str() {
        assert_eq!("09:05".parse(), Ok(TimeOfDay::new(9, 5).unwrap()));
        assert_eq!("23:59".parse(), Ok(TimeOfDay::new(23, 59).unwrap()));
        assert!("9:05".parse::<TimeOfDay>().is_err());
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12:30:00".parse::<TimeOfDay>().is_err());
        assert!("ab:cd".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_time_of_day_new_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
        assert!(TimeOfDay::new(30, 95).is_none());
        let last = TimeOfDay::new(23, 59).unwrap();
        assert_eq!((last.hour(), last.minute(), last.total_minutes()), (23, 59, 1439));
    }

    #[test]
    fn test_stepped_carries_and_borrows() {
        let at = |hour, minute| TimeOfDay::new(hour, minute).unwrap();
        assert_eq!(at(8, 45).stepped(StepAction::MINUTE_UP, 30), at(9, 15));
        assert_eq!(at(23, 30).stepped(StepAction::MINUTE_UP, 30), at(0, 0));
        assert_eq!(at(8, 10).stepped(StepAction::MINUTE_DOWN, 30), at(7, 40));
        assert_eq!(at(0, 0).stepped(StepAction::MINUTE_DOWN, 30), at(23, 30));
        assert_eq!(at(23, 5).stepped(StepAction::HOUR_UP, 30), at(0, 5));
        assert_eq!(at(0, 5).stepped(StepAction::HOUR_DOWN, 30), at(23, 5));
    }

    #[test]
    fn test_time_of_day_display() {
        assert_eq!(TimeOfDay::new(7, 3).unwrap().to_string(), "07:03");
        assert_eq!(TimeOfDay::default().to_string(), "00:00");
    }

    #[test]
    fn test_from_total_minutes() {
        let time = TimeOfDay::from_total_minutes(870).unwrap();
        assert_eq!((time.hour(), time.minute()), (14, 30));
        assert_eq!(time.total_minutes(), 870);
        assert!(matches!(
            TimeOfDay::from_total_minutes(1440),
            Err(PickerError::OutOfRange(1440))
        ));
        assert!(matches!(
            TimeOfDay::from_total_minutes(-1),
            Err(PickerError::OutOfRange(-1))
        ));
    }

    #[test]
    fn test_step_action_parse() {
        assert_eq!(StepAction::parse("hour", "up"), Some(StepAction::HOUR_UP));
        assert_eq!(
            StepAction::parse("MINUTE", "decrement"),
            Some(StepAction::MINUTE_DOWN)
        );
        assert_eq!(StepAction::parse("second", "up"), None);
        assert_eq!(StepAction::parse("hour", "sideways"), None);
    }

    #[test]
    fn test_theme_from_classes() {
        assert_eq!(Theme::from_classes("form-input dark"), Theme::Dark);
        assert_eq!(Theme::from_classes("light form-input"), Theme::Light);
        assert_eq!(Theme::from_classes("light dark"), Theme::Dark);
        assert_eq!(Theme::from_classes("darkish"), Theme::System);
        assert_eq!(Theme::from_classes(""), Theme::System);
    }

    #[test]
    fn test_event_kind_from_str() {
        assert_eq!("change".parse::<EventKind>().ok(), Some(EventKind::Change));
        assert_eq!("SHOW".parse::<EventKind>().ok(), Some(EventKind::Show));
        assert_eq!("Dismiss".parse::<EventKind>().ok(), Some(EventKind::Dismiss));
        assert!("blur".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_selector_from_str() {
        assert_eq!(
            "#start".parse::<Selector>().ok(),
            Some(Selector::Id("start".to_string()))
        );
        assert_eq!(
            ".time-field".parse::<Selector>().ok(),
            Some(Selector::Class("time-field".to_string()))
        );
        assert!("start".parse::<Selector>().is_err());
        assert!("#".parse::<Selector>().is_err());
        assert!(".a b".parse::<Selector>().is_err());
        assert_eq!(Selector::Class("x".to_string()).to_css(), ".x");
    }

    #[test]
    fn test_picker_value_serializes_camel_case() {
        let value = PickerValue {
            hour: 14,
            minute: 30,
            total_minutes: 870,
            button_active: false,
            id: PickerId::from("timepicker-a"),
            value: "14:30".to_string(),
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["totalMinutes"], 870);
        assert_eq!(json["buttonActive"], false);
        assert_eq!(json["id"], "timepicker-a");
        assert_eq!(json["value"], "14:30");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PickerId::generate();
        let b = PickerId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("timepicker-"));
    }
}

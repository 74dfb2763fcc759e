//! Range Picker Component
//!
//! A row of mutually exclusive options with roving keyboard focus.

use crate::domain::period::AggregationWindow;
use crate::i18n::{Locale, t};

/// A picker option
#[derive(Debug, Clone, PartialEq)]
pub struct RangeOption {
    pub value: u32,
    pub label: String,
}

impl RangeOption {
    pub fn new(value: u32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Keys the picker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    /// ArrowLeft / ArrowUp
    Previous,
    /// ArrowRight / ArrowDown
    Next,
    Home,
    End,
    /// Space / Enter
    Activate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangePicker {
    value: u32,
    options: Vec<RangeOption>,
}

impl RangePicker {
    pub fn new(options: Vec<RangeOption>) -> Self {
        let value = options.first().map(|o| o.value).unwrap_or_default();
        Self { value, options }
    }

    /// Day / Week / Month options in `locale`
    pub fn periods(locale: Locale) -> Self {
        Self::new(
            AggregationWindow::ALL
                .iter()
                .map(|w| RangeOption::new(w.picker_value(), t(locale, w.label_key())))
                .collect(),
        )
    }

    /// Set the selected value
    pub fn value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn selected(&self) -> u32 {
        self.value
    }

    pub fn options(&self) -> &[RangeOption] {
        &self.options
    }

    /// Index holding keyboard focus: the selected option, or the first
    pub fn active_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| o.value == self.value)
            .unwrap_or(0)
    }

    /// Select `value`. Returns the value to announce as a change, or None
    /// when it was already selected.
    pub fn select(&mut self, value: u32) -> Option<u32> {
        if value == self.value {
            return None;
        }
        self.value = value;
        Some(value)
    }

    /// Index that receives focus after `key` is pressed on option `index`
    pub fn focus_after(&self, index: usize, key: PickerKey) -> Option<usize> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        Some(match key {
            PickerKey::Previous => (index + len - 1) % len,
            PickerKey::Next => (index + 1) % len,
            PickerKey::Home => 0,
            PickerKey::End => len - 1,
            PickerKey::Activate => index,
        })
    }

    /// Handle a key on option `index`: move focus and select the focused
    /// option. Returns the changed value, if any.
    pub fn handle_key(&mut self, index: usize, key: PickerKey) -> Option<u32> {
        let next = self.focus_after(index, key)?;
        let value = self.options.get(next)?.value;
        self.select(value)
    }

    /// Text rendering, e.g. "[Day]  Week  Month"
    pub fn render(&self) -> String {
        self.options
            .iter()
            .map(|o| {
                if o.value == self.value {
                    format!("[{}]", o.label)
                } else {
                    o.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

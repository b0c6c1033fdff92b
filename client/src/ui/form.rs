//! Patient form state
//!
//! Ten widgets with fixed defaults and bounds, then the Predict button.
//! Bounds only constrain the widgets; the server accepts any number.

use crossterm::event::KeyCode;

use crate::api::{Outcome, PredictionPayload};

pub const SEX_OPTIONS: &[&str] = &["Male", "Female"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Slider { min: f64, max: f64, step: f64 },
    Number { min: f64, max: f64, step: f64, decimals: usize },
    Select { options: &'static [&'static str] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    /// Numeric value, or the option index for a select
    pub value: f64,
    /// Text typed but not committed yet
    pub edit: Option<String>,
}

impl Field {
    fn slider(key: &'static str, label: &'static str, min: f64, max: f64, value: f64) -> Self {
        Self { key, label, widget: Widget::Slider { min, max, step: 1.0 }, value, edit: None }
    }

    fn number(
        key: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        value: f64,
        decimals: usize,
    ) -> Self {
        let step = if decimals == 0 { 1.0 } else { 0.1 };
        Self { key, label, widget: Widget::Number { min, max, step, decimals }, value, edit: None }
    }

    fn select(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self { key, label, widget: Widget::Select { options }, value: 0.0, edit: None }
    }

    fn bounds(&self) -> (f64, f64) {
        match self.widget {
            Widget::Slider { min, max, .. } | Widget::Number { min, max, .. } => (min, max),
            Widget::Select { options } => (0.0, options.len().saturating_sub(1) as f64),
        }
    }

    fn decimals(&self) -> usize {
        match self.widget {
            Widget::Number { decimals, .. } => decimals,
            _ => 0,
        }
    }

    fn is_numeric(&self) -> bool {
        !matches!(self.widget, Widget::Select { .. })
    }

    fn set(&mut self, value: f64) {
        let (min, max) = self.bounds();
        let scale = 10f64.powi(self.decimals() as i32);
        self.value = ((value * scale).round() / scale).clamp(min, max);
    }

    /// Move by one step (or one option) in `direction`
    fn nudge(&mut self, direction: f64) {
        self.commit();
        match self.widget {
            Widget::Slider { step, .. } | Widget::Number { step, .. } => self.set(self.value + direction * step),
            Widget::Select { options } => {
                let len = options.len() as f64;
                self.value = (self.value + direction).rem_euclid(len);
            }
        }
    }

    /// Parse the edit buffer into the value; unparsable text is dropped
    fn commit(&mut self) {
        if let Some(text) = self.edit.take() {
            match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => self.set(value),
                _ => log::debug!("Discarding invalid input {:?} for {}", text, self.key),
            }
        }
    }

    /// Text shown for the current value
    pub fn display(&self) -> String {
        if let Some(text) = &self.edit {
            return text.clone();
        }
        match self.widget {
            Widget::Select { options } => options.get(self.value as usize).copied().unwrap_or("?").to_string(),
            _ => format!("{:.*}", self.decimals(), self.value),
        }
    }

    /// Position of the value within the bounds, 0.0 to 1.0
    pub fn fraction(&self) -> f64 {
        let (min, max) = self.bounds();
        if max > min {
            ((self.value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Quit,
}

pub struct FormState {
    pub fields: Vec<Field>,
    /// `fields.len()` means the Predict button
    pub focus: usize,
    pub outcome: Option<Outcome>,
    pub busy: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: vec![
                Field::slider("age", "Age", 1.0, 120.0, 50.0),
                Field::select("sex", "Sex", SEX_OPTIONS),
                Field::number("bmi", "BMI", 10.0, 60.0, 30.0, 1),
                Field::number("bp", "Blood Pressure", 50.0, 200.0, 80.0, 0),
                Field::number("s1", "S1: Total Cholesterol", 50.0, 300.0, 150.0, 0),
                Field::number("s2", "S2: LDL", 50.0, 300.0, 100.0, 0),
                Field::number("s3", "S3: HDL", 20.0, 150.0, 50.0, 0),
                Field::number("s4", "S4: TCH/HDL Ratio", 0.5, 10.0, 4.5, 1),
                Field::number("s5", "S5: log(Serum Triglycerides)", 3.0, 7.0, 5.5, 1),
                Field::number("s6", "S6: Blood Sugar", 50.0, 200.0, 110.0, 0),
            ],
            focus: 0,
            outcome: None,
            busy: false,
        }
    }

    pub fn on_button(&self) -> bool {
        self.focus == self.fields.len()
    }

    fn focused(&mut self) -> Option<&mut Field> {
        self.fields.get_mut(self.focus)
    }

    fn editing(&self) -> bool {
        self.fields.get(self.focus).map_or(false, |f| f.edit.is_some())
    }

    fn move_focus(&mut self, forward: bool) {
        if let Some(field) = self.focused() {
            field.commit();
        }
        let slots = self.fields.len() + 1;
        self.focus = if forward {
            (self.focus + 1) % slots
        } else {
            (self.focus + slots - 1) % slots
        };
    }

    fn value(&self, key: &str) -> f64 {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value)
            .unwrap_or_default()
    }

    /// "Male" → 0, "Female" → 1
    pub fn sex_code(&self) -> i64 {
        let index = self.value("sex") as usize;
        match SEX_OPTIONS.get(index) {
            Some(&"Female") => 1,
            _ => 0,
        }
    }

    /// Commit pending edits and assemble the request body
    pub fn payload(&mut self) -> PredictionPayload {
        for field in &mut self.fields {
            field.commit();
        }

        PredictionPayload {
            age: self.value("age"),
            sex: self.sex_code(),
            bmi: self.value("bmi"),
            bp: self.value("bp"),
            s1: self.value("s1"),
            s2: self.value("s2"),
            s3: self.value("s3"),
            s4: self.value("s4"),
            s5: self.value("s5"),
            s6: self.value("s6"),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> FormAction {
        match key {
            KeyCode::Esc if self.editing() => {
                if let Some(field) = self.focused() {
                    field.edit = None;
                }
                FormAction::None
            }
            KeyCode::Esc | KeyCode::Char('q') => FormAction::Quit,
            KeyCode::Char('p') => FormAction::Submit,
            KeyCode::Enter if self.on_button() => FormAction::Submit,
            KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                self.move_focus(true);
                FormAction::None
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.move_focus(false);
                FormAction::None
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                let direction = if key == KeyCode::Left { -1.0 } else { 1.0 };
                if let Some(field) = self.focused() {
                    // space only toggles selects
                    if key != KeyCode::Char(' ') || !field.is_numeric() {
                        field.nudge(direction);
                    }
                }
                FormAction::None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                if let Some(field) = self.focused().filter(|f| f.is_numeric()) {
                    field.edit.get_or_insert_with(String::new).push(c);
                }
                FormAction::None
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused().filter(|f| f.is_numeric()) {
                    let current = field.display();
                    field.edit.get_or_insert(current).pop();
                }
                FormAction::None
            }
            _ => FormAction::None,
        }
    }
}

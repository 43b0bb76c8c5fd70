use std::collections::BTreeSet;

use crate::validation::Field;

/// The six pages of the gig wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Title = 1,
    Description = 2,
    Category = 3,
    DeliveryTime = 4,
    Price = 5,
    Media = 6,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Title,
        Step::Description,
        Step::Category,
        Step::DeliveryTime,
        Step::Price,
        Step::Media,
    ];

    pub const FIRST: Step = Step::Title;
    pub const LAST: Step = Step::Media;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Step::ALL.into_iter().find(|step| step.number() == n)
    }

    /// The following step; the last step stays put.
    pub fn next(self) -> Step {
        Step::from_number(self.number() + 1).unwrap_or(Step::LAST)
    }

    /// The preceding step; the first step stays put.
    pub fn previous(self) -> Step {
        Step::from_number(self.number().saturating_sub(1)).unwrap_or(Step::FIRST)
    }

    /// Form field checked on this step. The media step has none.
    pub fn field(self) -> Option<Field> {
        match self {
            Step::Title => Some(Field::Title),
            Step::Description => Some(Field::Description),
            Step::Category => Some(Field::Category),
            Step::DeliveryTime => Some(Field::DeliveryTime),
            Step::Price => Some(Field::Price),
            Step::Media => None,
        }
    }

    pub fn for_field(field: Field) -> Step {
        match field {
            Field::Title => Step::Title,
            Field::Description => Step::Description,
            Field::Category => Step::Category,
            Field::DeliveryTime => Step::DeliveryTime,
            Field::Price => Step::Price,
        }
    }
}

/// How a step is drawn in the progress bar. Earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Current,
    Error,
    Visited,
    Pending,
}

/// Navigation bookkeeping. The current step is always in `visited`;
/// `visited` only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    current: Step,
    visited: BTreeSet<Step>,
    errors: BTreeSet<Step>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current: Step::FIRST,
            visited: BTreeSet::from([Step::FIRST]),
            errors: BTreeSet::new(),
        }
    }
}

impl WizardState {
    pub fn current(&self) -> Step {
        self.current
    }

    pub fn visited(&self) -> &BTreeSet<Step> {
        &self.visited
    }

    pub fn errors(&self) -> &BTreeSet<Step> {
        &self.errors
    }

    pub fn move_to(&mut self, step: Step) {
        self.current = step;
        self.visited.insert(step);
    }

    pub fn mark_error(&mut self, step: Step) {
        self.errors.insert(step);
    }

    pub fn clear_error(&mut self, step: Step) {
        self.errors.remove(&step);
    }

    /// Record the outcome of validating `step`.
    pub fn record(&mut self, step: Step, valid: bool) {
        if valid {
            self.clear_error(step);
        } else {
            self.mark_error(step);
        }
    }

    pub fn replace_errors(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.errors = steps.into_iter().collect();
    }

    pub fn status(&self, step: Step) -> StepStatus {
        if step == self.current {
            StepStatus::Current
        } else if self.errors.contains(&step) {
            StepStatus::Error
        } else if self.visited.contains(&step) {
            StepStatus::Visited
        } else {
            StepStatus::Pending
        }
    }
}

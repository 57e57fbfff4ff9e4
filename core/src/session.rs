use crate::dodge::Point;
use crate::prompt::{affirm_scale, prompt_text};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Question,
    Accepted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionAction {
    Accept,
    AskAgain,
    Dodge(Point),
}

/// Per-view state for the question screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    stage: Stage,
    attempts: u32,
    avoid_position: Option<Point>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Only defined while the avoid button floats; inline otherwise.
    pub fn avoid_position(&self) -> Option<Point> {
        if self.avoid_button_floating() {
            self.avoid_position
        } else {
            None
        }
    }

    pub fn avoid_button_floating(&self) -> bool {
        self.stage == Stage::Question && self.attempts > 0
    }

    pub fn prompt_text(&self) -> &'static str {
        prompt_text(self.attempts)
    }

    pub fn affirm_scale(&self) -> f64 {
        affirm_scale(self.attempts)
    }

    pub fn accept(&mut self) -> bool {
        if self.stage == Stage::Accepted {
            return false;
        }
        self.stage = Stage::Accepted;
        true
    }

    /// Back to a fresh question screen, whatever the current state.
    pub fn ask_again(&mut self) -> bool {
        let changed = *self != Self::default();
        *self = Self::default();
        changed
    }

    pub fn record_dodge(&mut self, position: Point) -> bool {
        if self.stage != Stage::Question {
            return false;
        }
        self.avoid_position = Some(position);
        self.attempts = self.attempts.saturating_add(1);
        true
    }

    pub fn apply(&mut self, action: SessionAction) -> bool {
        match action {
            SessionAction::Accept => self.accept(),
            SessionAction::AskAgain => self.ask_again(),
            SessionAction::Dodge(position) => self.record_dodge(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dodge_is_ignored_after_accept() {
        let mut session = Session::new();
        assert!(session.accept());
        assert!(!session.record_dodge(Point::new(10.0, 10.0)));
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.avoid_position(), None);
    }

    #[test]
    fn accept_twice_reports_no_change() {
        let mut session = Session::new();
        assert!(session.accept());
        assert!(!session.accept());
    }
}

pub const PROMPT_MESSAGES: [&str; 7] = [
    "Do you want to be my valentine? 💘",
    "Are you sure?",
    "Really sure?",
    "Think again 😭",
    "Ok but like... yes?",
    "Last chance to choose wisely!",
    "Ok now I feel real hurt 😭",
];

pub const AFFIRM_SCALE_STEP: f64 = 0.1;
pub const AFFIRM_SCALE_MAX_BONUS: f64 = 0.4;

pub const SUCCESS_TITLE: &str = "yayy!!!";
pub const SUCCESS_LINE: &str = "Correct answer 😌💘";
pub const ASK_AGAIN_LABEL: &str = "Want me to ask the question again?";

/// Prompt shown after `attempts` dodges; sticks on the last message.
pub fn prompt_text(attempts: u32) -> &'static str {
    let index = (attempts as usize).min(PROMPT_MESSAGES.len() - 1);
    PROMPT_MESSAGES[index]
}

pub fn affirm_scale(attempts: u32) -> f64 {
    1.0 + (attempts as f64 * AFFIRM_SCALE_STEP).min(AFFIRM_SCALE_MAX_BONUS)
}

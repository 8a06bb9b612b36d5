//! Rendering of prompt text

use crate::models::PromptSpec;

/// Separator between the prompt body and each appended instruction line
pub(crate) const LINE: &str = " \n* ";

/// Render a prompt: user mention, body, then the time and cancel footer.
pub fn format_prompt(spec: &PromptSpec) -> String {
    let mut prompt = format!("{} {}", spec.user_id(), spec.text());

    if let Some(deadline) = spec.timeout().deadline() {
        prompt.push_str(&format!(
            "{}Respond within {} seconds.",
            LINE,
            deadline.as_secs()
        ));
    }

    if spec.cancelable() {
        prompt.push_str(&format!("{}Write \"cancel\" to cancel the prompt.", LINE));
    } else {
        prompt.push_str(&format!("{}You can not cancel this prompt.", LINE));
    }

    prompt
}

/// Kind of answer a prompt asks for, used to pick its instruction line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionType {
    Text,
    Number,
    Boolean,
    Mention,
    Channel,
}

impl InstructionType {
    pub fn instruction(self) -> &'static str {
        match self {
            InstructionType::Text => "Write your response!",
            InstructionType::Number => "Respond with a number only!",
            InstructionType::Boolean => "Respond with \"yes\" or \"no\" only!",
            InstructionType::Mention => {
                "To mention a user or a role use \"@\"! Ex: @Hacker or @John."
            }
            InstructionType::Channel => "To mention a channel use \"#\"! Ex: #banter.",
        }
    }
}

/// Instruction lines appended to a prompt body for `kind` and `count`.
///
/// Boolean prompts never carry a count hint.
pub fn instruction_lines(kind: InstructionType, count: Option<usize>) -> String {
    let mut lines = format!("{}{}", LINE, kind.instruction());
    if let Some(count) = count {
        if kind != InstructionType::Boolean {
            lines.push_str(&format!("{}Please respond with only {}.", LINE, count));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelRef, PromptSpec, Timeout, UserId};

    fn spec(timeout: Timeout, cancelable: bool) -> PromptSpec {
        PromptSpec::from_parts(
            "Pick a team".to_string(),
            ChannelRef::text("c"),
            UserId::new("0000"),
            timeout,
            cancelable,
        )
    }

    #[test]
    fn test_unbounded_not_cancelable() {
        assert_eq!(
            format_prompt(&spec(Timeout::Unbounded, false)),
            "<@0000> Pick a team \n* You can not cancel this prompt."
        );
    }

    #[test]
    fn test_bounded_cancelable() {
        assert_eq!(
            format_prompt(&spec(Timeout::Seconds(30), true)),
            "<@0000> Pick a team \n* Respond within 30 seconds. \n* Write \"cancel\" to cancel the prompt."
        );
    }

    #[test]
    fn test_instruction_lines() {
        assert_eq!(
            instruction_lines(InstructionType::Number, None),
            " \n* Respond with a number only!"
        );
        assert_eq!(
            instruction_lines(InstructionType::Channel, Some(3)),
            " \n* To mention a channel use \"#\"! Ex: #banter. \n* Please respond with only 3."
        );
        assert_eq!(
            instruction_lines(InstructionType::Boolean, Some(3)),
            " \n* Respond with \"yes\" or \"no\" only!"
        );
    }
}

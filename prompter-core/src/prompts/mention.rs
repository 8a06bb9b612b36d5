//! Mention prompts: channels, roles and members

use super::format::InstructionType;
use super::message::MessagePrompt;
use super::retry::{check_cardinality, require_count, sole, Cardinality};
use super::SinglePrompt;
use crate::error::PromptError;
use crate::models::{ChannelId, PromptSpec, Reply, RoleId, UserId};
use async_trait::async_trait;

/// What a mention prompt extracts and how it words its notices
struct MentionRules<T> {
    prompt: &'static str,
    instruction: InstructionType,
    noun: &'static str,
    sigil: &'static str,
    extract: fn(&Reply) -> Vec<T>,
}

const CHANNELS: MentionRules<ChannelId> = MentionRules {
    prompt: "channel",
    instruction: InstructionType::Channel,
    noun: "channel",
    sigil: "#",
    extract: |reply| reply.mentions.channels.clone(),
};

const ROLES: MentionRules<RoleId> = MentionRules {
    prompt: "role",
    instruction: InstructionType::Mention,
    noun: "role",
    sigil: "@",
    extract: |reply| reply.mentions.roles.clone(),
};

const MEMBERS: MentionRules<UserId> = MentionRules {
    prompt: "member",
    instruction: InstructionType::Mention,
    noun: "member",
    sigil: "@",
    extract: |reply| reply.mentions.members.clone(),
};

async fn collect<T: Clone + PartialEq>(
    base: &MessagePrompt,
    spec: &PromptSpec,
    count: Option<usize>,
    rules: &MentionRules<T>,
) -> Result<Vec<T>, PromptError> {
    require_count(count)?;
    let ctx = base.context();
    let mut attempts = ctx.attempts(rules.prompt);

    loop {
        attempts.begin()?;
        let reply = base
            .instruction_prompt(spec, rules.instruction, count)
            .await?;
        let found = dedup((rules.extract)(&reply));

        let notice = match check_cardinality(found.len(), count) {
            Cardinality::Accepted => return Ok(found),
            Cardinality::WrongCount(expected) => format!(
                "You should only mention {} {}(s)! Try again!",
                expected, rules.noun
            ),
            Cardinality::Empty => format!(
                "You need to mention {}s with \"{}\"! Try again!",
                rules.noun, rules.sigil
            ),
        };

        attempts.reject(spec.channel(), &notice);
        ctx.notice(spec.channel(), spec.user_id(), &notice).await?;
    }
}

/// Keep the first occurrence of each value
fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

macro_rules! mention_prompt {
    ($(#[$meta:meta])* $name:ident, $output:ty, $rules:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            base: MessagePrompt,
        }

        impl $name {
            pub fn new(base: MessagePrompt) -> Self {
                Self { base }
            }

            /// Ask for exactly one mention
            pub async fn single(&self, spec: &PromptSpec) -> Result<$output, PromptError> {
                self.multi(spec, Some(1)).await.and_then(sole)
            }

            /// Ask for mentions, exactly `count` of them when bounded
            pub async fn multi(
                &self,
                spec: &PromptSpec,
                count: Option<usize>,
            ) -> Result<Vec<$output>, PromptError> {
                collect(&self.base, spec, count, &$rules).await
            }
        }

        #[async_trait]
        impl SinglePrompt for $name {
            type Output = $output;

            async fn invoke(&self, spec: &PromptSpec) -> Result<$output, PromptError> {
                self.single(spec).await
            }
        }
    };
}

mention_prompt!(
    /// Prompts for text channel mentions.
    ChannelPrompt,
    ChannelId,
    CHANNELS
);
mention_prompt!(
    /// Prompts for role mentions.
    RolePrompt,
    RoleId,
    ROLES
);
mention_prompt!(
    /// Prompts for member mentions.
    MemberPrompt,
    UserId,
    MEMBERS
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let values = vec![
            ChannelId::new("b"),
            ChannelId::new("a"),
            ChannelId::new("b"),
        ];
        assert_eq!(
            dedup(values),
            vec![ChannelId::new("b"), ChannelId::new("a")]
        );
    }
}

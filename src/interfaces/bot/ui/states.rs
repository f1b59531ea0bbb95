/// Which creation flow a pending conversation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreationKind {
    Poll,
    Task,
    Giveaway,
}

impl CreationKind {
    pub fn label(&self) -> &'static str {
        match self {
            CreationKind::Poll => "poll",
            CreationKind::Task => "task",
            CreationKind::Giveaway => "giveaway",
        }
    }

    pub fn prompt_text(&self) -> &'static str {
        match self {
            CreationKind::Poll => {
                "Send the poll question and options separated by commas:\n\nExample: \"What is your favorite crypto?, BTC, ETH, SOL\""
            }
            CreationKind::Task => {
                "Send the task details in the following format:\n\n\"Task Title, Task Description, Reward Amount (SOL)\""
            }
            CreationKind::Giveaway => {
                "Send the giveaway details in the following format:\n\n\"Giveaway Title, Number of Winners, Reward per Winner (SOL)\""
            }
        }
    }

    pub fn timeout_text(&self) -> String {
        format!(
            "⌛ {} creation timed out. Send /create{} to start again.",
            capitalize(self.label()),
            self.label()
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_text_points_back_to_the_command() {
        assert_eq!(
            CreationKind::Giveaway.timeout_text(),
            "⌛ Giveaway creation timed out. Send /creategiveaway to start again."
        );
    }
}

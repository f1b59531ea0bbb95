use crate::application::pricing::PriceSummary;
use crate::interfaces::bot::data::{Giveaway, Task};

pub const HELP_TEXT: &str = "🤖 Bot Commands:

/createpoll - Create a new poll
/createtask - Create a new task
/creategiveaway - Host a giveaway
/getreferral - Generate your referral link
/faq - Learn how to use the bot";

pub const FAQ_TEXT: &str = "📚 FAQ:

- Add the bot to your group or channel.
- Use /createpoll to make polls.
- Use /createtask to create tasks for members.
- Use /creategiveaway to host giveaways.
- Use /getreferral to earn commission through referrals.";

pub fn escape_markdown(text: &str) -> String {
    text.replace("\\", "\\\\")
        .replace("_", "\\_")
        .replace("*", "\\*")
        .replace("[", "\\[")
        .replace("]", "\\]")
        .replace("(", "\\(")
        .replace(")", "\\)")
        .replace("~", "\\~")
        .replace("`", "\\`")
        .replace(">", "\\>")
        .replace("#", "\\#")
        .replace("+", "\\+")
        .replace("-", "\\-")
        .replace("=", "\\=")
        .replace("|", "\\|")
        .replace("{", "\\{")
        .replace("}", "\\}")
        .replace(".", "\\.")
        .replace("!", "\\!")
}

fn bold(text: &str) -> String {
    format!("*{}*", escape_markdown(text))
}

/// MarkdownV2 welcome message with the current market line.
pub fn welcome_text(prices: &PriceSummary) -> String {
    let features = [
        ("Polls", ": Gather opinions or insights from your group with easy-to-create crypto polls."),
        ("Tasks", ": Assign activities like quizzes, sharing content, or creative submissions, and reward members with SOL tokens."),
        ("Giveaways", ": Run fun and automated giveaways to boost participation."),
        ("Referral System", ": Earn commission from transactions initiated by your referred users."),
    ]
    .iter()
    .map(|(name, detail)| format!("{}{}{}", escape_markdown("- "), bold(name), escape_markdown(detail)))
    .collect::<Vec<_>>()
    .join("\n");

    let market = escape_markdown(&format!(
        "BTC: {} | ETH: {} | SOL: {}",
        prices.btc, prices.eth, prices.sol
    ));

    [
        format!(
            "🚀 Welcome to the {}{}\n\n💎 {}{}, {}, and {}{}\n{}",
            bold("Crypto Task Bot"),
            escape_markdown("!"),
            escape_markdown("This bot is your all-in-one tool for managing "),
            bold("polls"),
            bold("tasks"),
            bold("giveaways"),
            escape_markdown(" while rewarding participants with real crypto."),
            escape_markdown(
                "🔗 Boost engagement, run exciting activities, and earn rewards directly within your Telegram group or channel!"
            ),
        ),
        format!("📊 {}:\n{}", bold("Features"), features),
        format!("📈 {}:\n{}", bold("Market Update"), market),
        escape_markdown(
            "Type /help to get started or explore our features. Let's make crypto fun and rewarding!",
        ),
    ]
    .join("\n\n")
}

pub fn referral_link(bot_username: &str, user_id: u64) -> String {
    format!("https://t.me/{}?start={}", bot_username, user_id)
}

pub fn referral_text(bot_username: &str, user_id: u64) -> String {
    format!(
        "🚀 Your Referral Link:\n{}\n\nEarn 2% commission on every transaction!",
        referral_link(bot_username, user_id)
    )
}

pub fn task_created_text(task: &Task) -> String {
    format!(
        "✅ Task Created:\n\nTitle: {}\nDescription: {}\nReward: {} SOL",
        task.title, task.description, task.reward
    )
}

pub fn giveaway_created_text(giveaway: &Giveaway) -> String {
    format!(
        "✅ Giveaway Created:\n\nTitle: {}\nWinners: {}\nReward: {} SOL each",
        giveaway.title, giveaway.winner_count, giveaway.reward_per_winner
    )
}

pub fn store_failure_text(label: &str) -> String {
    format!("⚠️ Could not save the {} right now. Please try again later.", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_embeds_placeholder_prices_when_quotes_fail() {
        let text = welcome_text(&PriceSummary::unavailable());
        assert!(text.contains("BTC: N/A \\| ETH: N/A \\| SOL: N/A"), "{text}");
    }

    #[test]
    fn welcome_escapes_live_prices() {
        let prices = PriceSummary {
            btc: "$67012.5".to_string(),
            eth: "$3120".to_string(),
            sol: "$142.37".to_string(),
        };
        let text = welcome_text(&prices);

        assert!(text.contains("BTC: $67012\\.5 \\| ETH: $3120 \\| SOL: $142\\.37"));
        assert!(text.starts_with("🚀 Welcome to the *Crypto Task Bot*\\!"));
    }

    #[test]
    fn referral_link_carries_the_user_id() {
        assert_eq!(
            referral_link("CryptoTaskBot", 123456789),
            "https://t.me/CryptoTaskBot?start=123456789"
        );
        assert!(referral_text("CryptoTaskBot", 5).contains("https://t.me/CryptoTaskBot?start=5\n"));
    }

    #[test]
    fn confirmations_show_record_fields() {
        let task = Task::new("Share our post", " Repost our tweet", 0.5);
        assert_eq!(
            task_created_text(&task),
            "✅ Task Created:\n\nTitle: Share our post\nDescription:  Repost our tweet\nReward: 0.5 SOL"
        );

        let giveaway = Giveaway::new("Launch Giveaway", 3, 1.5);
        assert_eq!(
            giveaway_created_text(&giveaway),
            "✅ Giveaway Created:\n\nTitle: Launch Giveaway\nWinners: 3\nReward: 1.5 SOL each"
        );
    }
}

use colored::Colorize;
use std::io::{self, Write};
use std::time::Duration;

use crate::wire::{Message, PipelineState, Role, StageStatus};

pub fn print_status(status: StageStatus) {
    let badge = match status {
        StageStatus::Complete => format!("[{}]", status.label()).green().bold(),
        StageStatus::Idle => format!("[{}]", status.label()).dimmed(),
        _ => format!("[{}]", status.label()).yellow().bold(),
    };
    println!("{}", badge);
    io::stdout().flush().ok();
}

fn role_tag(role: Role) -> colored::ColoredString {
    let tag = format!("[{}]", role);
    match role {
        Role::Ceo => tag.magenta().bold(),
        Role::Designer => tag.cyan().bold(),
        Role::Engineer => tag.green().bold(),
        Role::Marketer => tag.yellow().bold(),
        Role::Cfo => tag.blue().bold(),
    }
}

/// Print the expert conversation one message at a time. The pause is pure
/// presentation pacing; the pipeline has already produced the full sequence.
pub fn show_conversation(messages: &[Message], delay: Duration) {
    println!("\n=== EXPERT DISCUSSION ===");
    for m in messages {
        println!("\n{}: {}", role_tag(m.role), m.content);
        io::stdout().flush().ok();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    println!();
}

pub fn print_summary(state: &PipelineState) {
    let name = state
        .business_spec
        .as_ref()
        .map(|s| s.startup.name.as_str())
        .unwrap_or("(unnamed)");
    let tagline = state
        .business_spec
        .as_ref()
        .map(|s| s.startup.tagline.as_str())
        .unwrap_or("");

    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━ Launch Kit ━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!("  {} — {}", name.bold(), tagline);
    println!(
        "  {}: {}   {}: {}   {}: {}",
        "Messages".magenta().bold(),
        state.conversation.len(),
        "Features".cyan().bold(),
        state.landing_page.as_ref().map(|p| p.features.len()).unwrap_or(0),
        "Slides".green().bold(),
        state.pitch_deck.as_ref().map(|d| d.slides.len()).unwrap_or(0),
    );
    println!(
        "  {}: {}   {}: {}   {}: {}",
        "Tweets".yellow().bold(),
        state.marketing_assets.as_ref().map(|m| m.tweets.len()).unwrap_or(0),
        "Emails".blue().bold(),
        state.marketing_assets.as_ref().map(|m| m.email_sequence.len()).unwrap_or(0),
        "Ads".red().bold(),
        state.marketing_assets.as_ref().map(|m| m.ad_copy.len()).unwrap_or(0),
    );
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}

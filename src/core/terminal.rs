use console::{Emoji, style};

/// Outcome shown in front of a line of `check` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Missing,
    Failed,
}

fn render(mark: Mark, msg: &str) -> String {
    match mark {
        Mark::Ok => format!("{} {}", Emoji("✅", "[ok]"), style(msg).green()),
        Mark::Missing => format!("{} {}", Emoji("⚠️ ", "[--]"), style(msg).yellow()),
        Mark::Failed => format!("{} {}", Emoji("❌", "[!!]"), style(msg).red().bold()),
    }
}

/// Failures go to stderr, everything else to stdout.
pub fn report(mark: Mark, msg: &str) {
    let line = render(mark, msg);
    if mark == Mark::Failed {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

pub fn heading(title: &str) {
    println!("{}\n", style(title).bold().underlined());
}

pub fn setting(label: &str, value: &str) {
    println!("    {:<15} {}", style(label).cyan(), value);
}

/// Shows the first and last characters of a secret.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}****{}", head, tail)
    }
}

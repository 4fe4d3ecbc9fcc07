use calcvault::api::{CmdMessage, DisplayNote, MessageLevel};
use calcvault::report::Reporter;
use chrono::{DateTime, Utc};
use colored::Colorize;
use log::error;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 50;

/// Notices go to stderr so they never mix with listed output.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn notify_user(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }

    fn log_error(&self, detail: &str) {
        error!("{}", detail);
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_notes(notes: &[DisplayNote]) {
    for dn in notes {
        let idx_str = format!("{}. ", dn.index);
        let preview: String = dn
            .note
            .text
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let line = format!("{} {}", dn.note.title, preview);

        let available = LINE_WIDTH.saturating_sub(4 + idx_str.width() + 2 + TIME_WIDTH);
        let shown = truncate_to_width(&line, available);
        let padding = available.saturating_sub(shown.width());

        let time_ago = dn
            .note
            .created_at
            .map(format_time_ago)
            .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

        println!(
            "    {}{}{}  {}",
            idx_str,
            shown,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

/// Cuts `s` to at most `max_width` columns, ending in `…` when shortened.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Sum 2+2", 20), "Sum 2+2");
        assert_eq!(truncate_to_width("exact", 5), "exact");
    }

    #[test]
    fn long_text_ends_with_ellipsis() {
        let cut = truncate_to_width("abcdefghij", 5);
        assert_eq!(cut, "abcd…");
        assert_eq!(cut.width(), 5);
    }

    #[test]
    fn wide_chars_count_double() {
        let cut = truncate_to_width("日本語のノート", 6);
        assert!(cut.width() <= 6);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now());
        assert_eq!(s.len(), TIME_WIDTH);
        assert!(s.trim_start().ends_with("ago") || s.trim_start().ends_with("now"));
    }
}

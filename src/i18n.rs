//! English/Japanese phrases for reminders and deadline labels.

use crate::types::Language;

pub fn today(language: Language) -> &'static str {
    match language {
        Language::En => "Today",
        Language::Ja => "当日",
    }
}

pub fn due_today(language: Language) -> &'static str {
    match language {
        Language::En => "Due today",
        Language::Ja => "本日納品",
    }
}

pub fn expired(language: Language) -> &'static str {
    match language {
        Language::En => "Expired",
        Language::Ja => "期限切れ",
    }
}

pub fn not_set(language: Language) -> &'static str {
    match language {
        Language::En => "Not set",
        Language::Ja => "未設定",
    }
}

pub fn current_remaining_time(language: Language) -> &'static str {
    match language {
        Language::En => "Time remaining",
        Language::Ja => "現在の残り時間",
    }
}

/// "3 days before" / "3日前"
pub fn days_before(language: Language, days: u32) -> String {
    match language {
        Language::En if days == 1 => "1 day before".to_string(),
        Language::En => format!("{days} days before"),
        Language::Ja => format!("{days}日前"),
    }
}

/// "3 days left" / "残り3日"
pub fn days_left(language: Language, days: i64) -> String {
    match language {
        Language::En if days == 1 => "1 day left".to_string(),
        Language::En => format!("{days} days left"),
        Language::Ja => format!("残り{days}日"),
    }
}

/// Sentence terminator after the reminder headline.
fn full_stop(language: Language) -> &'static str {
    match language {
        Language::En => ".",
        Language::Ja => "。",
    }
}

/// Reminder text sent to Discord and shown in-app.
///
/// `threshold` is the configured days-before value that fired, `diff_days`
/// the whole days left until the deadline (negative once expired).
pub fn reminder_message(language: Language, title: &str, threshold: u32, diff_days: i64) -> String {
    let when = if threshold == 0 {
        today(language).to_string()
    } else {
        days_before(language, threshold)
    };
    let remaining = match diff_days {
        d if d < 0 => expired(language).to_string(),
        0 => today(language).to_string(),
        d => days_left(language, d),
    };
    format!(
        "🔔 【{title}】 {when}{}\n({}: {remaining})",
        full_stop(language),
        current_remaining_time(language)
    )
}

pub fn job_completed_message(language: Language, title: &str) -> String {
    match language {
        Language::En => format!("✅ 【{title}】 has been completed!"),
        Language::Ja => format!("✅ 【{title}】 が完了しました！"),
    }
}

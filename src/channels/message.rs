use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::db::DbReminder;

/// `zh-CN` locale rendering: `2024/1/5 08:03:09`.
const DISPLAY_TIME_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

pub fn format_display_time(time: DateTime<Utc>, tz: Tz) -> String {
    time.with_timezone(&tz).format(DISPLAY_TIME_FORMAT).to_string()
}

/// Text pushed to every channel for a reminder.
pub fn reminder_text(reminder: &DbReminder, tz: Tz) -> String {
    format!(
        "🔔 提醒：{}\n\n{}\n\n⏰ 提醒时间：{}",
        reminder.title,
        reminder.content,
        format_display_time(reminder.remind_time, tz)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ReminderStatus;
    use chrono::TimeZone;

    fn sample() -> DbReminder {
        DbReminder {
            id: "r-1".to_string(),
            title: "Stand-up".to_string(),
            content: "Bring the release notes".to_string(),
            remind_time: Utc.with_ymd_and_hms(2024, 1, 5, 0, 3, 9).unwrap(),
            status: ReminderStatus::Sent,
            cron_job_id: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            sent_at: None,
        }
    }

    #[test]
    fn display_time_drops_leading_zeros_on_date_only() {
        let t = Utc.with_ymd_and_hms(2024, 1, 5, 8, 3, 9).unwrap();
        assert_eq!(format_display_time(t, Tz::UTC), "2024/1/5 08:03:09");
    }

    #[test]
    fn display_time_applies_timezone() {
        let t = Utc.with_ymd_and_hms(2024, 1, 5, 20, 0, 0).unwrap();
        assert_eq!(
            format_display_time(t, chrono_tz::Asia::Shanghai),
            "2024/1/6 04:00:00"
        );
    }

    #[test]
    fn reminder_text_layout() {
        assert_eq!(
            reminder_text(&sample(), Tz::UTC),
            "🔔 提醒：Stand-up\n\nBring the release notes\n\n⏰ 提醒时间：2024/1/5 00:03:09"
        );
    }
}

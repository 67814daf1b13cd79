use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::model::{MarketingPost, PostStatus};

/// Longest window the scheduler shows at once.
pub const MAX_WINDOW_DAYS: u32 = 62;

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub posts: Vec<MarketingPost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketingSchedule {
    pub from: NaiveDate,
    pub days: Vec<ScheduleDay>,
    /// Drafts without a publication slot.
    pub unscheduled: Vec<MarketingPost>,
}

/// Posts with a slot in `[from, from + days)`, grouped per day and ordered
/// by time. `days` is clamped to `1..=MAX_WINDOW_DAYS`; the window stops
/// early at the last representable date.
pub fn schedule_window(posts: &[MarketingPost], from: NaiveDate, days: u32) -> MarketingSchedule {
    let days = days.clamp(1, MAX_WINDOW_DAYS);

    let schedule = (0..i64::from(days))
        .map_while(|offset| from.checked_add_signed(Duration::days(offset)))
        .map(|date| {
            let mut posts: Vec<MarketingPost> = posts
                .iter()
                .filter(|post| {
                    post.scheduled_for
                        .map(|slot| slot.date_naive() == date)
                        .unwrap_or(false)
                })
                .cloned()
                .collect();
            posts.sort_by_key(|post| post.scheduled_for);
            ScheduleDay { date, posts }
        })
        .collect();

    let unscheduled = posts
        .iter()
        .filter(|post| post.scheduled_for.is_none() && post.status == PostStatus::Draft)
        .cloned()
        .collect();

    MarketingSchedule {
        from,
        days: schedule,
        unscheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MarketingChannel, MarketingPostDraft, Record, RecordId};
    use chrono::{TimeZone, Utc};

    fn post(title: &str, slot: Option<(u32, u32)>, status: PostStatus) -> MarketingPost {
        MarketingPost::from_draft(
            RecordId::generate(),
            Utc::now(),
            MarketingPostDraft {
                title: title.to_string(),
                channel: MarketingChannel::Instagram,
                status,
                scheduled_for: slot
                    .map(|(day, hour)| Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()),
                body: None,
                asset_url: None,
            },
        )
    }

    #[test]
    fn groups_posts_per_day_in_time_order() {
        let posts = vec![
            post("Evening reel", Some((19, 20)), PostStatus::Scheduled),
            post("Morning story", Some((19, 8)), PostStatus::Scheduled),
            post("Next week", Some((27, 9)), PostStatus::Scheduled),
            post("Idea", None, PostStatus::Draft),
        ];
        let from = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let schedule = schedule_window(&posts, from, 7);
        assert_eq!(schedule.days.len(), 7);
        let titles: Vec<_> = schedule.days[0]
            .posts
            .iter()
            .map(|post| post.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Morning story", "Evening reel"]);
        assert!(schedule.days.iter().skip(1).all(|day| day.posts.is_empty()));
        assert_eq!(schedule.unscheduled.len(), 1);
    }

    #[test]
    fn window_length_is_clamped() {
        let from = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert_eq!(schedule_window(&[], from, 0).days.len(), 1);
        assert_eq!(
            schedule_window(&[], from, 500).days.len(),
            MAX_WINDOW_DAYS as usize
        );
    }

    #[test]
    fn window_stops_at_the_last_calendar_date() {
        let schedule = schedule_window(&[], NaiveDate::MAX, 5);
        assert_eq!(schedule.days.len(), 1);
        assert_eq!(schedule.days[0].date, NaiveDate::MAX);
    }
}

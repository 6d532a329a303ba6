//! Wall clock kept in step with the phone.
//!
//! The phone pushes unix time plus its UTC offset; between syncs the local
//! time is extrapolated from the monotonic millisecond counter.

use core::fmt::Write;

use heapless::String;
use jiff::civil::DateTime;
use jiff::tz::Offset;
use jiff::Timestamp;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Copy, Debug)]
struct SyncPoint {
    unix_secs: u32,
    utc_offset_secs: i32,
    at_ms: u32,
}

/// Phone-synced wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock {
    synced: Option<SyncPoint>,
}

/// Local civil time, formatted for the clock screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalTime(DateTime);

impl WallClock {
    pub const fn new() -> Self {
        Self { synced: None }
    }

    /// Anchor the clock to a phone time sync received at `now_ms`.
    pub fn sync(&mut self, unix_secs: u32, utc_offset_secs: i32, now_ms: u32) {
        self.synced = Some(SyncPoint {
            unix_secs,
            utc_offset_secs,
            at_ms: now_ms,
        });
    }

    pub fn is_synced(&self) -> bool {
        self.synced.is_some()
    }

    /// Fold the whole seconds elapsed since the anchor into it.
    ///
    /// The millisecond counter wraps every ~49.7 days; extrapolation is
    /// only correct while less than one wrap separates anchor and query.
    pub fn advance(&mut self, now_ms: u32) {
        if let Some(sync) = &mut self.synced {
            let secs = now_ms.wrapping_sub(sync.at_ms) / 1000;
            sync.unix_secs = sync.unix_secs.saturating_add(secs);
            sync.at_ms = sync.at_ms.wrapping_add(secs * 1000);
        }
    }

    /// Local time at `now_ms`, or `None` before the first sync or when the
    /// synced offset is out of range.
    pub fn local_time(&self, now_ms: u32) -> Option<LocalTime> {
        let sync = self.synced?;
        let elapsed_secs = i64::from(now_ms.wrapping_sub(sync.at_ms) / 1000);
        let ts = Timestamp::from_second(i64::from(sync.unix_secs) + elapsed_secs).ok()?;
        let offset = Offset::from_seconds(sync.utc_offset_secs).ok()?;
        Some(LocalTime(offset.to_datetime(ts)))
    }
}

impl LocalTime {
    pub fn datetime(&self) -> DateTime {
        self.0
    }

    /// 12-hour, zero-padded `hh:MM`.
    pub fn time_text(&self) -> String<8> {
        let hour12 = match self.0.hour() % 12 {
            0 => 12,
            h => h,
        };
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}", hour12, self.0.minute());
        s
    }

    /// Short date, e.g. `Oct 17`.
    pub fn date_text(&self) -> String<8> {
        let month = MONTHS[(self.0.month().clamp(1, 12) - 1) as usize];
        let mut s = String::new();
        let _ = write!(s, "{} {:02}", month, self.0.day());
        s
    }
}

impl From<DateTime> for LocalTime {
    fn from(datetime: DateTime) -> Self {
        Self(datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn synced_at(unix_secs: u32, utc_offset_secs: i32, now_ms: u32) -> WallClock {
        let mut clock = WallClock::new();
        clock.sync(unix_secs, utc_offset_secs, now_ms);
        clock
    }

    #[test]
    fn epoch_is_first_of_january_1970() {
        let t = synced_at(0, 0, 0).local_time(0).unwrap();
        assert_eq!(t.datetime(), date(1970, 1, 1).at(0, 0, 0, 0));
    }

    #[test]
    fn leap_day_is_decoded() {
        // 2024-02-29 13:45:10 UTC
        let t = synced_at(1_709_214_310, 0, 0).local_time(0).unwrap();
        assert_eq!(t.datetime(), date(2024, 2, 29).at(13, 45, 10, 0));
    }

    #[test]
    fn time_text_is_twelve_hour_zero_padded() {
        let day = date(2026, 10, 17);
        let text = |h, m| LocalTime::from(day.at(h, m, 0, 0)).time_text();
        assert_eq!(text(0, 0).as_str(), "12:00");
        assert_eq!(text(9, 5).as_str(), "09:05");
        assert_eq!(text(12, 5).as_str(), "12:05");
        assert_eq!(text(23, 59).as_str(), "11:59");
    }

    #[test]
    fn date_text_uses_short_month() {
        let t = synced_at(1_792_195_200, 0, 0).local_time(0).unwrap(); // 2026-10-17 00:00 UTC
        assert_eq!(t.date_text().as_str(), "Oct 17");
        let t = LocalTime::from(date(2027, 1, 3).at(8, 0, 0, 0));
        assert_eq!(t.date_text().as_str(), "Jan 03");
    }

    #[test]
    fn unsynced_clock_has_no_time() {
        let clock = WallClock::new();
        assert!(!clock.is_synced());
        assert!(clock.local_time(5_000).is_none());
    }

    #[test]
    fn synced_clock_applies_offset_and_advances() {
        // 2024-02-29 13:45:10 UTC, phone at UTC+02:00, synced at t=10 s.
        let clock = synced_at(1_709_214_310, 7_200, 10_000);

        let t = clock.local_time(10_000).unwrap().datetime();
        assert_eq!((t.hour(), t.minute(), t.second()), (15, 45, 10));

        let later = clock.local_time(10_000 + 65_000).unwrap().datetime();
        assert_eq!((later.hour(), later.minute(), later.second()), (15, 46, 15));
    }

    #[test]
    fn negative_offset_crosses_midnight_backwards() {
        // 2026-10-17 02:00 UTC at UTC-05:00 is still the 16th.
        let t = synced_at(1_792_202_400, -18_000, 0).local_time(0).unwrap();
        assert_eq!(t.datetime(), date(2026, 10, 16).at(21, 0, 0, 0));
    }

    #[test]
    fn out_of_range_offset_reads_as_unsynced() {
        let clock = synced_at(1_709_214_310, 100 * 3600, 0);
        assert!(clock.is_synced());
        assert!(clock.local_time(0).is_none());
    }

    #[test]
    fn advancing_keeps_time_across_counter_wrap() {
        let mut clock = synced_at(1_700_000_000, 0, 0);
        clock.advance(3_000_000_000);
        // 5_000_000 s after the sync, the counter has wrapped once.
        let now = 3_000_000_000u32.wrapping_add(2_000_000_000);
        let expected = synced_at(1_705_000_000, 0, 0).local_time(0).unwrap();
        assert_eq!(clock.local_time(now), Some(expected));
    }

    #[test]
    fn advance_preserves_sub_second_phase() {
        let mut clock = synced_at(1_700_000_000, 0, 400);
        clock.advance(2_100);
        // 1.7 s folded as 1 s; the remaining 0.7 s still counts.
        assert_eq!(
            clock.local_time(2_700),
            synced_at(1_700_000_002, 0, 0).local_time(0)
        );
    }
}

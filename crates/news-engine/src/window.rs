use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone};

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Korea Standard Time, the zone every window comparison happens in
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+09:00 is a valid offset")
}

/// Recurring overnight window: previous day `start` through reference day `end`,
/// both inclusive, in a fixed zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvernightWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub zone: FixedOffset,
}

impl OvernightWindow {
    pub fn new(start: NaiveTime, end: NaiveTime, zone: FixedOffset) -> Self {
        Self { start, end, zone }
    }

    /// Window boundaries for `reference_day`, or None at the edge of the calendar
    pub fn bounds(
        &self,
        reference_day: NaiveDate,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let previous_day = reference_day.checked_sub_days(Days::new(1))?;
        let start = self
            .zone
            .from_local_datetime(&previous_day.and_time(self.start))
            .single()?;
        let end = self
            .zone
            .from_local_datetime(&reference_day.and_time(self.end))
            .single()?;
        Some((start, end))
    }

    pub fn accepts<Tz: TimeZone>(
        &self,
        published: &DateTime<Tz>,
        reference_day: NaiveDate,
    ) -> bool {
        let Some((start, end)) = self.bounds(reference_day) else {
            return false;
        };
        let published = published.with_timezone(&self.zone);
        start <= published && published <= end
    }
}

impl Default for OvernightWindow {
    /// 15:30 KST the day before through 08:30 KST on the reference day
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(15, 30, 0).expect("15:30 is a valid time"),
            end: NaiveTime::from_hms_opt(8, 30, 0).expect("08:30 is a valid time"),
            zone: kst(),
        }
    }
}

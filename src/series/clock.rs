use chrono::{Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// An hourly clock that yields a fixed number of wall-clock timestamps.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use city_demand_sim::series::clock::HourClock;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .and_then(|d| d.and_hms_opt(22, 0, 0))
///     .unwrap();
/// let mut clock = HourClock::new(start, 3);
/// let mut hours = Vec::new();
///
/// clock.run(|_, ts| hours.push(ts.format("%d %H").to_string()));
/// assert_eq!(hours, vec!["01 22", "01 23", "02 00"]);
/// ```
pub struct HourClock {
    /// Timestamp the next tick yields
    current: NaiveDateTime,
    /// Ticks already yielded
    step: usize,
    /// Total ticks to yield
    total: usize,
}

impl HourClock {
    /// Creates a clock starting at `start` that ticks `total` times.
    pub fn new(start: NaiveDateTime, total: usize) -> Self {
        Self {
            current: start,
            step: 0,
            total,
        }
    }

    /// Advances by one hour.
    ///
    /// # Returns
    ///
    /// * `Some((step, timestamp))` - Step index (from 0) and its timestamp
    /// * `None` - If all ticks have been yielded
    pub fn tick(&mut self) -> Option<(usize, NaiveDateTime)> {
        if self.step < self.total {
            let out = (self.step, self.current);
            self.step += 1;
            self.current += Duration::hours(1);
            Some(out)
        } else {
            None
        }
    }

    /// Calls `f` for every remaining tick.
    pub fn run(&mut self, mut f: impl FnMut(usize, NaiveDateTime)) {
        while let Some((step, ts)) = self.tick() {
            f(step, ts);
        }
    }
}

/// Drops minutes, seconds and sub-seconds.
pub fn truncate_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date()
        .and_hms_opt(ts.hour(), 0, 0)
        .unwrap_or(ts)
}

/// Current local wall-clock time truncated to the hour.
pub fn current_hour() -> NaiveDateTime {
    truncate_to_hour(Local::now().naive_local())
}

/// Midnight `days` calendar days before the day containing `now`.
///
/// A window of `days * 24` hourly steps starting here covers the `days`
/// complete days preceding `now`'s day.
pub fn day_window_start(now: NaiveDateTime, days: usize) -> NaiveDateTime {
    now.date()
        .checked_sub_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

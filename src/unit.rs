/// Time units accepted by elapsed-time queries and shift operations.
///
/// Ordered from finest to coarsest, so units can be compared
/// (`TimeUnit::Microseconds < TimeUnit::Seconds`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub(crate) const fn nanos_per_unit(self) -> i64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60_000_000_000,
            TimeUnit::Hours => 3_600_000_000_000,
            TimeUnit::Days => 86_400_000_000_000,
        }
    }

    /// Convert a value in this unit to nanoseconds, saturating at the i64
    /// range instead of wrapping.
    pub fn to_nanos(self, value: i64) -> i64 {
        value.saturating_mul(self.nanos_per_unit())
    }

    /// Convert a value in this unit to milliseconds. Conversion to a coarser
    /// unit truncates toward zero; to a finer one it saturates.
    pub fn to_millis(self, value: i64) -> i64 {
        let per = self.nanos_per_unit();
        let ms = TimeUnit::Milliseconds.nanos_per_unit();
        if per < ms {
            value / (ms / per)
        } else {
            value.saturating_mul(per / ms)
        }
    }

    /// Convert a nanosecond count into this unit, truncating toward zero.
    pub fn from_nanos(self, ns: i64) -> i64 {
        ns / self.nanos_per_unit()
    }

    /// Convert a microsecond count into this unit. Only the nanosecond target
    /// can overflow, in which case the result saturates.
    pub fn from_micros(self, us: i64) -> i64 {
        match self {
            TimeUnit::Nanoseconds => us.saturating_mul(1_000),
            coarser => us / (coarser.nanos_per_unit() / 1_000),
        }
    }
}

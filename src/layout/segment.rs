use chrono::{DateTime, Duration, FixedOffset};

use crate::foundation::core::{SourcedInfo, same_day};

/// Maximum gap between consecutive album items of one event.
pub const ALBUM_EVENT_GAP: Duration = Duration::hours(1);

/// Maximum gap between consecutive timeline items of one event.
pub const TIMELINE_EVENT_GAP: Duration = Duration::minutes(30);

/// Time ordering of the stream being segmented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Oldest first; gap is `next - previous`.
    Ascending,
    /// Newest first; gap is `previous - next`.
    Descending,
}

/// Ordered items of one event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub infos: Vec<SourcedInfo>,
}

impl Section {
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

/// A burst of items separated from its neighbours by more than the gap threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Earliest capture time in the event.
    pub start_time: DateTime<FixedOffset>,
    /// Latest capture time in the event.
    pub end_time: DateTime<FixedOffset>,
    /// First event of the stream.
    pub first: bool,
    /// The opening item is on a different calendar day than the item before it.
    pub first_on_day: bool,
    /// The closing item is on a different calendar day than the item after it, or is the last item.
    pub last_on_day: bool,
    /// Gap that opened this event, `None` for the first event.
    pub elapsed: Option<Duration>,
    pub section: Section,
}

impl Event {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Lazy event segmentation over an ordered metadata stream.
///
/// At most `limit` items are pulled from the inner iterator (`0` for no limit); the event in
/// progress when the limit is hit is still yielded.
pub struct EventSegmenter<I> {
    inner: I,
    direction: Direction,
    threshold: Duration,
    limit: usize,
    taken: usize,
    pending: Option<SourcedInfo>,
    last_time: Option<DateTime<FixedOffset>>,
    emitted: usize,
    done: bool,
}

impl<I> EventSegmenter<I>
where
    I: Iterator<Item = SourcedInfo>,
{
    pub fn new(inner: I, direction: Direction, threshold: Duration, limit: usize) -> Self {
        Self {
            inner,
            direction,
            threshold,
            limit,
            taken: 0,
            pending: None,
            last_time: None,
            emitted: 0,
            done: false,
        }
    }

    /// Number of items accepted from the inner iterator so far.
    pub fn taken(&self) -> usize {
        self.taken
    }

    fn pull(&mut self) -> Option<SourcedInfo> {
        if self.limit > 0 && self.taken >= self.limit {
            return None;
        }
        let next = self.inner.next()?;
        self.taken += 1;
        Some(next)
    }

    fn gap(&self, previous: DateTime<FixedOffset>, next: DateTime<FixedOffset>) -> Duration {
        match self.direction {
            Direction::Ascending => next - previous,
            Direction::Descending => previous - next,
        }
    }
}

impl<I> Iterator for EventSegmenter<I>
where
    I: Iterator<Item = SourcedInfo>,
{
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.done {
            return None;
        }
        let opener = match self.pending.take() {
            Some(info) => info,
            None => match self.pull() {
                Some(info) => info,
                None => {
                    self.done = true;
                    return None;
                }
            },
        };

        let opener_time = opener.date_time();
        let (first_on_day, elapsed) = match self.last_time {
            None => (true, None),
            Some(prev) => (!same_day(prev, opener_time), Some(self.gap(prev, opener_time))),
        };

        let mut infos = vec![opener];
        let mut prev = opener_time;
        let last_on_day = loop {
            let Some(next) = self.pull() else {
                self.done = true;
                break true;
            };
            let next_time = next.date_time();
            if self.gap(prev, next_time) > self.threshold {
                self.pending = Some(next);
                break !same_day(prev, next_time);
            }
            infos.push(next);
            prev = next_time;
        };
        self.last_time = Some(prev);

        let first = self.emitted == 0;
        self.emitted += 1;
        Some(Event {
            start_time: opener_time.min(prev),
            end_time: opener_time.max(prev),
            first,
            first_on_day,
            last_on_day,
            elapsed,
            section: Section { infos },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/segment.rs"]
mod tests;

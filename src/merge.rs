//! Merges the events of every source into one chronological timeline.

use crate::event::Event;

/// Flattens per-source event lists into a single sequence sorted by timestamp.
///
/// Events sharing a timestamp are ordered by their raw line text, and
/// identical lines keep their encounter order. The result is therefore the
/// same for any partition of the same lines across sources and for any
/// source enumeration order.
pub fn merge_chronological<I>(sources: I) -> Vec<Event>
where
    I: IntoIterator<Item = Vec<Event>>,
{
    let mut events: Vec<Event> = sources.into_iter().flatten().collect();
    sort_chronological(&mut events);
    events
}

/// Stable sort on `(timestamp, raw)`.
pub fn sort_chronological(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.raw.cmp(&b.raw))
    });
}

//! Collect every occurrence of an event before a cutoff date.

use crate::civil;
use crate::error::Result;
use crate::event::Event;
use chrono::NaiveDate;

impl<I: Clone> Event<I> {
    /// All occurrences strictly before local midnight of `date`
    /// (`YYYY-MM-DD`, in the event's zone), in chronological order.
    ///
    /// An occurrence on `date` itself is not included. This event is left
    /// untouched.
    pub fn all_before(&self, date: &str) -> Result<Vec<Self>> {
        Ok(self.all_before_date(civil::parse_date(date)?))
    }

    pub fn all_before_date(&self, date: NaiveDate) -> Vec<Self> {
        let cutoff = civil::start_of_day(date, self.timezone()).timestamp();

        let mut out = Vec::new();
        let mut cursor = self.clone();
        loop {
            // Two at a time: the second tells us whether to keep going.
            let mut pair = cursor.next(2).into_iter();
            let Some(current) = pair.next() else {
                break;
            };
            if current.timestamp() >= cutoff {
                break;
            }
            out.push(current);

            match pair.next() {
                Some(following) if following.timestamp() < cutoff => cursor = following,
                _ => break,
            }
        }
        out
    }
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::CalendarDate;
use crate::prelude::*;

/// Dates that can never become selected or highlighted.
///
/// Membership is by canonical key, which for [`CalendarDate`] is plain equality.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, From)]
#[serde(transparent)]
pub struct DisabledSet(HashSet<CalendarDate>);

impl DisabledSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.0.contains(&date)
    }

    pub fn insert(&mut self, date: CalendarDate) -> bool {
        self.0.insert(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CalendarDate> for DisabledSet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a CalendarDate> for DisabledSet {
    fn from_iter<I: IntoIterator<Item = &'a CalendarDate>>(iter: I) -> Self {
        Self(iter.into_iter().copied().collect())
    }
}

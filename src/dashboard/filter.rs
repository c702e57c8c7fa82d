use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::models::{Category, Division, Transaction};

/// A filter dropdown: either everything, or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq + Copy> Selector<T> {
    pub(crate) fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Step through `All` followed by each option, wrapping at either end.
    pub(crate) fn cycle(self, options: &[T], delta: i32) -> Self {
        let len = options.len() as i32 + 1;
        let current = match self {
            Self::All => 0,
            Self::Only(v) => options
                .iter()
                .position(|o| *o == v)
                .map_or(0, |i| i as i32 + 1),
        };
        let next = (current + delta).rem_euclid(len);
        if next == 0 {
            Self::All
        } else {
            options
                .get(next as usize - 1)
                .copied()
                .map_or(Self::All, Self::Only)
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(v) => write!(f, "{v}"),
        }
    }
}

impl Selector<Division> {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Division::parse(s).map(Self::Only)
    }
}

impl Selector<Category> {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Category::parse(s).map(Self::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FilterCriteria {
    pub(crate) division: Selector<Division>,
    pub(crate) category: Selector<Category>,
    pub(crate) start_date: Option<NaiveDate>,
    pub(crate) end_date: Option<NaiveDate>,
}

/// A single change to the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterChange {
    Division(Selector<Division>),
    Category(Selector<Category>),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Clear,
}

impl FilterCriteria {
    pub(crate) fn apply_change(&mut self, change: FilterChange) {
        match change {
            FilterChange::Division(d) => self.division = d,
            FilterChange::Category(c) => self.category = c,
            FilterChange::StartDate(d) => self.start_date = d,
            FilterChange::EndDate(d) => self.end_date = d,
            FilterChange::Clear => *self = Self::default(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        *self != Self::default()
    }

    /// The date range only applies once both bounds are set. The end bound
    /// covers the whole of its day.
    pub(crate) fn date_in_range(&self, date: &NaiveDateTime) -> bool {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return true;
        };
        let from = start.and_time(chrono::NaiveTime::MIN);
        match end.checked_add_days(Days::new(1)) {
            Some(next_day) => *date >= from && *date < next_day.and_time(chrono::NaiveTime::MIN),
            None => *date >= from,
        }
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        self.division.matches(&txn.division)
            && self.category.matches(&txn.category)
            && self.date_in_range(&txn.date)
    }
}

/// Derive the visible rows. Never reorders or copies the canonical list.
pub(crate) fn apply<'a>(transactions: &'a [Transaction], criteria: &FilterCriteria) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| criteria.matches(t)).collect()
}

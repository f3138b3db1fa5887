use std::cell::RefCell;
use std::rc::Rc;

use crate::{CalendarDate, Locale, TodayLabel, WeekStart};

pub fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).expect("valid test date")
}

/// Shared log that hook closures push into and tests read back.
#[derive(Debug)]
pub struct Recorder<T>(Rc<RefCell<Vec<T>>>);

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self(Rc::default())
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Clone> Recorder<T> {
    pub fn push(&self, value: T) {
        self.0.borrow_mut().push(value);
    }

    /// Drains everything recorded so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| (*name).to_owned()).collect()
}

/// French tables with a Monday week start.
pub fn french() -> Locale {
    Locale {
        name: "fr".to_owned(),
        header_format: "dddd, Do MMM".to_owned(),
        months: names(&[
            "Janvier",
            "Fevrier",
            "Mars",
            "Avril",
            "Mai",
            "Juin",
            "Juillet",
            "Aout",
            "Septembre",
            "Octobre",
            "Novembre",
            "Decembre",
        ]),
        months_short: names(&[
            "Janv", "Fevr", "Mars", "Avr", "Mai", "Juin", "Juil", "Aout", "Sept", "Oct", "Nov", "Dec",
        ]),
        weekdays: names(&["Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi"]),
        weekdays_short: names(&["Dim", "Lun", "Mar", "Mer", "Jeu", "Ven", "Sam"]),
        blank: "Aucune date selectionnee".to_owned(),
        today_label: TodayLabel {
            long:  "Aujourd'hui".to_owned(),
            short: "Auj.".to_owned(),
        },
        week_start: WeekStart::MONDAY,
    }
}

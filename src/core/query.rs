//! Lookups over a loaded dataset.
//!
//! These follow the accessor functions emitted into the JavaScript artifact
//! (`getCategories`, `getPriceHistory`, ...). Lookup arguments are compared
//! with string cells only, as `===` does in the browser: a numeric `date` or
//! `category` cell never matches.

use std::collections::BTreeSet;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use super::schema::{CATEGORY, DATE, Dataset, PRODUCT, Record};

/// Parse a `date_full` value into a sortable timestamp.
///
/// Accepts RFC 3339 (normalised to UTC), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`.
pub fn parse_date_full(text: &str) -> Option<PrimitiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = OffsetDateTime::parse(text, &Rfc3339) {
        let utc = dt.to_offset(UtcOffset::UTC);
        return Some(PrimitiveDateTime::new(utc.date(), utc.time()));
    }
    PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .ok()
    .or_else(|| {
        Date::parse(text, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(Date::midnight)
    })
}

fn is_pair(record: &Record, category: &str, product: &str) -> bool {
    record.str_value(CATEGORY) == Some(category) && record.str_value(PRODUCT) == Some(product)
}

/// Read-only query view over a dataset.
#[derive(Debug, Clone, Copy)]
pub struct PriceQuery<'a> {
    dataset: &'a Dataset,
}

impl<'a> PriceQuery<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        PriceQuery { dataset }
    }

    /// Every record, in load order.
    pub fn price_data(&self) -> &'a [Record] {
        self.dataset.records()
    }

    /// Distinct categories, sorted ascending.
    pub fn categories(&self) -> Vec<String> {
        self.distinct(self.dataset.records().iter(), |r| r.category().map(|c| c.into_owned()))
    }

    /// Distinct products, sorted ascending.
    pub fn products(&self) -> Vec<String> {
        self.distinct(self.dataset.records().iter(), |r| r.product().map(|p| p.into_owned()))
    }

    /// Distinct products listed under `category`, sorted ascending.
    pub fn products_by_category(&self, category: &str) -> Vec<String> {
        let rows = self
            .dataset
            .records()
            .iter()
            .filter(|r| r.str_value(CATEGORY) == Some(category));
        self.distinct(rows, |r| r.product().map(|p| p.into_owned()))
    }

    /// Records for one category/product pair, oldest `date_full` first.
    ///
    /// The sort is stable; rows whose `date_full` does not parse come first in
    /// their original order.
    pub fn price_history(&self, category: &str, product: &str) -> Vec<&'a Record> {
        let mut history: Vec<&'a Record> = self
            .dataset
            .records()
            .iter()
            .filter(|r| is_pair(r, category, product))
            .collect();
        history.sort_by_key(|r| r.date_full().and_then(|d| parse_date_full(&d)));
        history
    }

    /// The newest record of [`Self::price_history`], if any.
    pub fn latest_price(&self, category: &str, product: &str) -> Option<&'a Record> {
        self.price_history(category, product).pop()
    }

    /// First record matching category, product and display date exactly.
    pub fn price_by_date(&self, category: &str, product: &str, date: &str) -> Option<&'a Record> {
        self.dataset
            .records()
            .iter()
            .find(|r| is_pair(r, category, product) && r.str_value(DATE) == Some(date))
    }

    fn distinct<I, F>(&self, rows: I, key: F) -> Vec<String>
    where
        I: Iterator<Item = &'a Record>,
        F: Fn(&'a Record) -> Option<String>,
    {
        rows.filter_map(key).collect::<BTreeSet<_>>().into_iter().collect()
    }
}

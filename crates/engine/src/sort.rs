//! Sort engine: ordered rule chain + type-aware comparison.
//!
//! The rule list is ordered: position is tie-break precedence, first rule
//! highest. Sorting is stable; when every rule ties, input order is kept.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use trellis_core::{DataType, Record, SortDirection, Value};

/// One link in the sort chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: String,
    pub direction: SortDirection,
    pub data_type: DataType,
}

/// How [`SortSpec::apply`] combines a new rule with the existing chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortUpdate {
    /// The chain becomes this single rule (plain header click).
    Replace,
    /// Extend the chain; an existing rule for the field keeps its
    /// precedence and only changes direction (shift-click).
    Add,
    /// Drop the field's rule, preserving the rest (ctrl-click).
    Remove,
}

/// Ordered list of active sort rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortSpec {
    rules: Vec<SortRule>,
}

impl SortSpec {
    pub fn rules(&self) -> &[SortRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn apply(
        &mut self,
        field: &str,
        direction: SortDirection,
        data_type: DataType,
        update: SortUpdate,
    ) {
        match update {
            SortUpdate::Replace => {
                self.rules = vec![SortRule {
                    field: field.to_string(),
                    direction,
                    data_type,
                }];
            }
            SortUpdate::Add => {
                if let Some(rule) = self.rules.iter_mut().find(|r| r.field == field) {
                    rule.direction = direction;
                } else {
                    self.rules.push(SortRule {
                        field: field.to_string(),
                        direction,
                        data_type,
                    });
                }
            }
            SortUpdate::Remove => {
                self.rules.retain(|r| r.field != field);
            }
        }
    }

    /// Position of the field in the chain (0 = highest precedence).
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.field == field)
    }

    pub fn direction_of(&self, field: &str) -> Option<SortDirection> {
        self.rules
            .iter()
            .find(|r| r.field == field)
            .map(|r| r.direction)
    }

    /// Stable sort of `records` by the rule chain. With an empty chain the
    /// input order is returned unchanged.
    pub fn sorted_view(&self, records: &[Record]) -> Vec<Record> {
        let mut out = records.to_vec();
        if self.rules.is_empty() {
            return out;
        }
        out.sort_by(|a, b| self.compare_records(a, b));
        out
    }

    fn compare_records(&self, a: &Record, b: &Record) -> Ordering {
        for rule in &self.rules {
            let av = a.value_of(&rule.field);
            let bv = b.value_of(&rule.field);
            let mut ord = compare_values(&av, &bv, rule.data_type);
            if rule.direction == SortDirection::Desc {
                ord = ord.reverse();
            }
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Canonical per-value comparator, used for a single field and as one link
/// in the multi-key chain.
///
/// Null handling happens before the direction multiplier: a null value
/// sorts *after* a non-null one, so nulls land last under ascending and
/// first under descending. That asymmetry is intentional.
pub fn compare_values(a: &Value, b: &Value, data_type: DataType) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match data_type {
        DataType::Number => match (a, b) {
            (Value::Number(x), Value::Number(y)) => OrderedFloat(*x).cmp(&OrderedFloat(*y)),
            _ => a.text_key().cmp(&b.text_key()),
        },
        DataType::Text => natural_cmp(&a.text_key(), &b.text_key()),
        DataType::Date => match (a, b) {
            (Value::Date(x), Value::Date(y)) => x.cmp(y),
            _ => a.text_key().cmp(&b.text_key()),
        },
        DataType::Bool => match (a, b) {
            // true sorts before false, prior to the direction multiplier
            (Value::Bool(x), Value::Bool(y)) => match (x, y) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            },
            _ => a.text_key().cmp(&b.text_key()),
        },
        DataType::Select => a.text_key().cmp(&b.text_key()),
    }
}

/// Case-insensitive, numeric-substring-aware string comparison:
/// "item2" < "item10". Case folding is Unicode lowercasing; digit runs
/// compare by numeric value (leading zeros ignored for magnitude).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();

    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let run_a = digit_run(&a, &mut i);
            let run_b = digit_run(&b, &mut j);
            let ord = compare_digit_runs(run_a, run_b);
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = a[i].cmp(&b[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }
    (a.len() - i).cmp(&(b.len() - j))
}

// Advance past the digit run starting at `*pos` and return it.
fn digit_run<'a>(chars: &'a [char], pos: &mut usize) -> &'a [char] {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    &chars[start..*pos]
}

fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    // longer run of significant digits = larger number
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(digits: &[char]) -> &[char] {
    let first = digits.iter().position(|c| *c != '0').unwrap_or(digits.len());
    &digits[first..]
}

//! Comparator engine: orders rows by one column.
//!
//! Sorting works on a permutation of row indices, never on the rows
//! themselves. Each entry is decorated with its position before sorting and
//! that position is the last tie-break, so equal keys keep their input
//! order whatever the underlying sort primitive guarantees.

use std::cmp::Ordering;

use crate::data::{Record, Value};

use super::options::{NullPlacement, SortDirection, SortState};

/// Total order over values.
///
/// Numbers compare numerically across `Int`/`Float`, dates chronologically,
/// text by code point. Values of different kinds order by kind.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::List(xs), Value::List(ys)) => xs
            .iter()
            .zip(ys)
            .map(|(x, y)| compare_values(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| xs.len().cmp(&ys.len())),
        (Value::Object(xs), Value::Object(ys)) => xs
            .iter()
            .zip(ys)
            .map(|((kx, vx), (ky, vy))| kx.cmp(ky).then_with(|| compare_values(vx, vy)))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| xs.len().cmp(&ys.len())),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// Exact `i64` against `f64`, without rounding the integer through `f64`.
/// NaN sorts after every number (before, if negative), as in `total_cmp`.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float past i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64)).then_with(|| {
        if f > whole {
            Ordering::Less
        } else if f < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

/// Compares sort keys for one direction and null placement.
#[derive(Debug, Clone, Copy)]
pub struct RowComparator {
    direction: SortDirection,
    nulls: NullPlacement,
}

impl RowComparator {
    pub fn new(direction: SortDirection, nulls: NullPlacement) -> Self {
        Self { direction, nulls }
    }

    /// Compare two sort keys. `None` and `Null` both count as missing.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let a = a.filter(|v| !v.is_null());
        let b = b.filter(|v| !v.is_null());
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => self.missing_first(),
            (Some(_), None) => self.missing_first().reverse(),
            (Some(x), Some(y)) => {
                let ascending = compare_values(x, y);
                match self.direction {
                    SortDirection::Ascending => ascending,
                    SortDirection::Descending => ascending.reverse(),
                }
            }
        }
    }

    fn missing_first(&self) -> Ordering {
        match self.nulls {
            NullPlacement::First => Ordering::Less,
            NullPlacement::Last => Ordering::Greater,
        }
    }

    /// Compare two rows on `field`.
    pub fn compare_rows<R: Record>(&self, field: &R::Field, a: &R, b: &R) -> Ordering {
        self.compare(a.value(field).as_ref(), b.value(field).as_ref())
    }
}

/// Reorder `indices` (positions into `rows`) by the sort state.
///
/// Leaves `indices` untouched when nothing is sorted.
pub fn sort_indices<R: Record>(
    rows: &[R],
    indices: &mut Vec<usize>,
    sort: &SortState<R::Field>,
    nulls: NullPlacement,
) {
    let Some(field) = &sort.order_by else {
        return;
    };
    let comparator = RowComparator::new(sort.direction, nulls);

    // (input position, row index, key)
    let mut decorated: Vec<(usize, usize, Option<Value>)> = indices
        .iter()
        .enumerate()
        .map(|(pos, &idx)| (pos, idx, rows[idx].value(field)))
        .collect();

    decorated.sort_unstable_by(|a, b| {
        comparator
            .compare(a.2.as_ref(), b.2.as_ref())
            .then(a.0.cmp(&b.0))
    });

    indices.clear();
    indices.extend(decorated.into_iter().map(|(_, idx, _)| idx));
}

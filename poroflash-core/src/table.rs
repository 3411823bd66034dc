//! Piecewise linear property tables.
//!
//! A [PvtTable] stores rows of a fixed number of columns. Any column with
//! strictly increasing entries can be used as the key of a lookup; all
//! other columns are interpolated linearly in the key. Outside of the
//! tabulated range the first or last row is returned with zero slopes.
use crate::parameter::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpolated values of all columns of a table together with
/// their derivatives with respect to the key column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableRow<const N: usize> {
    pub values: [f64; N],
    pub slopes: [f64; N],
}

/// A table with `N` columns and at least one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PvtTable<const N: usize> {
    rows: Vec<[f64; N]>,
}

impl<const N: usize> PvtTable<N> {
    /// Create a table from its rows. The first column has to be strictly increasing.
    pub fn new(rows: Vec<[f64; N]>) -> Result<Self, ParameterError> {
        if rows.is_empty() {
            return Err(ParameterError::InvalidTable(
                format!("{} columns", N),
                "the table has no rows".into(),
            ));
        }
        let table = Self { rows };
        table.check_increasing(0)?;
        Ok(table)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[f64; N]] {
        &self.rows
    }

    /// Make sure column `j` can be used as the key of a lookup.
    pub fn check_increasing(&self, j: usize) -> Result<(), ParameterError> {
        if let Some(i) = self.rows.windows(2).position(|w| w[1][j] <= w[0][j]) {
            return Err(ParameterError::InvalidTable(
                format!("{} columns", N),
                format!(
                    "column {} is not strictly increasing between rows {} and {}",
                    j,
                    i,
                    i + 1
                ),
            ));
        }
        Ok(())
    }

    /// Interpolate all columns at `val` of the key column `j`.
    pub fn eval_all(&self, j: usize, val: f64) -> TableRow<N> {
        let n = self.rows.len();
        let k = self.rows.partition_point(|row| row[j] <= val);
        if k == 0 || k == n {
            let row = if k == 0 { self.rows[0] } else { self.rows[n - 1] };
            return TableRow {
                values: row,
                slopes: [0.0; N],
            };
        }
        let (r0, r1) = (&self.rows[k - 1], &self.rows[k]);
        let dx = r1[j] - r0[j];
        let mut values = [0.0; N];
        let mut slopes = [0.0; N];
        for c in 0..N {
            slopes[c] = (r1[c] - r0[c]) / dx;
            values[c] = r0[c] + slopes[c] * (val - r0[j]);
        }
        TableRow { values, slopes }
    }

    /// Interpolate column `dest` at `val` of the key column `j`.
    pub fn eval(&self, j: usize, val: f64, dest: usize) -> f64 {
        self.eval_all(j, val).values[dest]
    }
}

impl<const N: usize> TryFrom<Vec<Vec<f64>>> for PvtTable<N> {
    type Error = ParameterError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                <[f64; N]>::try_from(row.as_slice()).map_err(|_| {
                    ParameterError::InvalidTable(
                        format!("{} columns", N),
                        format!("row {} has {} entries", i, row.len()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }
}

impl<const N: usize> From<PvtTable<N>> for Vec<Vec<f64>> {
    fn from(table: PvtTable<N>) -> Self {
        table.rows.iter().map(|row| row.to_vec()).collect()
    }
}

impl<const N: usize> fmt::Display for PvtTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|x| format!("{:12.6}", x)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

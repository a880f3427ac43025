use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DistroError {
    #[error("Abscissa has {x_len} values but ordinate has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
}

/// A sampled function spread onto a shared abscissa.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionizedDistros {
    pub x: Vec<f64>,
    pub y1: Vec<f64>,
    pub y2: Vec<f64>,
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), DistroError> {
    if x.len() != y.len() {
        return Err(DistroError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(())
}

/// Spreads the samples `(x, y)` onto `union_x`.
///
/// Every grid point equal to some `x[i]` receives `y[i]`; all other points are zero.
/// When `x` repeats a value, the later sample wins.
pub fn unionize_given_x(union_x: &[f64], x: &[f64], y: &[f64]) -> Result<Vec<f64>, DistroError> {
    check_lengths(x, y)?;
    let mut union_y = vec![0.0; union_x.len()];
    for (xi, yi) in x.iter().zip(y) {
        for (grid, out) in union_x.iter().zip(union_y.iter_mut()) {
            if grid == xi {
                *out = *yi;
            }
        }
    }
    Ok(union_y)
}

/// Merges two sampled functions onto the sorted, de-duplicated union of their abscissae.
pub fn unionize_two(
    x1: &[f64],
    y1: &[f64],
    x2: &[f64],
    y2: &[f64],
) -> Result<UnionizedDistros, DistroError> {
    check_lengths(x1, y1)?;
    check_lengths(x2, y2)?;

    let mut x: Vec<f64> = x1.iter().chain(x2).copied().collect();
    x.sort_by(f64::total_cmp);
    x.dedup();

    let y1 = unionize_given_x(&x, x1, y1)?;
    let y2 = unionize_given_x(&x, x2, y2)?;
    Ok(UnionizedDistros { x, y1, y2 })
}

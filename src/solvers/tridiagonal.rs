// src/solvers/tridiagonal.rs
//! Thomas Algorithm for Tridiagonal Systems
//!
//! # Mathematical Framework
//!
//! Solves `A·y = d` where `A` has sub-diagonal `a`, main diagonal `b` and
//! super-diagonal `c`:
//! ```text
//! a[i]·y[i-1] + b[i]·y[i] + c[i]·y[i+1] = d[i]
//! ```
//! `a[0]` and `c[n-1]` fall outside the matrix and are ignored.
//!
//! # Algorithm
//!
//! Forward sweep:
//! ```text
//! c'[0] = c[0] / b[0]                 d'[0] = d[0] / b[0]
//! m     = b[i] - a[i]·c'[i-1]
//! c'[i] = c[i] / m                    d'[i] = (d[i] - a[i]·d'[i-1]) / m
//! ```
//! Back substitution:
//! ```text
//! y[n-1] = d'[n-1]
//! y[i]   = d'[i] - c'[i]·y[i+1]
//! ```
//!
//! # Stability
//!
//! There is no pivoting and no pivot guard. Diagonally dominant systems (the
//! theta-scheme with sane mesh steps) never produce a zero pivot; a zero pivot
//! shows up as non-finite entries in the result, which the caller checks.

use ndarray::{Array1, ArrayView1};

/// Solve the tridiagonal system `(a, b, c)·y = d` in O(n)
pub fn solve_tridiagonal(
    a: ArrayView1<f64>,
    b: ArrayView1<f64>,
    c: ArrayView1<f64>,
    d: ArrayView1<f64>,
) -> Array1<f64> {
    let n = d.len();
    debug_assert!(a.len() == n && b.len() == n && c.len() == n);
    if n == 0 {
        return Array1::zeros(0);
    }

    let mut c_prime = Array1::<f64>::zeros(n);
    let mut d_prime = Array1::<f64>::zeros(n);

    // Forward sweep
    c_prime[0] = c[0] / b[0];
    d_prime[0] = d[0] / b[0];
    for i in 1..n {
        let m = b[i] - a[i] * c_prime[i - 1];
        c_prime[i] = c[i] / m;
        d_prime[i] = (d[i] - a[i] * d_prime[i - 1]) / m;
    }

    // Back substitution, reusing d' as the solution
    for i in (0..n - 1).rev() {
        d_prime[i] -= c_prime[i] * d_prime[i + 1];
    }

    d_prime
}

/// Multiply the tridiagonal matrix `(a, b, c)` by `y`
pub fn apply_tridiagonal(
    a: ArrayView1<f64>,
    b: ArrayView1<f64>,
    c: ArrayView1<f64>,
    y: ArrayView1<f64>,
) -> Array1<f64> {
    let n = y.len();
    Array1::from_shape_fn(n, |i| {
        let mut v = b[i] * y[i];
        if i > 0 {
            v += a[i] * y[i - 1];
        }
        if i + 1 < n {
            v += c[i] * y[i + 1];
        }
        v
    })
}

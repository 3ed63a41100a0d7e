//! Dense numeric vector used for histograms, feature vectors and centroids.
//!
//! Every binary operation requires both operands to have the same length.
//! A mismatch is a programming error and panics; nothing is truncated.
//!
//! Degenerate arithmetic (`1/0`, `log(0)`, `0/0`) is propagated as
//! `inf`/`NaN`. The only intercepted case is [`Vector::multiply_elementwise`],
//! which forces the product to zero whenever either factor is exactly zero.

use std::ops::Index;

/// Fixed-length vector of `f64`, mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    elements: Vec<f64>,
}

impl Vector {
    /// Creates a zero vector with `len` elements.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            elements: vec![0.0; len],
        }
    }

    /// Creates a vector taking ownership of `elements`.
    #[must_use]
    pub fn from_vec(elements: Vec<f64>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Returns the element at `i`, panicking when out of range.
    #[must_use]
    pub fn get(&self, i: usize) -> f64 {
        self.elements[i]
    }

    pub fn set(&mut self, i: usize, value: f64) {
        self.elements[i] = value;
    }

    /// Adds one at index `i`. Used for histogram accumulation.
    pub fn increment(&mut self, i: usize) {
        self.elements[i] += 1.0;
    }

    /// Adds `other` to `self`.
    pub fn add(&mut self, other: &Vector) {
        self.assert_same_len(other);
        for (a, b) in self.elements.iter_mut().zip(&other.elements) {
            *a += b;
        }
    }

    /// Subtracts `other` from `self`.
    pub fn subtract(&mut self, other: &Vector) {
        self.assert_same_len(other);
        for (a, b) in self.elements.iter_mut().zip(&other.elements) {
            *a -= b;
        }
    }

    pub fn multiply_scalar(&mut self, multiplier: f64) {
        for value in &mut self.elements {
            *value *= multiplier;
        }
    }

    /// Elementwise product. If either factor at an index is exactly zero the
    /// result there is zero, so `0 * inf` never produces `NaN`.
    pub fn multiply_elementwise(&mut self, other: &Vector) {
        self.assert_same_len(other);
        for (a, &b) in self.elements.iter_mut().zip(&other.elements) {
            if *a == 0.0 || b == 0.0 {
                *a = 0.0;
            } else {
                *a *= b;
            }
        }
    }

    pub fn divide_scalar(&mut self, divisor: f64) {
        for value in &mut self.elements {
            *value /= divisor;
        }
    }

    /// Replaces every element `x` with `1 / x`.
    pub fn invert_elementwise(&mut self) {
        for value in &mut self.elements {
            *value = 1.0 / *value;
        }
    }

    /// Replaces every element `x` with `ln(x)`.
    pub fn log_elementwise(&mut self) {
        for value in &mut self.elements {
            *value = value.ln();
        }
    }

    /// Largest element, or negative infinity for an empty vector.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.elements
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Euclidean (L2) norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.elements.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[must_use]
    pub fn inner_product(&self, other: &Vector) -> f64 {
        self.assert_same_len(other);
        self.elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a * b)
            .sum()
    }

    fn assert_same_len(&self, other: &Vector) {
        assert_eq!(
            self.elements.len(),
            other.elements.len(),
            "Vector length mismatch"
        );
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.elements[i]
    }
}

impl From<Vec<f64>> for Vector {
    fn from(elements: Vec<f64>) -> Self {
        Self::from_vec(elements)
    }
}

//! Ordered containers the generators can fill in place.
//!
//! The generators work on an internal worklist and write their result back
//! through [`GridSequence`], so callers may keep grids in whichever standard
//! sequence suits them.

use std::collections::{LinkedList, VecDeque};

/// An ordered sequence of `f64` grid points.
pub trait GridSequence {
    /// Number of stored points.
    fn point_count(&self) -> usize;

    /// Copy the points, in order, into a vector.
    fn to_points(&self) -> Vec<f64>;

    /// Replace the contents with `points`, preserving their order.
    fn replace_points(&mut self, points: Vec<f64>);
}

impl GridSequence for Vec<f64> {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn to_points(&self) -> Vec<f64> {
        self.clone()
    }

    fn replace_points(&mut self, points: Vec<f64>) {
        *self = points;
    }
}

impl GridSequence for VecDeque<f64> {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn to_points(&self) -> Vec<f64> {
        self.iter().copied().collect()
    }

    fn replace_points(&mut self, points: Vec<f64>) {
        *self = VecDeque::from(points);
    }
}

impl GridSequence for LinkedList<f64> {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn to_points(&self) -> Vec<f64> {
        self.iter().copied().collect()
    }

    fn replace_points(&mut self, points: Vec<f64>) {
        *self = points.into_iter().collect();
    }
}

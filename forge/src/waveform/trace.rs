//! Piecewise-constant traces built from sample sequences.

use std::iter::FusedIterator;

use forgegeom::path::Polyline;
use forgegeom::Point;
use serde::{Deserialize, Serialize};

use super::is_high;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum EdgeDir {
    Falling,
    Rising,
}

/// A change of value between two consecutive samples.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Transition {
    /// Index of the first sample carrying the new value.
    pub(crate) idx: usize,
    pub(crate) from: f64,
    pub(crate) to: f64,
}

impl Transition {
    #[inline]
    pub fn idx(&self) -> usize {
        self.idx
    }

    #[inline]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// The direction of the level change, or [`None`] if both values draw at the same level.
    pub fn dir(&self) -> Option<EdgeDir> {
        match (is_high(self.from), is_high(self.to)) {
            (false, true) => Some(EdgeDir::Rising),
            (true, false) => Some(EdgeDir::Falling),
            _ => None,
        }
    }
}

/// Iterates over every index whose sample differs from its predecessor.
///
/// Samples are compared as raw values, so a change between two
/// non-high values is still reported.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Transitions<'a> {
    data: &'a [f64],
    /// Index of the **next** sample to compare with its predecessor.
    idx: usize,
}

impl<'a> Transitions<'a> {
    pub fn new(data: &'a [f64]) -> Self {
        Self { data, idx: 1 }
    }
}

impl<'a> Iterator for Transitions<'a> {
    type Item = Transition;
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < self.data.len() {
            let idx = self.idx;
            self.idx += 1;
            let (from, to) = (self.data[idx - 1], self.data[idx]);
            if from != to {
                return Some(Transition { idx, from, to });
            }
        }
        None
    }
}

impl<'a> FusedIterator for Transitions<'a> {}

/// The vertical position of a sample within its lane.
///
/// High samples sit at the top (`y = 0`); everything else sits at `signal_height`.
#[inline]
pub fn level_y(sample: f64, signal_height: f64) -> f64 {
    if is_high(sample) {
        0.
    } else {
        signal_height
    }
}

/// Builds the stepped trace of `data`.
///
/// Each sample `i` contributes a horizontal run from `i * pitch` to `(i + 1) * pitch`.
/// Where the value changes, a vertical segment at `x = i * pitch` joins the old and new
/// levels. The first sample starts its run at `x = 0` without a transition.
pub fn digital_polyline(data: &[f64], pitch: f64, signal_height: f64) -> Polyline {
    let mut line = Polyline::new();
    let mut transitions = Transitions::new(data).peekable();

    for (i, &sample) in data.iter().enumerate() {
        let x1 = i as f64 * pitch;
        let x2 = (i + 1) as f64 * pitch;
        let y = level_y(sample, signal_height);

        if i == 0 {
            line.push(Point::new(x1, y));
        } else if let Some(t) = transitions.next_if(|t| t.idx == i) {
            line.push(Point::new(x1, level_y(t.from, signal_height)));
            line.push(Point::new(x1, y));
        }
        line.push(Point::new(x2, y));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_of_pulse() {
        let data = [0., 0., 1., 1., 0.];
        let edges = Transitions::new(&data).collect::<Vec<_>>();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].idx(), 2);
        assert_eq!(edges[0].dir(), Some(EdgeDir::Rising));
        assert_eq!(edges[1].idx(), 4);
        assert_eq!(edges[1].dir(), Some(EdgeDir::Falling));
    }

    #[test]
    fn transitions_of_short_sequences() {
        assert_eq!(Transitions::new(&[]).count(), 0);
        assert_eq!(Transitions::new(&[1.]).count(), 0);
    }

    #[test]
    fn non_binary_change_has_no_direction() {
        let data = [0., 0.5];
        let t = Transitions::new(&data).next().unwrap();
        assert_eq!(t.dir(), None);
    }

    #[test]
    fn polyline_of_pulse() {
        let line = digital_polyline(&[0., 0., 1., 1., 0.], 30., 20.);
        assert_eq!(
            line.to_string(),
            "0,20 30,20 60,20 60,20 60,0 90,0 120,0 120,0 120,20 150,20"
        );
    }

    #[test]
    fn polyline_of_empty_data() {
        assert!(digital_polyline(&[], 30., 20.).is_empty());
    }
}

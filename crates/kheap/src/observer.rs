//! Opt-in instrumentation for [`KaryHeap`](crate::KaryHeap).
//!
//! The heap notifies its observer at every structural decision point. The
//! default observer is `()`, whose hooks are empty and compile away.

use std::fmt;

/// Public heap operation that triggered a sift.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    Insert,
    ExtractMin,
    Update,
    Delete,
}

pub trait HeapObserver {
    fn inserted(&mut self) {}

    fn extracted(&mut self) {}

    fn updated(&mut self) {}

    /// One sift-up pass: a slot was compared with its parent.
    fn sift_up(&mut self, _op: Operation) {}

    /// One sift-down pass: a slot was compared with its children (or found to be a leaf).
    fn sift_down(&mut self, _op: Operation) {}

    fn resized(&mut self, _len: usize) {}
}

impl HeapObserver for () {}

impl<O: HeapObserver + ?Sized> HeapObserver for &mut O {
    #[inline]
    fn inserted(&mut self) {
        (**self).inserted();
    }

    #[inline]
    fn extracted(&mut self) {
        (**self).extracted();
    }

    #[inline]
    fn updated(&mut self) {
        (**self).updated();
    }

    #[inline]
    fn sift_up(&mut self, op: Operation) {
        (**self).sift_up(op);
    }

    #[inline]
    fn sift_down(&mut self, op: Operation) {
        (**self).sift_down(op);
    }

    #[inline]
    fn resized(&mut self, len: usize) {
        (**self).resized(len);
    }
}

/// Call and sift-pass counts, broken down by the operation that caused them.
///
/// An insert issued by `update` on an absent vertex counts as both an update
/// call and an insert call, and its sift passes are attributed to `Insert`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OperationCounter {
    pub insert_calls: u64,
    pub extract_min_calls: u64,
    pub update_calls: u64,
    pub sift_up_passes: u64,
    pub sift_down_passes: u64,
    pub insert_sift_up: u64,
    pub extract_min_sift_up: u64,
    pub extract_min_sift_down: u64,
    pub update_sift_up: u64,
    pub update_sift_down: u64,
    pub max_heap_size: usize,
}

impl HeapObserver for OperationCounter {
    fn inserted(&mut self) {
        self.insert_calls += 1;
    }

    fn extracted(&mut self) {
        self.extract_min_calls += 1;
    }

    fn updated(&mut self) {
        self.update_calls += 1;
    }

    fn sift_up(&mut self, op: Operation) {
        self.sift_up_passes += 1;
        match op {
            Operation::Insert => self.insert_sift_up += 1,
            Operation::ExtractMin => self.extract_min_sift_up += 1,
            Operation::Update => self.update_sift_up += 1,
            Operation::Delete => {}
        }
    }

    fn sift_down(&mut self, op: Operation) {
        self.sift_down_passes += 1;
        match op {
            Operation::ExtractMin => self.extract_min_sift_down += 1,
            Operation::Update => self.update_sift_down += 1,
            Operation::Insert | Operation::Delete => {}
        }
    }

    fn resized(&mut self, len: usize) {
        self.max_heap_size = self.max_heap_size.max(len);
    }
}

/// Observed sift passes relative to the `log_k(max_heap_size)` height bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiftRatios {
    pub log_k_max_size: f64,
    pub insert: Option<f64>,
    pub extract_min: Option<f64>,
    pub update: Option<f64>,
}

impl OperationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the bound is not positive, i.e. the heap never held two elements.
    pub fn ratios(&self, arity: usize) -> Option<SiftRatios> {
        if self.max_heap_size == 0 || arity < 2 {
            return None;
        }
        let log_k = (self.max_heap_size as f64).ln() / (arity as f64).ln();
        if log_k <= 0.0 {
            return None;
        }

        let ratio = |passes: u64, calls: u64| {
            (calls > 0).then(|| passes as f64 / (calls as f64 * log_k))
        };

        Some(SiftRatios {
            log_k_max_size: log_k,
            insert: ratio(self.insert_sift_up, self.insert_calls),
            extract_min: ratio(
                self.extract_min_sift_up + self.extract_min_sift_down,
                self.extract_min_calls,
            ),
            update: ratio(
                self.update_sift_up + self.update_sift_down,
                self.update_calls,
            ),
        })
    }

    pub fn report(&self, arity: usize) -> Report<'_> {
        Report {
            counter: self,
            arity,
        }
    }
}

pub struct Report<'a> {
    counter: &'a OperationCounter,
    arity: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.counter;
        writeln!(f, "Insert calls: {}", c.insert_calls)?;
        writeln!(f, "ExtractMin calls: {}", c.extract_min_calls)?;
        writeln!(f, "Update calls: {}", c.update_calls)?;
        writeln!(f, "Sift-up passes: {}", c.sift_up_passes)?;
        writeln!(f, "Sift-down passes: {}", c.sift_down_passes)?;
        writeln!(f, "Insert sift-up: {}", c.insert_sift_up)?;
        writeln!(f, "ExtractMin sift-up: {}", c.extract_min_sift_up)?;
        writeln!(f, "ExtractMin sift-down: {}", c.extract_min_sift_down)?;
        writeln!(f, "Update sift-up: {}", c.update_sift_up)?;
        writeln!(f, "Update sift-down: {}", c.update_sift_down)?;

        if let Some(r) = c.ratios(self.arity) {
            let show = |x: Option<f64>| x.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6}"));
            writeln!(f, "Max heap size: {}", c.max_heap_size)?;
            writeln!(
                f,
                "log_{}({}): {:.6}",
                self.arity, c.max_heap_size, r.log_k_max_size
            )?;
            writeln!(f, "r_insert: {}", show(r.insert))?;
            writeln!(f, "r_extract_min: {}", show(r.extract_min))?;
            writeln!(f, "r_update: {}", show(r.update))?;
        }
        Ok(())
    }
}

//! Rotating triple buffer for leapfrog time levels.
//!
//! [`TripleBuffer`] owns three equal-length buffers. At any time one
//! plays "past", one "current", and one "future". A step borrows all
//! three through [`StepBuffers`] (past and current shared, future
//! exclusive), then [`TripleBuffer::rotate`] advances the roles without
//! touching the data:
//!
//! ```text
//! head = 0:  past = buf[2]  current = buf[0]  future = buf[1]
//! head = 1:  past = buf[0]  current = buf[1]  future = buf[2]
//! head = 2:  past = buf[1]  current = buf[2]  future = buf[0]
//! ```
//!
//! Skipping `rotate()` discards whatever was written to the future
//! buffer, which is how a failed step rolls back.

use crate::error::ArenaError;

/// Split borrow of the three time levels for one step.
///
/// Created by [`TripleBuffer::begin_step`]. Holds the only mutable
/// borrow into the buffer, so nothing else can observe a half-written
/// future.
#[must_use]
pub struct StepBuffers<'a> {
    /// The field one step before `current`. `None` before the first
    /// rotation, when no earlier time level exists.
    pub past: Option<&'a [f64]>,
    /// The most recently published field.
    pub current: &'a [f64],
    /// Scratch for the next field. Holds stale data from an earlier
    /// time level; writers must overwrite every cell they rely on.
    pub future: &'a mut [f64],
}

/// Three fixed-length field buffers with rotating roles.
///
/// Allocation happens once in [`new()`](TripleBuffer::new); the
/// steady-state step path never allocates.
#[derive(Debug, Clone)]
pub struct TripleBuffer {
    buffers: [Vec<f64>; 3],
    /// Index of the buffer currently playing "current".
    head: usize,
    /// Whether the "past" role holds a real time level yet.
    has_past: bool,
    /// Rotations since construction or the last reset.
    generation: u64,
}

impl TripleBuffer {
    /// Create a triple buffer whose current level is `initial`.
    ///
    /// The other two buffers are zero-filled to the same length.
    ///
    /// Returns `Err(ArenaError::EmptyBuffer)` if `initial` is empty.
    pub fn new(initial: Vec<f64>) -> Result<Self, ArenaError> {
        if initial.is_empty() {
            return Err(ArenaError::EmptyBuffer);
        }
        let len = initial.len();
        Ok(Self {
            buffers: [initial, vec![0.0; len], vec![0.0; len]],
            head: 0,
            has_past: false,
            generation: 0,
        })
    }

    /// Number of values per buffer.
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    /// Always `false`: construction rejects empty fields.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Rotations since construction or the last [`reset`](Self::reset).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The published field.
    pub fn current(&self) -> &[f64] {
        &self.buffers[self.head]
    }

    /// The field one step before [`current`](Self::current), if any.
    pub fn past(&self) -> Option<&[f64]> {
        if self.has_past {
            Some(&self.buffers[(self.head + 2) % 3])
        } else {
            None
        }
    }

    /// Borrow all three time levels for one step.
    pub fn begin_step(&mut self) -> StepBuffers<'_> {
        let has_past = self.has_past;
        let [b0, b1, b2] = &mut self.buffers;
        let (past, current, future) = match self.head {
            0 => (&*b2, &*b0, b1),
            1 => (&*b0, &*b1, b2),
            _ => (&*b1, &*b2, b0),
        };
        StepBuffers {
            past: if has_past { Some(past.as_slice()) } else { None },
            current: current.as_slice(),
            future: future.as_mut_slice(),
        }
    }

    /// Publish the future buffer: past <- current, current <- future,
    /// and the old past buffer becomes the next future.
    pub fn rotate(&mut self) {
        self.head = (self.head + 1) % 3;
        self.has_past = true;
        self.generation += 1;
    }

    /// Discard all time levels and make `initial` the current field.
    ///
    /// Reuses the existing allocations. Returns
    /// `Err(ArenaError::LengthMismatch)` if `initial` has the wrong length;
    /// the buffer is left untouched in that case.
    pub fn reset(&mut self, initial: &[f64]) -> Result<(), ArenaError> {
        if initial.len() != self.len() {
            return Err(ArenaError::LengthMismatch {
                expected: self.len(),
                actual: initial.len(),
            });
        }
        self.head = 0;
        self.buffers[0].copy_from_slice(initial);
        self.buffers[1].fill(0.0);
        self.buffers[2].fill(0.0);
        self.has_past = false;
        self.generation = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn write_future(buf: &mut TripleBuffer, value: f64) {
        buf.begin_step().future.fill(value);
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(TripleBuffer::new(vec![]).unwrap_err(), ArenaError::EmptyBuffer);
    }

    #[test]
    fn fresh_buffer_has_no_past() {
        let mut buf = TripleBuffer::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.current(), &[1.0, 2.0, 3.0]);
        assert!(buf.past().is_none());
        assert!(buf.begin_step().past.is_none());
        assert_eq!(buf.generation(), 0);
    }

    #[test]
    fn rotate_shifts_roles() {
        let mut buf = TripleBuffer::new(vec![1.0; 4]).unwrap();
        write_future(&mut buf, 2.0);
        buf.rotate();
        assert_eq!(buf.current(), &[2.0; 4]);
        assert_eq!(buf.past().unwrap(), &[1.0; 4]);

        write_future(&mut buf, 3.0);
        buf.rotate();
        assert_eq!(buf.current(), &[3.0; 4]);
        assert_eq!(buf.past().unwrap(), &[2.0; 4]);
        assert_eq!(buf.generation(), 2);
    }

    #[test]
    fn future_reuses_old_past() {
        let mut buf = TripleBuffer::new(vec![1.0; 2]).unwrap();
        write_future(&mut buf, 2.0);
        buf.rotate();
        write_future(&mut buf, 3.0);
        buf.rotate();
        // past = 2.0, current = 3.0, so the future slot still holds 1.0.
        let step = buf.begin_step();
        assert_eq!(step.past.unwrap(), &[2.0; 2]);
        assert_eq!(step.current, &[3.0; 2]);
        assert_eq!(step.future, &[1.0; 2]);
    }

    #[test]
    fn skipped_rotate_discards_future() {
        let mut buf = TripleBuffer::new(vec![1.0; 3]).unwrap();
        write_future(&mut buf, 9.0);
        assert_eq!(buf.current(), &[1.0; 3]);
        assert!(buf.past().is_none());
        assert_eq!(buf.generation(), 0);
    }

    #[test]
    fn rotation_never_reallocates() {
        let mut buf = TripleBuffer::new(vec![0.0; 16]).unwrap();
        let mut ptrs: Vec<*const f64> = buf.buffers.iter().map(|b| b.as_ptr()).collect();
        ptrs.sort();
        for i in 0..10 {
            write_future(&mut buf, i as f64);
            buf.rotate();
        }
        let mut after: Vec<*const f64> = buf.buffers.iter().map(|b| b.as_ptr()).collect();
        after.sort();
        assert_eq!(ptrs, after);
    }

    #[test]
    fn reset_restores_initial_level() {
        let mut buf = TripleBuffer::new(vec![1.0; 3]).unwrap();
        write_future(&mut buf, 5.0);
        buf.rotate();
        buf.reset(&[7.0, 8.0, 9.0]).unwrap();
        assert_eq!(buf.current(), &[7.0, 8.0, 9.0]);
        assert!(buf.past().is_none());
        assert_eq!(buf.generation(), 0);
        assert_eq!(buf.begin_step().future, &[0.0; 3]);
    }

    #[test]
    fn reset_rejects_wrong_length() {
        let mut buf = TripleBuffer::new(vec![1.0; 3]).unwrap();
        let err = buf.reset(&[1.0; 4]).unwrap_err();
        assert_eq!(
            err,
            ArenaError::LengthMismatch {
                expected: 3,
                actual: 4
            }
        );
        assert_eq!(buf.current(), &[1.0; 3]);
    }

    proptest! {
        #[test]
        fn roles_stay_distinct(rotations in 0usize..20) {
            let mut buf = TripleBuffer::new(vec![0.0; 4]).unwrap();
            for _ in 0..rotations {
                buf.rotate();
            }
            let step = buf.begin_step();
            let current = step.current.as_ptr();
            let future = step.future.as_ptr();
            prop_assert_ne!(current, future);
            if let Some(past) = step.past {
                prop_assert_ne!(past.as_ptr(), current);
                prop_assert_ne!(past.as_ptr(), future);
            }
        }

        #[test]
        fn past_is_previous_current(values in proptest::collection::vec(-1e3f64..1e3, 1..12)) {
            let mut buf = TripleBuffer::new(vec![0.0; 2]).unwrap();
            for &v in &values {
                let before = buf.current().to_vec();
                write_future(&mut buf, v);
                buf.rotate();
                prop_assert_eq!(buf.past().unwrap(), before.as_slice());
                prop_assert_eq!(buf.current(), &[v, v][..]);
            }
        }
    }
}

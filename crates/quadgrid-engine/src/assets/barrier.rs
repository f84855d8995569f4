use crate::error::GridError;

/// What a barrier does when one of its loads fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FailurePolicy {
    /// Resolve immediately with the first failure.
    #[default]
    FailFast,
    /// Log the failure and never fire. Nothing downstream ever runs.
    Stall,
}

/// Result of feeding one completion into a [`LoadBarrier`].
#[derive(Debug)]
pub enum BarrierEvent<T> {
    /// More completions are needed.
    Waiting,
    /// All slots are filled; values are in slot order. Emitted once.
    Ready(Vec<T>),
    /// A load failed under [`FailurePolicy::FailFast`]. Emitted once.
    Failed(GridError),
    /// A load failed under [`FailurePolicy::Stall`]; the barrier will never fire.
    Stalled,
    /// The completion was not accepted (settled barrier, bad or repeated index).
    Ignored,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Status {
    Open,
    Fired,
    Stalled,
}

/// One-shot join over a fixed number of asynchronous loads.
///
/// Each load owns a reserved slot, so the output order is the caller's order
/// no matter which load finishes first.
#[derive(Debug)]
pub struct LoadBarrier<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
    policy: FailurePolicy,
    status: Status,
}

impl<T> LoadBarrier<T> {
    pub fn new(len: usize, policy: FailurePolicy) -> Self {
        Self {
            slots: (0..len).map(|_| None).collect(),
            remaining: len,
            policy,
            status: Status::Open,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True once `Ready` or `Failed` has been emitted.
    #[inline]
    pub fn has_fired(&self) -> bool {
        self.status == Status::Fired
    }

    #[inline]
    pub fn is_stalled(&self) -> bool {
        self.status == Status::Stalled
    }

    /// Records the completion of load `index`.
    pub fn complete(&mut self, index: usize, result: Result<T, GridError>) -> BarrierEvent<T> {
        match self.status {
            Status::Fired => {
                log::debug!("load #{index} completed after the barrier fired; ignored");
                return BarrierEvent::Ignored;
            }
            Status::Stalled => {
                if let Err(e) = result {
                    log::error!("{e}");
                }
                return BarrierEvent::Stalled;
            }
            Status::Open => {}
        }

        let len = self.slots.len();
        let Some(slot) = self.slots.get_mut(index) else {
            log::warn!("load #{index} is out of range for a barrier of {len}");
            return BarrierEvent::Ignored;
        };
        if slot.is_some() {
            log::warn!("load #{index} completed twice; keeping the first result");
            return BarrierEvent::Ignored;
        }

        match result {
            Ok(value) => {
                *slot = Some(value);
                self.remaining -= 1;
                if self.remaining > 0 {
                    return BarrierEvent::Waiting;
                }
                self.status = Status::Fired;
                BarrierEvent::Ready(self.slots.drain(..).flatten().collect())
            }
            Err(e) => {
                log::error!("{e}");
                match self.policy {
                    FailurePolicy::FailFast => {
                        self.status = Status::Fired;
                        self.slots.clear();
                        BarrierEvent::Failed(e)
                    }
                    FailurePolicy::Stall => {
                        self.status = Status::Stalled;
                        BarrierEvent::Stalled
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    use super::*;

    fn fail(index: usize) -> GridError {
        GridError::LoadFailure {
            index,
            path: PathBuf::from(format!("row{index}.jpg")),
            reason: image::ImageError::IoError(std::io::ErrorKind::InvalidData.into()),
        }
    }

    /// Completes `order` in sequence; returns the values of every `Ready` event.
    fn run(order: &[usize]) -> Vec<Vec<String>> {
        let mut barrier = LoadBarrier::new(order.len(), FailurePolicy::FailFast);
        let mut fired = Vec::new();
        for &i in order {
            if let BarrierEvent::Ready(v) = barrier.complete(i, Ok(format!("tex{i}"))) {
                fired.push(v);
            }
        }
        fired
    }

    fn in_order(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("tex{i}")).collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn fires_once_in_source_order() {
        assert_eq!(run(&[0, 1, 2, 3]), vec![in_order(4)]);
    }

    #[test]
    fn reverse_completion_keeps_source_order() {
        assert_eq!(run(&[3, 2, 1, 0]), vec![in_order(4)]);
    }

    #[test]
    fn randomized_completion_keeps_source_order() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..32 {
            let mut order: Vec<usize> = (0..8).collect();
            order.shuffle(&mut rng);
            assert_eq!(run(&order), vec![in_order(8)], "order {order:?}");
        }
    }

    #[test]
    fn waits_until_every_slot_is_filled() {
        let mut barrier = LoadBarrier::new(3, FailurePolicy::FailFast);
        assert!(matches!(barrier.complete(2, Ok(2)), BarrierEvent::Waiting));
        assert!(matches!(barrier.complete(0, Ok(0)), BarrierEvent::Waiting));
        assert_eq!(barrier.remaining(), 1);
        assert!(!barrier.has_fired());
        assert!(matches!(barrier.complete(1, Ok(1)), BarrierEvent::Ready(v) if v == vec![0, 1, 2]));
        assert!(barrier.has_fired());
    }

    // ── misuse ────────────────────────────────────────────────────────────

    #[test]
    fn late_and_duplicate_completions_are_ignored() {
        let mut barrier = LoadBarrier::new(2, FailurePolicy::FailFast);
        assert!(matches!(barrier.complete(0, Ok('a')), BarrierEvent::Waiting));
        assert!(matches!(barrier.complete(0, Ok('x')), BarrierEvent::Ignored));
        assert!(matches!(barrier.complete(5, Ok('x')), BarrierEvent::Ignored));
        assert!(matches!(barrier.complete(1, Ok('b')), BarrierEvent::Ready(v) if v == vec!['a', 'b']));
        assert!(matches!(barrier.complete(1, Ok('c')), BarrierEvent::Ignored));
    }

    // ── failure policies ──────────────────────────────────────────────────

    #[test]
    fn fail_fast_reports_first_failure() {
        let mut barrier: LoadBarrier<u8> = LoadBarrier::new(4, FailurePolicy::FailFast);
        assert!(matches!(barrier.complete(0, Ok(0)), BarrierEvent::Waiting));
        let ev = barrier.complete(2, Err(fail(2)));
        assert!(matches!(ev, BarrierEvent::Failed(GridError::LoadFailure { index: 2, .. })));
        assert!(barrier.has_fired());
        assert!(matches!(barrier.complete(1, Ok(1)), BarrierEvent::Ignored));
        assert!(matches!(barrier.complete(3, Ok(3)), BarrierEvent::Ignored));
    }

    #[test]
    fn stall_never_fires() {
        let mut barrier: LoadBarrier<u8> = LoadBarrier::new(3, FailurePolicy::Stall);
        assert!(matches!(barrier.complete(1, Err(fail(1))), BarrierEvent::Stalled));
        assert!(matches!(barrier.complete(0, Ok(0)), BarrierEvent::Stalled));
        assert!(matches!(barrier.complete(2, Ok(2)), BarrierEvent::Stalled));
        assert!(barrier.is_stalled());
        assert!(!barrier.has_fired());
    }
}

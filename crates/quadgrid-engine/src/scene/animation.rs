use std::f32::consts::TAU;

use crate::grid::GRID_DIM;
use crate::transform::Axis;

/// Steady rotation of a whole row.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    pub axis: Axis,
    pub deg_per_sec: f32,
}

impl Spin {
    pub const fn new(axis: Axis, deg_per_sec: f32) -> Self {
        Self { axis, deg_per_sec }
    }
}

/// Per-row animation policy.
///
/// Spins always apply to the top and bottom rows; the middle rows either slide
/// toward each other and swap textures, or oscillate in place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AnimationPolicy {
    Static,

    /// Every row spins about the same axis.
    RotateAxis(Spin),

    /// Middle rows slide by `distance * phase` and exchange textures each cycle.
    SlideAndSwap {
        top: Spin,
        bottom: Spin,
        cycles_per_sec: f32,
        distance: f32,
    },

    /// Middle rows oscillate vertically, mirrored against each other.
    Oscillate {
        top: Spin,
        bottom: Spin,
        amplitude: f32,
        freq_hz: f32,
    },
}

/// Motion applied to one row for the current frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowMotion {
    /// Vertical displacement from the row's resting center.
    pub offset_y: f32,
    /// Rotation in degrees, applied in the quad's local frame.
    pub rotation: Option<(f32, Axis)>,
}

impl RowMotion {
    pub const STILL: RowMotion = RowMotion { offset_y: 0.0, rotation: None };

    fn spin(spin: Spin, elapsed: f64) -> Self {
        let degrees = (spin.deg_per_sec as f64 * elapsed).rem_euclid(360.0);
        Self {
            offset_y: 0.0,
            rotation: Some((degrees as f32, spin.axis)),
        }
    }

    fn slide(offset_y: f32) -> Self {
        Self { offset_y, rotation: None }
    }
}

impl AnimationPolicy {
    #[inline]
    pub fn is_animated(&self) -> bool {
        !matches!(self, AnimationPolicy::Static)
    }

    /// Phase advance rate in cycles per second, if the policy is periodic.
    pub fn cycle_rate(&self) -> Option<f32> {
        match *self {
            AnimationPolicy::SlideAndSwap { cycles_per_sec, .. } => Some(cycles_per_sec),
            AnimationPolicy::Oscillate { freq_hz, .. } => Some(freq_hz),
            _ => None,
        }
    }

    #[inline]
    pub fn swaps_rows(&self) -> bool {
        matches!(self, AnimationPolicy::SlideAndSwap { .. })
    }

    /// Motion of `row` for the given animation state.
    pub fn row_motion(&self, row: usize, state: &AnimationState) -> RowMotion {
        let last = GRID_DIM - 1;
        match *self {
            AnimationPolicy::Static => RowMotion::STILL,
            AnimationPolicy::RotateAxis(spin) => RowMotion::spin(spin, state.elapsed),
            AnimationPolicy::SlideAndSwap { top, bottom, distance, .. } => match row {
                0 => RowMotion::spin(top, state.elapsed),
                r if r == last => RowMotion::spin(bottom, state.elapsed),
                1 => RowMotion::slide(-distance * state.phase),
                _ => RowMotion::slide(distance * state.phase),
            },
            AnimationPolicy::Oscillate { top, bottom, amplitude, .. } => {
                let wave = amplitude * (TAU * state.phase).sin();
                match row {
                    0 => RowMotion::spin(top, state.elapsed),
                    r if r == last => RowMotion::spin(bottom, state.elapsed),
                    1 => RowMotion::slide(wave),
                    _ => RowMotion::slide(-wave),
                }
            }
        }
    }
}

/// Assignment of texture slots to the two middle rows.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SwapState {
    slots: [usize; 2],
}

impl SwapState {
    pub const INITIAL: SwapState = SwapState { slots: [1, 2] };

    #[inline]
    pub fn slots(self) -> [usize; 2] {
        self.slots
    }

    #[inline]
    pub fn exchange(&mut self) {
        self.slots.swap(0, 1);
    }
}

impl Default for SwapState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Mutable animation state, advanced once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    phase: f32,
    elapsed: f64,
    swap: SwapState,
    wraps: u64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            elapsed: 0.0,
            swap: SwapState::INITIAL,
            wraps: 0,
        }
    }

    /// Progress through the current cycle, in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Seconds of animated time since the scene started running.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn swap(&self) -> SwapState {
        self.swap
    }

    /// Number of completed cycles.
    #[inline]
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Texture slot for every row: outer rows are fixed, middle rows follow the swap state.
    #[inline]
    pub fn row_slots(&self) -> [usize; GRID_DIM] {
        let [a, b] = self.swap.slots();
        [0, a, b, 3]
    }

    /// Advances by `dt` seconds under `policy`. Returns the number of phase wraps.
    ///
    /// A delta spanning several periods wraps several times, so swap parity stays
    /// tied to elapsed time.
    pub fn advance(&mut self, dt: f32, policy: &AnimationPolicy) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.elapsed += dt as f64;

        let Some(rate) = policy.cycle_rate() else {
            return 0;
        };

        self.phase += dt * rate;

        let mut wrapped = 0;
        while self.phase >= 1.0 {
            self.phase -= 1.0;
            wrapped += 1;
            if policy.swaps_rows() {
                self.swap.exchange();
            }
        }
        self.wraps += wrapped as u64;
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_policy(rate: f32) -> AnimationPolicy {
        AnimationPolicy::SlideAndSwap {
            top: Spin::new(Axis::Y, 90.0),
            bottom: Spin::new(Axis::X, 120.0),
            cycles_per_sec: rate,
            distance: 0.5,
        }
    }

    // ── swap parity ───────────────────────────────────────────────────────

    #[test]
    fn swap_parity_follows_cycle_count() {
        let k = 0.5;
        let policy = swap_policy(k);
        let dt = 0.25; // 8 ticks per cycle at k = 0.5

        for n in 0..6u32 {
            let mut s = AnimationState::new();
            let ticks = (n as f32 / k / dt) as usize;
            for _ in 0..ticks {
                s.advance(dt, &policy);
                assert!((0.0..1.0).contains(&s.phase()));
            }
            let expected = if n % 2 == 0 { [1, 2] } else { [2, 1] };
            assert_eq!(s.swap().slots(), expected, "n = {n}");
            assert_eq!(s.wraps(), n as u64);
        }
    }

    #[test]
    fn swap_parity_survives_frame_rate_deltas() {
        let k = 0.5;
        let policy = swap_policy(k);
        let dt = 1.0 / 60.0;
        let ticks_per_cycle = 120;

        let mut s = AnimationState::new();
        let mut ticks = 0;
        for n in 1..=6u64 {
            // One tick past the n-th boundary.
            while ticks < n * ticks_per_cycle + 1 {
                s.advance(dt, &policy);
                ticks += 1;
            }
            assert_eq!(s.wraps(), n, "n = {n}");
            let expected = if n % 2 == 0 { [1, 2] } else { [2, 1] };
            assert_eq!(s.swap().slots(), expected, "n = {n}");
            assert!(s.phase() < 2.0 * dt * k, "phase {} after n = {n}", s.phase());
        }
    }

    #[test]
    fn long_delta_wraps_more_than_once() {
        let policy = swap_policy(0.5);
        let mut s = AnimationState::new();
        // 2.5 cycles in one step.
        assert_eq!(s.advance(5.0, &policy), 2);
        assert_eq!(s.swap(), SwapState::INITIAL);
        assert!((s.phase() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn non_positive_delta_is_ignored() {
        let policy = swap_policy(0.5);
        let mut s = AnimationState::new();
        s.advance(0.5, &policy);
        let before = s.clone();
        s.advance(-1.0, &policy);
        s.advance(f32::NAN, &policy);
        s.advance(0.0, &policy);
        assert_eq!(s, before);
    }

    #[test]
    fn oscillation_wraps_without_swapping() {
        let policy = AnimationPolicy::Oscillate {
            top: Spin::new(Axis::Y, 90.0),
            bottom: Spin::new(Axis::X, 120.0),
            amplitude: 0.25,
            freq_hz: 0.5,
        };
        let mut s = AnimationState::new();
        for _ in 0..8 {
            s.advance(0.25, &policy);
        }
        assert_eq!(s.wraps(), 1);
        assert_eq!(s.swap(), SwapState::INITIAL);
    }

    // ── row motion ────────────────────────────────────────────────────────

    #[test]
    fn slide_moves_middle_rows_toward_each_other() {
        let policy = swap_policy(0.5);
        let mut s = AnimationState::new();
        s.advance(1.0, &policy); // phase 0.5

        assert_eq!(policy.row_motion(1, &s), RowMotion { offset_y: -0.25, rotation: None });
        assert_eq!(policy.row_motion(2, &s), RowMotion { offset_y: 0.25, rotation: None });
    }

    #[test]
    fn outer_rows_spin_with_elapsed_time() {
        let policy = swap_policy(0.5);
        let mut s = AnimationState::new();
        s.advance(0.5, &policy);

        assert_eq!(policy.row_motion(0, &s).rotation, Some((45.0, Axis::Y)));
        assert_eq!(policy.row_motion(3, &s).rotation, Some((60.0, Axis::X)));
    }

    #[test]
    fn spin_stays_smooth_after_hours() {
        let spin = Spin::new(Axis::Z, 90.0);
        let policy = AnimationPolicy::RotateAxis(spin);
        let mut s = AnimationState::new();
        s.advance(36_000.0, &policy); // ten hours, a whole number of turns

        let before = policy.row_motion(0, &s).rotation.map(|(deg, _)| deg);
        assert_eq!(before, Some(0.0));

        s.advance(1.0 / 60.0, &policy);
        let (deg, axis) = policy.row_motion(0, &s).rotation.unwrap();
        assert_eq!(axis, Axis::Z);
        assert!((deg - 1.5).abs() < 1e-3, "deg = {deg}");
    }

    #[test]
    fn oscillation_is_mirrored() {
        let policy = AnimationPolicy::Oscillate {
            top: Spin::new(Axis::Y, 0.0),
            bottom: Spin::new(Axis::X, 0.0),
            amplitude: 0.25,
            freq_hz: 0.5,
        };
        let mut s = AnimationState::new();
        s.advance(0.5, &policy); // quarter cycle, sin = 1

        let up = policy.row_motion(1, &s).offset_y;
        let down = policy.row_motion(2, &s).offset_y;
        assert!((up - 0.25).abs() < 1e-5);
        assert!((down + 0.25).abs() < 1e-5);
    }

    #[test]
    fn static_policy_never_moves() {
        let mut s = AnimationState::new();
        s.advance(3.0, &AnimationPolicy::Static);
        for row in 0..GRID_DIM {
            assert_eq!(AnimationPolicy::Static.row_motion(row, &s), RowMotion::STILL);
        }
        assert_eq!(s.phase(), 0.0);
    }

    #[test]
    fn rotate_axis_spins_every_row_without_phase() {
        let policy = AnimationPolicy::RotateAxis(Spin::new(Axis::Z, 45.0));
        let mut s = AnimationState::new();
        assert_eq!(s.advance(2.0, &policy), 0);
        for row in 0..GRID_DIM {
            let motion = policy.row_motion(row, &s);
            assert_eq!(motion, RowMotion { offset_y: 0.0, rotation: Some((90.0, Axis::Z)) });
        }
        assert_eq!(s.phase(), 0.0);
    }

    #[test]
    fn row_slots_track_swap() {
        let policy = swap_policy(1.0);
        let mut s = AnimationState::new();
        assert_eq!(s.row_slots(), [0, 1, 2, 3]);
        s.advance(1.0, &policy);
        assert_eq!(s.row_slots(), [0, 2, 1, 3]);
    }
}

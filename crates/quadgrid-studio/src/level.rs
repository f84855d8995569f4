/// Integer "iteration level" adjusted from the keyboard and shown in the title.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct IterationLevel(u8);

impl IterationLevel {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 6;

    /// Clamps `n` into `[MIN, MAX]`.
    pub fn new(n: i32) -> Self {
        Self(n.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Moves by `delta`, clamped. Returns `true` if the level changed.
    pub fn step(&mut self, delta: i32) -> bool {
        let next = Self::new(self.0 as i32 + delta);
        let changed = next != *self;
        *self = next;
        changed
    }

    pub fn increment(&mut self) -> bool {
        self.step(1)
    }

    pub fn decrement(&mut self) -> bool {
        self.step(-1)
    }

    /// Window title carrying the level.
    pub fn title(self, base: &str) -> String {
        format!("{base} · level {}", self.0)
    }
}

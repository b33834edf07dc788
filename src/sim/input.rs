//! Frame-sampled input intent
//!
//! Device listeners (keyboard, touch) feed this surface from the front-end;
//! the simulation only ever sees held levels and consume-once edges. Touch
//! swipes are synthesized as a brief held press that the frame loop expires,
//! so no timer callbacks mutate input state behind the simulation's back.

/// Logical movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// How long a synthesized swipe press stays held (seconds)
const TRANSIENT_HOLD: f32 = 0.1;

/// Per-direction held level + consume-once edge signals
#[derive(Debug, Clone, Default)]
pub struct InputIntent {
    held: [bool; 4],
    pressed: [bool; 4],
    /// Remaining hold time for synthesized (swipe) presses; 0 = not transient
    transient: [f32; 4],
}

impl InputIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down from a device. Sets the edge only on a fresh press, so a
    /// held key produces exactly one edge.
    pub fn press(&mut self, dir: Direction) {
        let i = dir.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
        self.transient[i] = 0.0;
    }

    /// Key-up from a device
    pub fn release(&mut self, dir: Direction) {
        self.held[dir.index()] = false;
    }

    /// Swipe: a fresh press that auto-releases after ~100ms of frame time
    pub fn press_transient(&mut self, dir: Direction) {
        let i = dir.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
        self.transient[i] = TRANSIENT_HOLD;
    }

    /// Expire synthesized holds; called once per frame by the driver
    pub fn tick_transients(&mut self, dt: f32) {
        for i in 0..4 {
            if self.transient[i] > 0.0 {
                self.transient[i] -= dt;
                if self.transient[i] <= 0.0 {
                    self.transient[i] = 0.0;
                    self.held[i] = false;
                }
            }
        }
    }

    /// Level signal: is the direction currently held
    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    /// Edge signal: true at most once per press; consuming clears it
    pub fn take_pressed(&mut self, dir: Direction) -> bool {
        let i = dir.index();
        let was = self.pressed[i];
        self.pressed[i] = false;
        was
    }

    /// Drop all state (run reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_consumed_once_per_press() {
        let mut intent = InputIntent::new();
        intent.press(Direction::Left);
        assert!(intent.take_pressed(Direction::Left));
        assert!(!intent.take_pressed(Direction::Left));

        // Still held: repeated key-down events do not re-arm the edge
        intent.press(Direction::Left);
        assert!(!intent.take_pressed(Direction::Left));

        // Release then press is a fresh edge
        intent.release(Direction::Left);
        intent.press(Direction::Left);
        assert!(intent.take_pressed(Direction::Left));
    }

    #[test]
    fn transient_press_expires() {
        let mut intent = InputIntent::new();
        intent.press_transient(Direction::Up);
        assert!(intent.is_held(Direction::Up));
        assert!(intent.take_pressed(Direction::Up));

        intent.tick_transients(0.05);
        assert!(intent.is_held(Direction::Up));
        intent.tick_transients(0.06);
        assert!(!intent.is_held(Direction::Up));
    }

    #[test]
    fn real_keydown_overrides_transient_hold() {
        let mut intent = InputIntent::new();
        intent.press_transient(Direction::Down);
        intent.press(Direction::Down);
        // Keyboard now owns the hold; transients must not release it
        intent.tick_transients(1.0);
        assert!(intent.is_held(Direction::Down));
    }
}

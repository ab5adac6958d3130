use super::color::Color;

/// One animated color channel.
///
/// `value` stays in `[0, 1]`. The sign of `step` is the current direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Channel {
    pub value: f32,
    pub step: f32,
}

impl Channel {
    #[inline]
    pub const fn new(value: f32, step: f32) -> Self {
        Self { value, step }
    }
}

/// Selects one channel of a [`ColorCycle`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rgb {
    R,
    G,
    B,
}

/// Advances `channel` by its step, reflecting off `0` and `1`.
///
/// Crossing a bound clamps the value onto it and flips the step to point back
/// into the range. The step's magnitude never changes.
pub fn next_channel(channel: Channel) -> Channel {
    next_channel_scaled(channel, 1.0)
}

/// Like [`next_channel`], but moves `steps` steps at once (may be fractional).
pub fn next_channel_scaled(channel: Channel, steps: f32) -> Channel {
    reflect(channel.value + channel.step * steps, channel.step)
}

fn reflect(value: f32, step: f32) -> Channel {
    if value > 1.0 {
        Channel::new(1.0, -step.abs())
    } else if value < 0.0 {
        Channel::new(0.0, step.abs())
    } else {
        Channel::new(value, step)
    }
}

/// Rate the channel steps are tuned for. [`ColorCycle::advance_by`] converts
/// elapsed seconds into steps at this rate.
pub const STEPS_PER_SECOND: f32 = 60.0;

/// Animated RGB color; alpha is always 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorCycle {
    pub r: Channel,
    pub g: Channel,
    pub b: Channel,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self {
            r: Channel::new(0.1, 0.01),
            g: Channel::new(0.8, 0.002),
            b: Channel::new(1.0, 0.05),
        }
    }
}

/// One animation step; each channel reflects independently.
pub fn next_color(current: ColorCycle) -> ColorCycle {
    ColorCycle {
        r: next_channel(current.r),
        g: next_channel(current.g),
        b: next_channel(current.b),
    }
}

impl ColorCycle {
    /// Current color as an opaque [`Color`].
    #[inline]
    pub fn color(&self) -> Color {
        Color::rgb(self.r.value, self.g.value, self.b.value)
    }

    /// Replaces `self` with [`next_color`].
    #[inline]
    pub fn advance(&mut self) {
        *self = next_color(*self);
    }

    /// Advances by `dt` seconds' worth of steps, so the animation speed does
    /// not depend on the frame rate.
    pub fn advance_by(&mut self, dt: f32) {
        let steps = dt.max(0.0) * STEPS_PER_SECOND;
        self.r = next_channel_scaled(self.r, steps);
        self.g = next_channel_scaled(self.g, steps);
        self.b = next_channel_scaled(self.b, steps);
    }

    /// Moves one channel by `amount` with the same reflection rule as stepping.
    pub fn nudge(&mut self, channel: Rgb, amount: f32) {
        let c = self.channel_mut(channel);
        *c = reflect(c.value + amount, c.step);
    }

    pub fn channel(&self, channel: Rgb) -> Channel {
        match channel {
            Rgb::R => self.r,
            Rgb::G => self.g,
            Rgb::B => self.b,
        }
    }

    fn channel_mut(&mut self, channel: Rgb) -> &mut Channel {
        match channel {
            Rgb::R => &mut self.r,
            Rgb::G => &mut self.g,
            Rgb::B => &mut self.b,
        }
    }
}

/// Animated scalar (opacity) keyed on the frame clock, in seconds.
///
/// Retargeting overwrites the record starting from the value currently shown, so a newer
/// transition always supersedes an in-flight one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Fade {
    from: f32,
    to: f32,
    start: f64,
    duration: f64,
}

impl Fade {
    pub(in crate::app) fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration: 0.0,
        }
    }

    pub(in crate::app) fn value_at(&self, now: f64) -> f32 {
        if now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }

        let t = ((now - self.start) / self.duration) as f32;
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    pub(in crate::app) fn retarget(&mut self, to: f32, now: f64, delay: f64, duration: f64) {
        let from = self.value_at(now);
        *self = Self {
            from,
            to,
            start: now + delay.max(0.0),
            duration: duration.max(0.0),
        };
    }

    #[cfg(test)]
    pub(in crate::app) fn target(&self) -> f32 {
        self.to
    }

    pub(in crate::app) fn is_animating(&self, now: f64) -> bool {
        now < self.start + self.duration && self.from != self.to
    }
}

fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

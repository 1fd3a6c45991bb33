use crate::MIN_TIME;

/*
Exponential Ramp
================

Both the frequency sweep and the gain envelope move between two positive
values along an exponential curve:

    v(t) = v0 * (v1 / v0) ^ (t / T)        0 <= t <= T
    v(t) = v1                               t > T

Exponential ramps sound "straight" to the ear: pitch is perceived on a log
scale, and loudness decays the way struck objects do. A linear fade from
0.2 to 0.01 would sound like it hangs, then drops off a cliff.

    Level
     v0 ┐╲
        │ ╲
        │  ╲_
        │    ╲__
        │       ╲____
     v1 └────────────╲━━━━━━━━━ (holds v1)
        0            T

Implementation
--------------

Instead of calling powf() per sample we precompute the per-sample ratio

    ratio = (v1 / v0) ^ (1 / samples)

and multiply the running value by it. Rounding drift over a few thousand
samples is tiny, and the value is snapped to v1 exactly on the last step so
the tail always lands on the target.

Zero and sign changes are not representable on an exponential curve; both
endpoints are clamped to a small positive minimum.
*/

const MIN_VALUE: f32 = 1.0e-6;

#[derive(Debug, Clone)]
pub struct ExpRamp {
    end: f32,
    value: f32,
    ratio: f32,
    total_samples: u32,
    elapsed_samples: u32,
}

impl ExpRamp {
    /// Ramp from `start` to `end` over `duration` seconds.
    pub fn new(start: f32, end: f32, duration: f32, sample_rate: f32) -> Self {
        let start = start.max(MIN_VALUE);
        let end = end.max(MIN_VALUE);
        let total_samples = (duration.max(MIN_TIME) * sample_rate).round().max(1.0) as u32;
        let ratio = (end / start).powf(1.0 / total_samples as f32);

        Self {
            end,
            value: start,
            ratio,
            total_samples,
            elapsed_samples: 0,
        }
    }

    /// Ramp that holds a single value.
    pub fn constant(value: f32) -> Self {
        let value = value.max(MIN_VALUE);
        Self {
            end: value,
            value,
            ratio: 1.0,
            total_samples: 1,
            elapsed_samples: 1,
        }
    }

    /// Return the current value, then advance one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let current = self.value;

        if self.elapsed_samples < self.total_samples {
            self.elapsed_samples += 1;
            if self.elapsed_samples == self.total_samples {
                self.value = self.end;
            } else {
                self.value *= self.ratio;
            }
        }

        current
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_samples >= self.total_samples
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

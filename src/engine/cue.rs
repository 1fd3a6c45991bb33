use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Cue Choreographies
==================

A cue is a named UI feedback sound. Each one is a short, fixed list of tone
primitive calls, each fired at a millisecond offset from the trigger:

  success
  0 ms    ├─ sweep 600→900 Hz, 150 ms
  120 ms  │    ├─ sweep 800→1100 Hz, 150 ms
  280 ms  │    │      ├─ dual 900 + 1200 Hz, 100 ms
          ▼    ▼      ▼
  time  ──┴────┴──────┴────────→

Offsets are shorter than the tones, so consecutive steps overlap and the
mixer blends them into one gesture. Every table below is data: the engine
walks it, running offset-0 steps right away and scheduling the rest.

The rotating cue is different: it plays a single step chosen from five
variants, and only if a second has passed since it last played.
*/

/// One tone primitive invocation with fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneCall {
    /// Square wave swept exponentially from `start_hz` to `end_hz`.
    Sweep {
        start_hz: f32,
        end_hz: f32,
        duration_ms: u32,
        volume: f32,
    },
    /// Square at `square_hz` plus sine at `sine_hz`, started together.
    Dual {
        square_hz: f32,
        sine_hz: f32,
        duration_ms: u32,
        volume: f32,
    },
}

impl ToneCall {
    pub const fn sweep(start_hz: f32, end_hz: f32, duration_ms: u32, volume: f32) -> Self {
        Self::Sweep {
            start_hz,
            end_hz,
            duration_ms,
            volume,
        }
    }

    pub const fn dual(square_hz: f32, sine_hz: f32, duration_ms: u32, volume: f32) -> Self {
        Self::Dual {
            square_hz,
            sine_hz,
            duration_ms,
            volume,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        match self {
            Self::Sweep { duration_ms, .. } | Self::Dual { duration_ms, .. } => *duration_ms,
        }
    }
}

/// A tone call at an offset from the moment its cue was triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub offset_ms: u64,
    pub call: ToneCall,
}

const fn at(offset_ms: u64, call: ToneCall) -> Step {
    Step { offset_ms, call }
}

// A sweep with equal endpoints is a plain beep; only the envelope moves.
const CLICK: &[Step] = &[at(0, ToneCall::sweep(800.0, 800.0, 50, 0.15))];

const SUCCESS: &[Step] = &[
    at(0, ToneCall::sweep(600.0, 900.0, 150, 0.2)),
    at(120, ToneCall::sweep(800.0, 1100.0, 150, 0.2)),
    at(280, ToneCall::dual(900.0, 1200.0, 100, 0.25)),
];

const LOADING_TICK: &[Step] = &[at(0, ToneCall::sweep(400.0, 600.0, 60, 0.15))];

// C5 + G5, then E5 + B5
const CHIME: &[Step] = &[
    at(0, ToneCall::dual(523.0, 784.0, 200, 0.2)),
    at(150, ToneCall::dual(659.0, 988.0, 200, 0.2)),
];

const NOTIFICATION: &[Step] = &[
    at(0, ToneCall::sweep(600.0, 800.0, 100, 0.18)),
    at(80, ToneCall::sweep(700.0, 900.0, 100, 0.18)),
];

const SECTION_TRANSITION: &[Step] = &[
    at(0, ToneCall::sweep(300.0, 700.0, 120, 0.2)),
    at(100, ToneCall::sweep(500.0, 900.0, 100, 0.18)),
    at(240, ToneCall::dual(700.0, 1000.0, 80, 0.2)),
];

const HACKER_ACCESS: &[Step] = &[
    at(0, ToneCall::sweep(200.0, 800.0, 150, 0.2)),
    at(180, ToneCall::sweep(800.0, 1200.0, 100, 0.15)),
    at(320, ToneCall::dual(600.0, 900.0, 120, 0.2)),
];

/// Variants of the rotating cue, indexed by rotation position.
pub const ROTATION_VARIANTS: [ToneCall; 5] = [
    // ascending glitch
    ToneCall::sweep(300.0, 900.0, 80, 0.2),
    // descending scan
    ToneCall::sweep(1000.0, 200.0, 100, 0.18),
    // digital secure
    ToneCall::dual(550.0, 750.0, 90, 0.2),
    // system ping
    ToneCall::sweep(400.0, 1100.0, 110, 0.22),
    // network access
    ToneCall::dual(680.0, 940.0, 85, 0.2),
];

/// How a cue is played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Choreography {
    Steps(&'static [Step]),
    /// One of [`ROTATION_VARIANTS`], rate limited.
    Rotating,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Click,
    Success,
    LoadingTick,
    Chime,
    Notification,
    SectionTransition,
    HackerAccess,
    RotatingHacker,
}

impl Cue {
    pub const ALL: [Cue; 8] = [
        Cue::Click,
        Cue::Success,
        Cue::LoadingTick,
        Cue::Chime,
        Cue::Notification,
        Cue::SectionTransition,
        Cue::HackerAccess,
        Cue::RotatingHacker,
    ];

    pub fn choreography(self) -> Choreography {
        match self {
            Cue::Click => Choreography::Steps(CLICK),
            Cue::Success => Choreography::Steps(SUCCESS),
            Cue::LoadingTick => Choreography::Steps(LOADING_TICK),
            Cue::Chime => Choreography::Steps(CHIME),
            Cue::Notification => Choreography::Steps(NOTIFICATION),
            Cue::SectionTransition => Choreography::Steps(SECTION_TRANSITION),
            Cue::HackerAccess => Choreography::Steps(HACKER_ACCESS),
            Cue::RotatingHacker => Choreography::Rotating,
        }
    }

    /// Steps of a fixed cue; empty for the rotating cue.
    pub fn steps(self) -> &'static [Step] {
        match self.choreography() {
            Choreography::Steps(steps) => steps,
            Choreography::Rotating => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Success => "success",
            Cue::LoadingTick => "loading-tick",
            Cue::Chime => "chime",
            Cue::Notification => "notification",
            Cue::SectionTransition => "section-transition",
            Cue::HackerAccess => "hacker-access",
            Cue::RotatingHacker => "rotating-hacker",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCue(pub String);

impl fmt::Display for UnknownCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cue `{}`", self.0)
    }
}

impl std::error::Error for UnknownCue {}

impl FromStr for Cue {
    type Err = UnknownCue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cue::ALL
            .into_iter()
            .find(|cue| cue.name() == s)
            .ok_or_else(|| UnknownCue(s.to_string()))
    }
}

use crate::graph::node::{GraphNode, RenderCtx};

/*
Start/Stop Gate
===============

A tone is scheduled in audio time: it starts at one absolute frame and stops
at another, independent of where the mixer's block boundaries fall.

  block      |--------|--------|--------|--------|
  tone               [start          stop)
  output     0000000SSSSSSSSSSSSSSSSSS0000000000000

The inner node is only rendered for the frames inside the window, so its
ramps begin at the tone's own start frame. Frames outside the window are
silent. Once the stop frame has passed the gate reports inactive and the
mixer drops it.

A realtime tone can reach the mixer after its start frame, when the audio
callback ran between reading the clock and picking the tone up. The whole
window then slides to the first block the gate sees, so the tone still
plays its full length and its envelope still ends on the floor:

  tone               [start          stop)
  arrives                 ↓
  plays                   [start'         stop')
*/

pub struct Gate<N> {
    inner: N,
    start_frame: u64,
    stop_frame: u64,
    started: bool,
    finished: bool,
}

impl<N> Gate<N> {
    pub fn new(inner: N, start_frame: u64, stop_frame: u64) -> Self {
        Self {
            inner,
            start_frame,
            stop_frame: stop_frame.max(start_frame),
            started: false,
            finished: false,
        }
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn stop_frame(&self) -> u64 {
        self.stop_frame
    }
}

impl<N: GraphNode> GraphNode for Gate<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);
        if self.finished {
            return;
        }

        let block_start = ctx.frame;
        let block_end = ctx.frame + out.len() as u64;

        if block_end <= self.start_frame {
            return;
        }

        if !self.started {
            self.started = true;
            let late = block_start.saturating_sub(self.start_frame);
            self.start_frame += late;
            self.stop_frame += late;
        }

        let from = self.start_frame.saturating_sub(block_start) as usize;
        let to = self.stop_frame.min(block_end).saturating_sub(block_start) as usize;

        if from < to {
            let sub_ctx = RenderCtx::new(ctx.sample_rate, block_start + from as u64);
            self.inner.render_block(&mut out[from..to], &sub_ctx);
        }

        if block_end >= self.stop_frame {
            self.finished = true;
        }
    }

    fn is_active(&self) -> bool {
        !self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits 1.0 per rendered frame and counts them.
    struct Ones {
        rendered: usize,
    }

    impl GraphNode for Ones {
        fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
            out.fill(1.0);
            self.rendered += out.len();
        }
    }

    #[test]
    fn renders_only_inside_window() {
        let mut gate = Gate::new(Ones { rendered: 0 }, 5, 13);
        let mut block = [0.0f32; 8];

        gate.render_block(&mut block, &RenderCtx::new(1_000.0, 0));
        assert_eq!(block, [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert!(gate.is_active());

        gate.render_block(&mut block, &RenderCtx::new(1_000.0, 8));
        assert_eq!(block, [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert!(!gate.is_active());
        assert_eq!(gate.inner.rendered, 8);
    }

    #[test]
    fn late_arrival_plays_its_full_length() {
        let mut gate = Gate::new(Ones { rendered: 0 }, 0, 6);
        let mut block = [0.5f32; 4];

        gate.render_block(&mut block, &RenderCtx::new(1_000.0, 100));
        assert_eq!(block, [1.0; 4]);
        assert_eq!((gate.start_frame(), gate.stop_frame()), (100, 106));
        assert!(gate.is_active());

        gate.render_block(&mut block, &RenderCtx::new(1_000.0, 104));
        assert_eq!(block, [1.0, 1.0, 0.0, 0.0]);
        assert!(!gate.is_active());
        assert_eq!(gate.inner.rendered, 6);
    }

    #[test]
    fn window_is_fixed_once_playing() {
        let mut gate = Gate::new(Ones { rendered: 0 }, 2, 10);
        let mut block = [0.0f32; 4];

        gate.render_block(&mut block, &RenderCtx::new(1_000.0, 0));
        gate.render_block(&mut block, &RenderCtx::new(1_000.0, 4));
        assert_eq!((gate.start_frame(), gate.stop_frame()), (2, 10));
        assert_eq!(gate.inner.rendered, 6);
    }
}

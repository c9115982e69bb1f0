use std::collections::VecDeque;

use eframe::egui::Context;

const FPS_SAMPLE_WINDOW: usize = 180;

#[derive(Debug, Default)]
pub(super) struct FpsCounter {
    current: f32,
    samples: VecDeque<f32>,
}

impl FpsCounter {
    pub(super) fn update(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        self.record(dt);
    }

    fn record(&mut self, dt: f32) {
        if dt <= f32::EPSILON {
            return;
        }

        self.current = (1.0 / dt).clamp(0.0, 1000.0);
        self.samples.push_back(self.current);
        while self.samples.len() > FPS_SAMPLE_WINDOW {
            self.samples.pop_front();
        }
    }

    pub(super) fn display_text(&self) -> String {
        let mut parts = vec![format!("FPS {:.0}", self.current)];

        if !self.samples.is_empty() {
            let avg = self.samples.iter().sum::<f32>() / self.samples.len() as f32;
            parts.push(format!("avg {avg:.1}"));
        }

        if self.current > f32::EPSILON {
            parts.push(format!("{:.1} ms", 1000.0 / self.current));
        }

        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_a_bounded_window() {
        let mut fps = FpsCounter::default();
        for _ in 0..(FPS_SAMPLE_WINDOW + 20) {
            fps.record(1.0 / 60.0);
        }
        fps.record(0.0);

        assert_eq!(fps.samples.len(), FPS_SAMPLE_WINDOW);
        assert_eq!(fps.display_text(), "FPS 60 | avg 60.0 | 16.7 ms");
    }
}

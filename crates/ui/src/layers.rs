//! Background asset layers.
//!
//! One layer per video asset, cycled by card index. Frames are prepared off
//! the UI thread and handed over through a pending slot (the same pattern
//! the async deck load uses); a layer's readiness signal fires when its
//! first frame has been uploaded as a texture. Actual video decode is out
//! of scope — each asset yields a synthesized monochrome frame seeded by
//! its source name, which exercises the full readiness pipeline.

use std::sync::{Arc, Mutex};

use eframe::egui;
use snapdeck_core::VideoLayer;

/// Seconds for the opacity tween between layers (the CSS-equivalent
/// `duration-1000` crossfade).
const CROSSFADE_SECS: f32 = 1.0;

pub struct BackgroundLayers {
    sources: Vec<String>,
    textures: Vec<Option<egui::TextureHandle>>,
    /// Painted opacity per layer, eased toward the engine's target.
    opacities: Vec<f32>,
    pending: Arc<Mutex<Vec<(usize, egui::ColorImage)>>>,
    started: bool,
}

impl BackgroundLayers {
    pub fn new(sources: Vec<String>) -> Self {
        let n = sources.len();
        Self {
            sources,
            textures: vec![None; n],
            opacities: vec![0.0; n],
            pending: Arc::new(Mutex::new(Vec::new())),
            started: false,
        }
    }

    pub fn asset_count(&self) -> usize {
        self.sources.len()
    }

    /// Kick off frame preparation on first call; subsequent calls upload
    /// any frames that finished and report readiness to the engine.
    pub fn poll(&mut self, ctx: &egui::Context, video: &mut VideoLayer, now_ms: f64) {
        if !self.started {
            self.started = true;
            self.spawn_preparation(ctx);
        }

        let finished: Vec<(usize, egui::ColorImage)> = {
            let mut lock = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *lock)
        };
        for (index, image) in finished {
            let name = format!("layer-{index}");
            let texture = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
            if let Some(slot) = self.textures.get_mut(index) {
                *slot = Some(texture);
            }
            video.asset_ready(index, now_ms);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_preparation(&self, ctx: &egui::Context) {
        let pending = Arc::clone(&self.pending);
        let sources = self.sources.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            for (index, source) in sources.iter().enumerate() {
                let image = synthesize_frame(index, source);
                if let Ok(mut lock) = pending.lock() {
                    lock.push((index, image));
                }
                ctx.request_repaint();
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn_preparation(&self, ctx: &egui::Context) {
        // No threads on the web target: prepare inline, then repaint.
        let mut lock = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        for (index, source) in self.sources.iter().enumerate() {
            lock.push((index, synthesize_frame(index, source)));
        }
        ctx.request_repaint();
    }

    /// Paint all layers into `rect`, easing each painted opacity toward the
    /// engine's published target.
    pub fn paint(&mut self, painter: &egui::Painter, rect: egui::Rect, video: &VideoLayer, dt: f32) {
        let step = (dt / CROSSFADE_SECS).clamp(0.0, 1.0);
        for (index, texture) in self.textures.iter().enumerate() {
            let target = video.opacity(index);
            let current = &mut self.opacities[index];
            *current += (target - *current) * step;
            if *current < 0.004 {
                continue;
            }
            let Some(texture) = texture else {
                continue;
            };
            let tint =
                egui::Color32::from_white_alpha((*current * 255.0).round().clamp(0.0, 255.0) as u8);
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                tint,
            );
        }
    }
}

/// Stand-in for a decoded first video frame: a desaturated gradient with
/// drifting bands, seeded by the source name so each asset is
/// distinguishable.
fn synthesize_frame(index: usize, source: &str) -> egui::ColorImage {
    const W: usize = 160;
    const H: usize = 90;
    let seed = source
        .bytes()
        .fold(index as u32 + 1, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let mut pixels = Vec::with_capacity(W * H);
    for y in 0..H {
        for x in 0..W {
            let band = ((x * 7 + y * 3 + seed as usize) % 97) as f32 / 97.0;
            let fade = y as f32 / H as f32;
            let v = (40.0 + 120.0 * fade + 40.0 * band) as u8;
            pixels.push(egui::Color32::from_gray(v));
        }
    }
    egui::ColorImage::new([W, H], pixels)
}

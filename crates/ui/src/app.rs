use std::sync::{Arc, Mutex};

use eframe::egui;
use snapdeck_core::{CardCarousel, SectionDeck, VideoLayer, demo_deck, entrance_plan, parse_deck};
use snapdeck_protocol::motion::EntrancePlan;
use snapdeck_protocol::{CardInfo, Deck, Direction, SlotBounds, Window};

use crate::anim;
use crate::layers::BackgroundLayers;
use crate::theme;

/// Gap between carousel cards, in points.
const CARD_GAP: f32 = 48.0;
/// Horizontal padding of the carousel window, as a fraction of its width.
const CAROUSEL_PAD: f32 = 0.175;
/// Idle time after the last wheel event before snapping kicks in.
const SNAP_IDLE_MS: f64 = 180.0;
/// Per-second approach rate of the smooth-scroll animation.
const SCROLL_STIFFNESS: f32 = 10.0;

/// One axis of host-side scroll presentation: the live offset plus an
/// optional snap target the offset animates toward.
struct ScrollSurface {
    offset: f32,
    target: Option<f32>,
    last_input_at: f64,
}

impl ScrollSurface {
    fn new() -> Self {
        Self {
            offset: 0.0,
            target: None,
            last_input_at: f64::MIN,
        }
    }

    fn nudge(&mut self, delta: f32, max: f32, now_ms: f64) {
        self.offset = (self.offset + delta).clamp(0.0, max.max(0.0));
        self.target = None;
        self.last_input_at = now_ms;
    }

    fn idle(&self, now_ms: f64) -> bool {
        now_ms - self.last_input_at > SNAP_IDLE_MS
    }

    /// Step the offset toward the target. Returns true while still moving.
    fn animate(&mut self, dt: f32, immediate: bool) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        if immediate {
            self.offset = target;
            self.target = None;
            return false;
        }
        let delta = target - self.offset;
        if delta.abs() < 0.5 {
            self.offset = target;
            self.target = None;
            return false;
        }
        self.offset += delta * (dt * SCROLL_STIFFNESS).min(1.0);
        true
    }
}

/// Exit bookkeeping for the card that just scrolled away.
struct ExitingCard {
    index: usize,
    left_at: f64,
    plan: EntrancePlan,
}

/// Main application state.
pub struct DeckApp {
    deck: Deck,
    sections: SectionDeck,
    carousel: CardCarousel,
    video: VideoLayer,
    layers: BackgroundLayers,

    vertical: ScrollSurface,
    horizontal: ScrollSurface,
    carousel_aligned: bool,

    /// Entrance plan for the card currently authoritative.
    entrance: EntrancePlan,
    card_entered_at: f64,
    exiting: Option<ExitingCard>,

    reduced_motion: bool,
    error: Option<String>,
    /// Deck bytes from an async load (file dialog, wasm fetch).
    pending_deck: Arc<Mutex<Option<Vec<u8>>>>,
    /// Viewport size of the previous frame: the height doubles as the jump
    /// extent, and any change on either axis forces a recomputation.
    last_view_h: f32,
    last_view_w: f32,
    /// Horizontal component of this frame's pointer drag, consumed by the
    /// carousel once its rect is known.
    drag_x: f32,
}

impl DeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let pending_deck: Arc<Mutex<Option<Vec<u8>>>> = Arc::new(Mutex::new(None));

        // On WASM, check the URL hash for an auto-load deck.
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(w) = web_sys::window() {
                let hash = w.location().hash().unwrap_or_default();
                if hash == "#demo" {
                    let pd = pending_deck.clone();
                    let ctx = cc.egui_ctx.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match Self::fetch_bytes("/assets/demo-deck.json").await {
                            Ok(bytes) => {
                                if let Ok(mut lock) = pd.lock() {
                                    *lock = Some(bytes);
                                }
                                ctx.request_repaint();
                            }
                            Err(e) => {
                                web_sys::console::error_1(
                                    &format!("snapdeck: fetch error: {e}").into(),
                                );
                            }
                        }
                    });
                }
            }
        }

        let mut app = Self {
            deck: demo_deck(),
            sections: SectionDeck::new(Vec::new(), 0.0),
            carousel: CardCarousel::new(0),
            video: VideoLayer::new(0),
            layers: BackgroundLayers::new(Vec::new()),
            vertical: ScrollSurface::new(),
            horizontal: ScrollSurface::new(),
            carousel_aligned: false,
            entrance: entrance_plan(Direction::Forward, snapdeck_core::motion::DEFAULT_BASE_DELAY),
            card_entered_at: 0.0,
            exiting: None,
            reduced_motion: false,
            error: None,
            pending_deck,
            last_view_h: 0.0,
            last_view_w: 0.0,
            drag_x: 0.0,
        };
        app.rebuild_engine(0.0);
        app
    }

    /// Reset every engine piece for the current deck. Runs at startup and
    /// after each deck load, restarting the settle burst.
    fn rebuild_engine(&mut self, now_ms: f64) {
        self.sections = SectionDeck::new(self.deck.sections.clone(), now_ms);
        self.carousel = CardCarousel::new(self.deck.video_assets.len());
        self.video = VideoLayer::new(self.deck.video_assets.len());
        self.layers = BackgroundLayers::new(self.deck.video_assets.clone());
        self.vertical = ScrollSurface::new();
        self.horizontal = ScrollSurface::new();
        self.carousel_aligned = false;
        self.card_entered_at = now_ms;
        self.exiting = None;
    }

    fn load_deck(&mut self, data: &[u8], now_ms: f64) {
        match parse_deck(data) {
            Ok(deck) => {
                self.deck = deck;
                self.error = None;
                self.rebuild_engine(now_ms);
            }
            Err(e) => {
                self.error = Some(format!("Failed to load deck: {e}"));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window = web_sys::window().ok_or("no window")?;
        let resp_value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| format!("{e:?}"))?;
        let resp: web_sys::Response = resp_value.dyn_into().map_err(|_| "not a Response")?;
        if !resp.ok() {
            return Err(format!("HTTP {}", resp.status()));
        }
        let buf = JsFuture::from(resp.array_buffer().map_err(|e| format!("{e:?}"))?)
            .await
            .map_err(|e| format!("{e:?}"))?;
        Ok(js_sys::Uint8Array::new(&buf).to_vec())
    }

    /// Section slot geometry in content coordinates, one viewport-height
    /// slot per section, read fresh every frame.
    fn section_slots(&self, viewport_h: f32) -> Vec<SlotBounds> {
        (0..self.deck.sections.len())
            .map(|i| {
                SlotBounds::new(
                    f64::from(i as f32 * viewport_h),
                    f64::from((i + 1) as f32 * viewport_h),
                )
            })
            .collect()
    }

    /// Card slot geometry in content coordinates.
    fn card_slots(&self, card_w: f32, pad: f32) -> Vec<SlotBounds> {
        (0..self.deck.cards.len())
            .map(|i| {
                let start = pad + i as f32 * (card_w + CARD_GAP);
                SlotBounds::new(f64::from(start), f64::from(start + card_w))
            })
            .collect()
    }

    fn card_window(&self, view_w: f32) -> (f32, f32) {
        let pad = view_w * CAROUSEL_PAD;
        let card_w = view_w - 2.0 * pad;
        (pad, card_w)
    }

    /// Apply one carousel index change: report upward, move the video
    /// selector, and restart the entrance animation against the direction
    /// of travel.
    fn on_card_change(&mut self, change: snapdeck_core::CardIndexChange, now_ms: f64) {
        let previous = self.sections.card_index();
        self.sections.note_card_index(change.card_index);
        self.video.set_selector(change.card_index);
        self.exiting = Some(ExitingCard {
            index: previous,
            left_at: now_ms,
            plan: self.entrance,
        });
        self.entrance = entrance_plan(
            self.carousel.state().direction,
            snapdeck_core::motion::DEFAULT_BASE_DELAY,
        );
        self.card_entered_at = now_ms;
    }

    fn draw_nav(&mut self, ctx: &egui::Context) {
        let accent = theme::to_color32(self.sections.accent());
        let current = self.sections.state().current_index;
        let viewport_h = if self.last_view_h > 0.0 {
            self.last_view_h
        } else {
            ctx.input(|i| i.screen_rect()).height()
        };

        egui::TopBottomPanel::bottom("nav").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(err) = &self.error {
                        ui.colored_label(egui::Color32::RED, err);
                        ui.separator();
                    }
                    for (index, section) in self.deck.sections.iter().enumerate() {
                        let active = index == current;
                        let fill = if active {
                            accent.gamma_multiply(0.125)
                        } else {
                            egui::Color32::TRANSPARENT
                        };
                        let stroke = if active {
                            egui::Stroke::new(1.0, accent)
                        } else {
                            egui::Stroke::NONE
                        };
                        let button = egui::Button::new(
                            egui::RichText::new(&section.title).color(accent).strong(),
                        )
                        .fill(fill)
                        .stroke(stroke);
                        if ui.add(button).clicked() {
                            let request = self.sections.jump_target(
                                index,
                                f64::from(viewport_h),
                                self.reduced_motion,
                            );
                            self.vertical.target = Some(request.offset as f32);
                            if request.immediate {
                                self.vertical.offset = request.offset as f32;
                                self.vertical.target = None;
                            }
                            self.sections.note_event();
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.checkbox(&mut self.reduced_motion, "Reduce motion");
                        #[cfg(not(target_arch = "wasm32"))]
                        if ui.button("Open deck").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Deck", &["json"])
                                .pick_file()
                            {
                                match std::fs::read(&path) {
                                    Ok(data) => {
                                        if let Ok(mut lock) = self.pending_deck.lock() {
                                            *lock = Some(data);
                                        }
                                    }
                                    Err(e) => {
                                        self.error = Some(format!("Failed to read file: {e}"));
                                    }
                                }
                            }
                        }
                    });
                });
            });
    }

    fn draw_section_content(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        index: usize,
        accent: egui::Color32,
    ) {
        let section = &self.deck.sections[index];
        painter.text(
            rect.center() - egui::vec2(0.0, rect.height() * 0.05),
            egui::Align2::CENTER_CENTER,
            &section.title,
            egui::FontId::proportional(64.0),
            egui::Color32::WHITE,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, rect.height() * 0.08),
            egui::Align2::CENTER_CENTER,
            &section.id,
            egui::FontId::proportional(16.0),
            accent.gamma_multiply(0.7),
        );
    }

    fn draw_card(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        card: &CardInfo,
        index: usize,
        view_w: f32,
        now_ms: f64,
    ) {
        let face = theme::card_face(index, card.background_color.as_deref());
        painter.rect_filled(rect, egui::CornerRadius::same(6), face);

        // Which animation applies: entering pose for the authoritative
        // card, exiting pose for the one that just left, rest otherwise.
        #[derive(Clone, Copy)]
        enum Pose {
            Enter(f32),
            Exit(f32),
            Rest,
        }
        let pose = if index == self.sections.card_index() {
            Pose::Enter(((now_ms - self.card_entered_at) / 1000.0) as f32)
        } else if let Some(exiting) = &self.exiting {
            if exiting.index == index {
                Pose::Exit(((now_ms - exiting.left_at) / 1000.0) as f32)
            } else {
                Pose::Rest
            }
        } else {
            Pose::Rest
        };
        let plan = match &pose {
            Pose::Exit(_) => {
                if let Some(e) = &self.exiting {
                    e.plan
                } else {
                    self.entrance
                }
            }
            _ => self.entrance,
        };

        let sample = |child: usize, phase: &snapdeck_protocol::motion::ElementPhase| {
            match pose {
                Pose::Enter(elapsed) => {
                    let extra = anim::stagger_delay(plan.container.enter, child, 3)
                        + plan.container.enter_delay;
                    anim::sample_enter(phase, elapsed, extra)
                }
                Pose::Exit(elapsed) => {
                    let extra = anim::stagger_delay(plan.container.leave, child, 3);
                    anim::sample_exit(phase, elapsed, extra)
                }
                Pose::Rest => phase.visible,
            }
        };

        let title_pose = sample(0, &plan.title);
        painter.text(
            rect.center() + egui::vec2(title_pose.x * view_w, -24.0),
            egui::Align2::CENTER_CENTER,
            &card.client,
            egui::FontId::proportional(32.0),
            egui::Color32::WHITE.gamma_multiply(title_pose.opacity),
        );

        let metric_pose = sample(1, &plan.metric);
        painter.text(
            rect.center() + egui::vec2(metric_pose.x * view_w, 16.0),
            egui::Align2::CENTER_CENTER,
            &card.metric,
            egui::FontId::proportional(18.0),
            egui::Color32::WHITE.gamma_multiply(metric_pose.opacity),
        );

        // Tag chips stagger independently inside their own group.
        let tag_count = card.tags.len();
        let mut x = rect.center().x - 40.0 * tag_count as f32 / 2.0;
        for (tag_index, tag) in card.tags.iter().enumerate() {
            let extra = match pose {
                Pose::Enter(_) => {
                    plan.tag_group.enter_delay
                        + anim::stagger_delay(plan.tag_group.enter, tag_index, tag_count)
                }
                _ => anim::stagger_delay(plan.tag_group.leave, tag_index, tag_count),
            };
            let chip = match pose {
                Pose::Enter(elapsed) => anim::sample_enter(&plan.tag_item, elapsed, extra),
                Pose::Exit(elapsed) => anim::sample_exit(&plan.tag_item, elapsed, extra),
                Pose::Rest => plan.tag_item.visible,
            };
            painter.text(
                egui::pos2(x, rect.center().y + 56.0 + chip.y * 0.5),
                egui::Align2::CENTER_CENTER,
                tag,
                egui::FontId::proportional(12.0 * chip.scale),
                egui::Color32::WHITE.gamma_multiply(chip.opacity * 0.8),
            );
            x += 40.0;
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;
        let dt = ctx.input(|i| i.stable_dt).min(0.1);

        // Deck JSON dropped onto the window.
        let dropped: Option<Vec<u8>> = ctx.input(|i| {
            i.raw.dropped_files.first().and_then(|file| {
                if let Some(bytes) = &file.bytes {
                    return Some(bytes.to_vec());
                }
                #[cfg(not(target_arch = "wasm32"))]
                if let Some(path) = &file.path {
                    return std::fs::read(path).ok();
                }
                None
            })
        });
        if let Some(data) = dropped {
            self.load_deck(&data, now_ms);
        }

        // Async-loaded deck bytes.
        let pending = {
            let mut lock = self.pending_deck.lock().unwrap_or_else(|e| e.into_inner());
            lock.take()
        };
        if let Some(data) = pending {
            self.load_deck(&data, now_ms);
        }

        // Mount-time settle burst: each correction pins the surface back
        // to the top until the restoration window has passed.
        if !self.sections.is_settled() {
            let poll = self.sections.poll_settle(now_ms);
            if poll.corrections > 0 {
                self.vertical.offset = 0.0;
                self.vertical.target = None;
            }
            ctx.request_repaint_after(std::time::Duration::from_millis(30));
        }

        self.draw_nav(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let view_h = available.height();
                let view_w = available.width();
                // Any stashed swipe is one frame old at most.
                self.drag_x = 0.0;

                // A resize moves every slot bound: recompute both axes
                // immediately, not on the next scroll.
                if (view_h - self.last_view_h).abs() > 0.5
                    || (view_w - self.last_view_w).abs() > 0.5
                {
                    self.sections.note_event();
                    self.carousel.note_event();
                }
                self.last_view_h = view_h;
                self.last_view_w = view_w;

                // The surface stays invisible until the settle window has
                // passed, so the user never sees the restoration fight.
                if !self.sections.is_revealed() {
                    ui.painter()
                        .rect_filled(available, egui::CornerRadius::ZERO, egui::Color32::BLACK);
                    return;
                }

                let response = ui.allocate_rect(available, egui::Sense::click_and_drag());
                let section_count = self.deck.sections.len();
                let max_scroll = (section_count.saturating_sub(1)) as f32 * view_h;

                // Vertical input: wheel and drag both feed the same offset.
                let scroll = ui.input(|i| i.smooth_scroll_delta);
                if scroll.y.abs() > 0.1 {
                    self.vertical.nudge(-scroll.y, max_scroll, now_ms);
                    self.sections.note_event();
                }
                if response.dragged() {
                    let drag = response.drag_delta();
                    if drag.y.abs() > drag.x.abs() {
                        self.vertical.nudge(-drag.y, max_scroll, now_ms);
                        self.sections.note_event();
                    } else if drag.x.abs() > 0.1 {
                        // Horizontal swipes belong to the carousel, routed
                        // once its rect is known.
                        self.drag_x = drag.x;
                    }
                }

                // Coalesced recomputation: at most once per painted frame,
                // observing the freshest geometry.
                let slots = self.section_slots(view_h);
                if self.sections.take_frame() {
                    let offset = f64::from(self.vertical.offset);
                    self.sections.observe(
                        offset,
                        Window::new(offset, offset + f64::from(view_h)),
                        &slots,
                    );
                }

                // Snap once input has been idle: the engine's index is the
                // authority on where the surface should come to rest.
                if self.vertical.target.is_none() && self.vertical.idle(now_ms) {
                    let rest = self.sections.state().current_index as f32 * view_h;
                    if (rest - self.vertical.offset).abs() > 0.5 {
                        self.vertical.target = Some(rest);
                    }
                }
                if self.vertical.animate(dt, self.reduced_motion) {
                    self.sections.note_event();
                    ctx.request_repaint();
                }

                // Downstream gating and readiness.
                self.video.set_gate(self.sections.reveal_video(), now_ms);
                self.video.tick(now_ms);
                self.layers.poll(ctx, &mut self.video, now_ms);

                // Paint each section slot that intersects the viewport.
                let painter = ui.painter_at(available);
                let accent = theme::to_color32(self.sections.accent());
                for (index, slot) in slots.iter().enumerate() {
                    let top = available.top() + (slot.start as f32 - self.vertical.offset);
                    let rect = egui::Rect::from_min_size(
                        egui::pos2(available.left(), top),
                        egui::vec2(view_w, view_h),
                    );
                    if rect.bottom() < available.top() || rect.top() > available.bottom() {
                        continue;
                    }

                    let background = self.sections.background(index);
                    let (top_color, bottom_color) = theme::background_gradient(background);
                    gradient_rect(&painter, rect, top_color, bottom_color);

                    if index == snapdeck_core::engine::section::VIDEO_SECTION_INDEX {
                        self.layers.paint(&painter, rect, &self.video, dt);
                        self.draw_carousel(ui, &painter, rect, now_ms, dt);
                    } else {
                        self.draw_section_content(&painter, rect, index, accent);
                    }
                }

                // Keep animating entrances and crossfades.
                if now_ms - self.card_entered_at < 3000.0 || self.vertical.target.is_some() {
                    ctx.request_repaint();
                }
            });
    }
}

impl DeckApp {
    fn draw_carousel(
        &mut self,
        ui: &egui::Ui,
        painter: &egui::Painter,
        rect: egui::Rect,
        now_ms: f64,
        dt: f32,
    ) {
        let view_w = rect.width();
        let (pad, card_w) = self.card_window(view_w);
        let slots = self.card_slots(card_w, pad);
        let max_scroll = slots
            .last()
            .map(|s| (s.start as f32 - pad).max(0.0))
            .unwrap_or(0.0);

        // Deterministic start at card 0, regardless of inherited offsets.
        if !self.carousel_aligned {
            self.carousel_aligned = true;
            let window = self.window_at(self.horizontal.offset, pad, view_w);
            if let Some(target) =
                self.carousel
                    .initial_target(f64::from(self.horizontal.offset), window, &slots)
            {
                self.horizontal.offset = target as f32;
            }
            self.carousel.note_event();
        }

        // Horizontal wheel and swipe input while the pointer is over the
        // carousel.
        let drag_x = std::mem::take(&mut self.drag_x);
        let hover = ui
            .input(|i| i.pointer.hover_pos())
            .is_some_and(|p| rect.contains(p));
        if hover {
            let scroll = ui.input(|i| i.smooth_scroll_delta);
            if scroll.x.abs() > 0.1 {
                self.horizontal.nudge(-scroll.x, max_scroll, now_ms);
                self.carousel.note_event();
            }
            if drag_x.abs() > 0.1 {
                self.horizontal.nudge(-drag_x, max_scroll, now_ms);
                self.carousel.note_event();
            }
        }

        let window = self.window_at(self.horizontal.offset, pad, view_w);
        if self.carousel.take_frame() {
            if let Some(change) =
                self.carousel
                    .observe(f64::from(self.horizontal.offset), window, &slots)
            {
                self.on_card_change(change, now_ms);
            }
        }

        // Snap-x mandatory: align the authoritative card after idle input.
        if self.horizontal.target.is_none() && self.horizontal.idle(now_ms) {
            if let Some(slot) = slots.get(self.carousel.state().current_index) {
                let rest = slot.start as f32 - pad;
                if (rest - self.horizontal.offset).abs() > 0.5 {
                    self.horizontal.target = Some(rest);
                }
            }
        }
        if self.horizontal.animate(dt, self.reduced_motion) {
            self.carousel.note_event();
            ui.ctx().request_repaint();
        }

        // Cards.
        for (index, slot) in slots.iter().enumerate() {
            let left = rect.left() + (slot.start as f32 - self.horizontal.offset);
            let card_rect = egui::Rect::from_min_size(
                egui::pos2(left, rect.top() + rect.height() * 0.12),
                egui::vec2(card_w, rect.height() * 0.68),
            );
            if card_rect.right() < rect.left() || card_rect.left() > rect.right() {
                continue;
            }
            self.draw_card(
                painter,
                card_rect,
                &self.deck.cards[index],
                index,
                view_w,
                now_ms,
            );
        }

        // Edge-aware navigation controls: hidden entirely at the edges.
        let state = self.carousel.state();
        if !state.at_leading_edge && edge_button(ui, painter, rect, true) {
            let target =
                self.carousel
                    .retreat_target(f64::from(self.horizontal.offset), window, &slots);
            self.seek(target, now_ms);
        }
        if !state.at_trailing_edge && edge_button(ui, painter, rect, false) {
            let target =
                self.carousel
                    .advance_target(f64::from(self.horizontal.offset), window, &slots);
            self.seek(target, now_ms);
        }
    }

    /// Start (or, under reduced motion, finish) a horizontal seek.
    fn seek(&mut self, target: Option<f64>, now_ms: f64) {
        let Some(target) = target else {
            return;
        };
        self.horizontal.target = Some(target as f32);
        self.horizontal.last_input_at = now_ms;
        if self.reduced_motion {
            self.horizontal.offset = target as f32;
            self.horizontal.target = None;
        }
        self.carousel.note_event();
    }

    /// Padded content window for the carousel at a given offset.
    fn window_at(&self, offset: f32, pad: f32, view_w: f32) -> Window {
        Window::new(
            f64::from(offset + pad),
            f64::from(offset + view_w - pad),
        )
    }
}

/// A round prev/next control on the carousel's edge. Returns true on click.
fn edge_button(ui: &egui::Ui, painter: &egui::Painter, rect: egui::Rect, leading: bool) -> bool {
    let center = if leading {
        egui::pos2(rect.left() + 36.0, rect.center().y)
    } else {
        egui::pos2(rect.right() - 36.0, rect.center().y)
    };
    let hit = egui::Rect::from_center_size(center, egui::vec2(44.0, 44.0));
    let id = ui.id().with(("carousel-edge", leading));
    let response = ui.interact(hit, id, egui::Sense::click());

    let alpha = if response.hovered() { 90 } else { 50 };
    painter.circle_filled(center, 22.0, egui::Color32::from_black_alpha(alpha));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        if leading { "‹" } else { "›" },
        egui::FontId::proportional(26.0),
        egui::Color32::WHITE,
    );
    response.clicked()
}

/// Fill a rect with a vertical two-stop gradient.
fn gradient_rect(painter: &egui::Painter, rect: egui::Rect, top: egui::Color32, bottom: egui::Color32) {
    use egui::epaint::{Mesh, Vertex, WHITE_UV};
    let mut mesh = Mesh::default();
    let base = mesh.vertices.len() as u32;
    for (pos, color) in [
        (rect.left_top(), top),
        (rect.right_top(), top),
        (rect.right_bottom(), bottom),
        (rect.left_bottom(), bottom),
    ] {
        mesh.vertices.push(Vertex {
            pos,
            uv: WHITE_UV,
            color,
        });
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    painter.add(egui::Shape::mesh(mesh));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_nudge_clamps_to_content_bounds() {
        let mut surface = ScrollSurface::new();
        surface.nudge(500.0, 300.0, 10.0);
        assert_eq!(surface.offset, 300.0);
        surface.nudge(-900.0, 300.0, 20.0);
        assert_eq!(surface.offset, 0.0);
    }

    #[test]
    fn nudge_cancels_a_pending_snap_and_resets_the_idle_clock() {
        let mut surface = ScrollSurface::new();
        surface.target = Some(600.0);
        surface.nudge(10.0, 1200.0, 50.0);
        assert_eq!(surface.target, None);
        assert!(!surface.idle(50.0 + SNAP_IDLE_MS));
        assert!(surface.idle(51.0 + SNAP_IDLE_MS));
    }

    #[test]
    fn animate_jumps_under_reduced_motion() {
        let mut surface = ScrollSurface::new();
        surface.target = Some(600.0);
        assert!(!surface.animate(0.016, true));
        assert_eq!(surface.offset, 600.0);
        assert_eq!(surface.target, None);
    }

    #[test]
    fn animate_approaches_then_lands_exactly() {
        let mut surface = ScrollSurface::new();
        surface.target = Some(100.0);
        assert!(surface.animate(0.016, false));
        assert!(surface.offset > 0.0 && surface.offset < 100.0);

        surface.offset = 99.8;
        assert!(!surface.animate(0.016, false));
        assert_eq!(surface.offset, 100.0);
        assert_eq!(surface.target, None);
    }
}

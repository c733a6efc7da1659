use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Block,
};
use snapdeck_core::engine::section::VIDEO_SECTION_INDEX;
use snapdeck_core::{CardCarousel, LayerPhase, SectionDeck, VideoLayer};
use snapdeck_protocol::{Deck, SlotBounds, Window};

/// Rows per arrow-key scroll step.
const SCROLL_STEP: f64 = 4.0;
/// Idle time before the surface snaps to the authoritative section.
const SNAP_IDLE: Duration = Duration::from_millis(300);

fn to_tui_color(c: snapdeck_protocol::Color) -> Color {
    Color::Rgb(
        (c.r * 255.0).round() as u8,
        (c.g * 255.0).round() as u8,
        (c.b * 255.0).round() as u8,
    )
}

fn section_slots(n: usize, extent: f64) -> Vec<SlotBounds> {
    (0..n)
        .map(|i| SlotBounds::new(i as f64 * extent, (i + 1) as f64 * extent))
        .collect()
}

fn card_slots(n: usize, card_w: f64, gap: f64, pad: f64) -> Vec<SlotBounds> {
    (0..n)
        .map(|i| {
            let start = pad + i as f64 * (card_w + gap);
            SlotBounds::new(start, start + card_w)
        })
        .collect()
}

pub fn run(deck: &Deck) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let started = Instant::now();
    let now_ms = |s: &Instant| s.elapsed().as_secs_f64() * 1000.0;

    let mut sections = SectionDeck::new(deck.sections.clone(), now_ms(&started));
    let mut carousel = CardCarousel::new(deck.video_assets.len());
    let mut video = VideoLayer::new(deck.video_assets.len());

    // No texture pipeline in the terminal: every asset is ready at once.
    for i in 0..deck.video_assets.len() {
        video.asset_ready(i, now_ms(&started));
    }

    let mut scroll_y: f64 = 0.0;
    let mut card_x: f64 = 0.0;
    let mut last_input = Instant::now();
    sections.note_event();
    carousel.note_event();

    loop {
        let now = now_ms(&started);

        // Mount-time settle burst pins the surface to the top.
        if !sections.is_settled() {
            let poll = sections.poll_settle(now);
            if poll.corrections > 0 {
                scroll_y = 0.0;
                sections.note_event();
            }
        }

        let term_size = terminal.size()?;
        let content_h = f64::from(term_size.height.saturating_sub(2));
        let content_w = f64::from(term_size.width);
        let pad = (content_w / 6.0).floor();
        let card_w = (content_w - 2.0 * pad).max(8.0);
        let gap = 6.0;

        let slots = section_slots(deck.sections.len(), content_h);
        let cards = card_slots(deck.cards.len(), card_w, gap, pad);
        let window = Window::new(scroll_y, scroll_y + content_h);
        let card_window = Window::new(card_x + pad, card_x + content_w - pad);

        if sections.take_frame() {
            sections.observe(scroll_y, window, &slots);
        }
        if carousel.take_frame() {
            if let Some(change) = carousel.observe(card_x, card_window, &cards) {
                sections.note_card_index(change.card_index);
                video.set_selector(change.card_index);
                tracing::debug!(card = change.card_index, video = change.video_index, "card change");
            }
        }

        // Idle snap on both axes.
        if last_input.elapsed() > SNAP_IDLE {
            let rest = sections.state().current_index as f64 * content_h;
            if (rest - scroll_y).abs() > 0.5 {
                scroll_y = rest;
                sections.note_event();
            }
            if let Some(slot) = cards.get(carousel.state().current_index) {
                let rest = slot.start - pad;
                if (rest - card_x).abs() > 0.5 {
                    card_x = rest;
                    carousel.note_event();
                }
            }
        }

        video.set_gate(sections.reveal_video(), now);
        video.tick(now);

        let revealed = sections.is_revealed();
        terminal.draw(|frame| {
            let area = frame.area();
            if !revealed {
                // Nothing until the settle window passes.
                frame.render_widget(
                    Block::default().style(Style::default().bg(Color::Black)),
                    area,
                );
                return;
            }
            draw_deck(
                frame, deck, &sections, &carousel, &video, scroll_y, card_x, pad, card_w, gap,
            );
        })?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down => {
                        let max = (deck.sections.len().saturating_sub(1)) as f64 * content_h;
                        scroll_y = (scroll_y + SCROLL_STEP).min(max);
                        sections.note_event();
                        last_input = Instant::now();
                    }
                    KeyCode::Up => {
                        scroll_y = (scroll_y - SCROLL_STEP).max(0.0);
                        sections.note_event();
                        last_input = Instant::now();
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = c as usize - '1' as usize;
                        let req = sections.jump_target(index, content_h, true);
                        scroll_y = req.offset;
                        sections.note_event();
                        last_input = Instant::now();
                    }
                    KeyCode::Right => {
                        if let Some(target) = carousel.advance_target(card_x, card_window, &cards)
                        {
                            card_x = target;
                            carousel.note_event();
                            last_input = Instant::now();
                        }
                    }
                    KeyCode::Left => {
                        if let Some(target) = carousel.retreat_target(card_x, card_window, &cards)
                        {
                            card_x = target;
                            carousel.note_event();
                            last_input = Instant::now();
                        }
                    }
                    _ => {}
                },
                Event::Resize(_, _) => {
                    // Every slot bound just changed; recompute both axes.
                    sections.note_event();
                    carousel.note_event();
                }
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_deck(
    frame: &mut ratatui::Frame<'_>,
    deck: &Deck,
    sections: &SectionDeck,
    carousel: &CardCarousel,
    video: &VideoLayer,
    scroll_y: f64,
    card_x: f64,
    pad: f64,
    card_w: f64,
    gap: f64,
) {
    let area = frame.area();
    let accent = to_tui_color(sections.accent());
    let content = Rect::new(0, 1, area.width, area.height.saturating_sub(2));
    let content_h = f64::from(content.height);

    // Header
    let header = Block::default()
        .title(format!(
            " snapdeck — {} sections, {} cards | ↑↓ scroll | ←→ cards | 1-{} jump | q quit ",
            deck.sections.len(),
            deck.cards.len(),
            deck.sections.len().min(9),
        ))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(header, Rect::new(0, 0, area.width, 1));

    // Sections, one viewport-height slot each.
    for (index, section) in deck.sections.iter().enumerate() {
        let top = index as f64 * content_h - scroll_y;
        if top + content_h <= 0.0 || top >= content_h {
            continue;
        }
        let row = |offset: f64| -> Option<u16> {
            let r = top + offset;
            if r < 0.0 || r >= content_h {
                None
            } else {
                Some(content.y + r as u16)
            }
        };

        if index == VIDEO_SECTION_INDEX {
            draw_carousel(frame, deck, sections, carousel, video, content, top, card_x, pad, card_w, gap);
        } else if let Some(y) = row(content_h / 3.0) {
            let title = &section.title;
            let x = (area.width.saturating_sub(title.len() as u16)) / 2;
            let buf = frame.buffer_mut();
            for (i, ch) in title.chars().enumerate() {
                let cx = x + i as u16;
                if cx < area.width {
                    buf[(cx, y)]
                        .set_char(ch)
                        .set_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
                }
            }
        }
    }

    // Nav bar with the active section highlighted in the accent color.
    let nav_y = area.height.saturating_sub(1);
    let current = sections.state().current_index;
    let mut x: u16 = 1;
    let buf = frame.buffer_mut();
    for (index, section) in deck.sections.iter().enumerate() {
        let label = format!(" {} ", section.title);
        let style = if index == current {
            Style::default().fg(Color::Black).bg(accent)
        } else {
            Style::default().fg(accent)
        };
        for ch in label.chars() {
            if x >= area.width {
                break;
            }
            buf[(x, nav_y)].set_char(ch).set_style(style);
            x += 1;
        }
        x += 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_carousel(
    frame: &mut ratatui::Frame<'_>,
    deck: &Deck,
    sections: &SectionDeck,
    carousel: &CardCarousel,
    video: &VideoLayer,
    content: Rect,
    top: f64,
    card_x: f64,
    pad: f64,
    card_w: f64,
    gap: f64,
) {
    let content_h = f64::from(content.height);
    let buf = frame.buffer_mut();

    // Background layer: a dim wash whose density follows the active
    // asset's published opacity.
    if video.phase() == LayerPhase::Revealed {
        let shade = video.opacity(carousel.video_index());
        if shade > 0.0 {
            for ry in 0..content.height {
                let abs = f64::from(ry) - top;
                if abs < 0.0 || abs >= content_h {
                    continue;
                }
                for rx in 0..content.width {
                    buf[(content.x + rx, content.y + ry)]
                        .set_char('░')
                        .set_fg(Color::Rgb(60, 60, 70));
                }
            }
        }
    }

    let card_top = top + content_h * 0.2;
    let card_h = (content_h * 0.6) as u16;
    let active = sections.card_index();

    for (index, card) in deck.cards.iter().enumerate() {
        let start = pad + index as f64 * (card_w + gap) - card_x;
        if start + card_w <= 0.0 || start >= f64::from(content.width) {
            continue;
        }
        let left = start.max(0.0) as u16;
        let width = (card_w.min(f64::from(content.width) - start) as u16).max(1);
        if card_top < 0.0 || card_top >= content_h {
            continue;
        }
        let y0 = content.y + card_top as u16;

        let border = if index == active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        for ry in 0..card_h {
            let y = y0 + ry;
            if y >= content.y + content.height {
                break;
            }
            for rx in 0..width {
                let x = content.x + left + rx;
                if x >= content.x + content.width {
                    break;
                }
                let edge = ry == 0 || ry == card_h - 1 || rx == 0 || rx == width - 1;
                if edge {
                    buf[(x, y)].set_char('▪').set_style(border);
                } else {
                    buf[(x, y)].set_char(' ').set_bg(Color::Rgb(24, 24, 30));
                }
            }
        }

        // Client, metric, tags stacked inside the card.
        let lines = [
            (2u16, card.client.as_str(), Modifier::BOLD),
            (4, card.metric.as_str(), Modifier::empty()),
        ];
        for (dy, text, modifier) in lines {
            let y = y0 + dy;
            if y + 1 >= content.y + content.height || text.is_empty() {
                continue;
            }
            for (i, ch) in text.chars().enumerate() {
                let x = content.x + left + 2 + i as u16;
                if x + 1 >= content.x + left + width {
                    break;
                }
                buf[(x, y)]
                    .set_char(ch)
                    .set_style(Style::default().fg(Color::White).add_modifier(modifier));
            }
        }
        let tags = card.tags.join("  ");
        let y = y0 + 6;
        if y + 1 < content.y + content.height {
            for (i, ch) in tags.chars().enumerate() {
                let x = content.x + left + 2 + i as u16;
                if x + 1 >= content.x + left + width {
                    break;
                }
                buf[(x, y)].set_char(ch).set_fg(Color::Gray);
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================
//
// The clock is drawn in two passes: `build_clock_scene` turns a `Frame` into
// a list of `DrawCommand`s, then `Scene::render` rasterises them into the
// RGBA frame buffer owned by `pixels`.

use image::RgbaImage;
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::assets::RenderContext;
use crate::clock::Frame;
use crate::config::{ClockConfig, Color, ROMAN_NUMERALS};
use crate::flames::FLAME_COUNT;
use crate::zodiac::{ZodiacRing, SIGN_STEP_DEG};

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Ring {
        cx: f32,
        cy: f32,
        r: f32,
        thickness: f32,
        color: Color,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        tapered: bool,
        color: Color,
    },
    Disc {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Triangle {
        points: [(f32, f32); 3],
        color: Color,
        alpha: f32,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
        filled: bool,
    },
    Sprite {
        cx: i32,
        cy: i32,
        slot: usize,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: f32,
        align: Align,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas, ctx: &RenderContext) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Ring {
                    cx,
                    cy,
                    r,
                    thickness,
                    color,
                } => draw_ring(canvas, *cx, *cy, *r, *thickness, *color),
                DrawCommand::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    thickness,
                    tapered,
                    color,
                } => {
                    let taper = if *tapered { 0.95 } else { 0.0 };
                    draw_thick_line_aa(canvas, (*x0, *y0), (*x1, *y1), *thickness, taper, *color);
                }
                DrawCommand::Disc {
                    cx,
                    cy,
                    radius,
                    color,
                    alpha,
                } => draw_circle(canvas, *cx, *cy, *radius, *color, *alpha),
                DrawCommand::Triangle {
                    points,
                    color,
                    alpha,
                } => fill_triangle(canvas, *points, *color, *alpha),
                DrawCommand::Rect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    filled,
                } => {
                    if *filled {
                        fill_rect(canvas, *x, *y, *w, *h, *color);
                    } else {
                        stroke_rect(canvas, *x, *y, *w, *h, 2.0, *color);
                    }
                }
                DrawCommand::Sprite { cx, cy, slot } => {
                    if let Some(sprite) = ctx.signs.get(*slot) {
                        blit(canvas, sprite, *cx, *cy);
                    }
                }
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    align,
                    color,
                } => match &ctx.font {
                    Some(font) => draw_text(
                        canvas,
                        *x,
                        *y,
                        text,
                        font,
                        Scale::uniform(*font_size),
                        *align,
                        *color,
                    ),
                    None => draw_text_placeholder(canvas, *x, *y, text, *font_size, *align, *color),
                },
            }
        }
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Point at `radius` from the centre, `degrees` clockwise from XII.
pub fn polar(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let angle = degrees.to_radians();
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

fn polar_f32(center: (f64, f64), radius: f64, degrees: f64) -> (f32, f32) {
    let (x, y) = polar(center.0, center.1, radius, degrees);
    (x as f32, y as f32)
}

// ============================================================================
// CLOCK FACE LAYOUT
// ============================================================================

/// Appends every clock element for `frame` to `scene`, back to front.
pub fn build_clock_scene(
    scene: &mut Scene,
    frame: &Frame,
    ring: &ZodiacRing,
    config: &ClockConfig,
) {
    let (cx, cy) = config.center();
    let center = (f64::from(cx), f64::from(cy));

    scene.add_command(DrawCommand::Clear(config.background_color));
    add_face(scene, center, config);
    add_zodiac_ring(scene, center, frame, ring, config);
    add_flames(scene, center, &frame.flames, config);
    add_hands(scene, center, frame, config);
    add_center_ornament(scene, center, frame, config);

    if frame.highlight.active {
        if let Some(slot) = frame.highlight_sign {
            add_highlight_effect(scene, center, frame, ring.get(slot).base_angle, config);
        }
    }

    add_readout(scene, center, frame, config);
}

fn add_face(scene: &mut Scene, center: (f64, f64), config: &ClockConfig) {
    let radius = f64::from(config.outer_radius);
    let color = config.foreground_color;
    scene.add_command(DrawCommand::Ring {
        cx: center.0 as f32,
        cy: center.1 as f32,
        r: radius as f32,
        thickness: 2.0,
        color,
    });

    for (i, numeral) in ROMAN_NUMERALS.iter().enumerate() {
        let angle = i as f64 * SIGN_STEP_DEG;
        let (x0, y0) = polar_f32(center, radius - f64::from(config.marker_length), angle);
        let (x1, y1) = polar_f32(center, radius, angle);
        scene.add_command(DrawCommand::Line {
            x0,
            y0,
            x1,
            y1,
            thickness: 2.0,
            tapered: false,
            color,
        });

        let (lx, ly) = polar(center.0, center.1, radius - config.numerals_inset, angle);
        scene.add_command(DrawCommand::Text {
            x: lx as i32,
            y: ly as i32,
            text: (*numeral).to_string(),
            font_size: config.numerals_font_size,
            align: Align::Center,
            color,
        });
    }
}

fn add_zodiac_ring(
    scene: &mut Scene,
    center: (f64, f64),
    frame: &Frame,
    ring: &ZodiacRing,
    config: &ClockConfig,
) {
    let radius = f64::from(config.zodiac_radius);
    for (slot, sign) in ring.lap() {
        let (x, y) = polar(center.0, center.1, radius, sign.base_angle);
        scene.add_command(DrawCommand::Sprite {
            cx: x.round() as i32,
            cy: y.round() as i32,
            slot,
        });
        if frame.active_sign == Some(slot) {
            scene.add_command(DrawCommand::Ring {
                cx: x as f32,
                cy: y as f32,
                r: (config.sign_size / 2 + 4) as f32,
                thickness: 1.0,
                color: config.foreground_color,
            });
        }
    }
}

fn add_flames(
    scene: &mut Scene,
    center: (f64, f64),
    flames: &[bool; FLAME_COUNT],
    config: &ClockConfig,
) {
    let radius = f64::from(config.flames_radius);
    for (hour, &lit) in flames.iter().enumerate() {
        let (x, y) = polar_f32(center, radius, hour as f64 * SIGN_STEP_DEG);
        let color = if lit {
            config.flame_active_color
        } else {
            config.flame_inactive_color
        };
        scene.add_command(DrawCommand::Triangle {
            points: [(x, y - 20.0), (x - 10.0, y + 5.0), (x + 10.0, y + 5.0)],
            color,
            alpha: 1.0,
        });

        if lit {
            // Soft halo: widest layer is the faintest.
            for offset in (1..=4).rev() {
                let spread = offset as f32;
                scene.add_command(DrawCommand::Triangle {
                    points: [
                        (x, y - 10.0 - spread),
                        (x - 10.0 - spread, y + 10.0 + spread),
                        (x + 10.0 + spread, y + 10.0 + spread),
                    ],
                    color,
                    alpha: (50.0 - spread * 10.0) / 255.0,
                });
            }
        }
    }
}

fn add_hands(scene: &mut Scene, center: (f64, f64), frame: &Frame, config: &ClockConfig) {
    let (cx, cy) = (center.0 as f32, center.1 as f32);
    let hands = [
        (
            frame.angles.hour,
            config.hour_hand_length,
            config.hour_hand_width,
            true,
            config.foreground_color,
        ),
        (
            frame.angles.minute,
            config.minute_hand_length,
            config.minute_hand_width,
            true,
            config.foreground_color,
        ),
        (
            frame.angles.second,
            config.second_hand_length,
            config.second_hand_width,
            false,
            config.accent_color,
        ),
    ];
    for (angle, length, thickness, tapered, color) in hands {
        let (x1, y1) = polar_f32(center, length, angle);
        scene.add_command(DrawCommand::Line {
            x0: cx,
            y0: cy,
            x1,
            y1,
            thickness,
            tapered,
            color,
        });
    }

    scene.add_command(DrawCommand::Disc {
        cx,
        cy,
        radius: 10.0,
        color: config.foreground_color,
        alpha: 1.0,
    });
    scene.add_command(DrawCommand::Disc {
        cx,
        cy,
        radius: 5.0,
        color: config.accent_color,
        alpha: 1.0,
    });
}

fn add_center_ornament(
    scene: &mut Scene,
    center: (f64, f64),
    frame: &Frame,
    config: &ClockConfig,
) {
    let color = config.accent_color;
    let rotation = frame.animation.rotation();
    let pulse = frame.animation.pulse();

    for layer in 0..5i32 {
        let radius = (80.0 - f64::from(layer) * 12.0 + pulse).max(10.0);
        scene.add_command(DrawCommand::Ring {
            cx: center.0 as f32,
            cy: center.1 as f32,
            r: radius as f32,
            thickness: 1.0,
            color,
        });
        for spoke in 0..12i32 {
            let angle = f64::from(spoke) * SIGN_STEP_DEG + rotation;
            let (x0, y0) = polar_f32(center, radius - 10.0, angle);
            let (x1, y1) = polar_f32(center, radius, angle);
            scene.add_command(DrawCommand::Line {
                x0,
                y0,
                x1,
                y1,
                thickness: 1.0,
                tapered: false,
                color,
            });
        }
    }

    let star_rotation = frame.animation.star_rotation();
    let points: Vec<(f32, f32)> = (0..12i32)
        .map(|i| {
            let radius = if i % 2 == 0 { 40.0 } else { 20.0 };
            polar_f32(center, radius, f64::from(i) * SIGN_STEP_DEG + star_rotation)
        })
        .collect();
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        scene.add_command(DrawCommand::Line {
            x0,
            y0,
            x1,
            y1,
            thickness: 1.0,
            tapered: false,
            color,
        });
    }
}

fn add_highlight_effect(
    scene: &mut Scene,
    center: (f64, f64),
    frame: &Frame,
    base_angle: f64,
    config: &ClockConfig,
) {
    let (x, y) = polar(center.0, center.1, f64::from(config.zodiac_radius), base_angle);
    scene.add_command(DrawCommand::Disc {
        cx: x as f32,
        cy: y as f32,
        radius: 30.0,
        color: config.accent_color,
        alpha: (frame.highlight.glow_alpha / 255.0) as f32,
    });

    // Screen-space orbit, 0° pointing right.
    for dot in 0..8i32 {
        let angle = (f64::from(dot) * 45.0 + frame.highlight.orbit).to_radians();
        scene.add_command(DrawCommand::Disc {
            cx: (x + 35.0 * angle.cos()) as f32,
            cy: (y + 35.0 * angle.sin()) as f32,
            radius: 3.0,
            color: config.accent_color,
            alpha: 1.0,
        });
    }
}

fn add_readout(scene: &mut Scene, center: (f64, f64), frame: &Frame, config: &ClockConfig) {
    let radius = f64::from(config.outer_radius);
    let text = if frame.override_active {
        format!("{} (custom)", frame.instant)
    } else {
        frame.instant.to_string()
    };
    scene.add_command(DrawCommand::Text {
        x: center.0 as i32,
        y: (center.1 + radius + 40.0) as i32,
        text,
        font_size: config.hud_font_size,
        align: Align::Center,
        color: config.foreground_color,
    });
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(canvas: &mut Canvas, x: i32, y: i32, color: Color, alpha: f32) {
    if x < 0 || y < 0 || x as usize >= canvas.width || y as usize >= canvas.height {
        return;
    }
    let idx = (y as usize * canvas.width + x as usize) * 4;
    let Some(dst) = canvas.frame.get_mut(idx..idx + 4) else {
        return;
    };
    let a = alpha.clamp(0.0, 1.0);
    let src = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
    for (channel, s) in dst.iter_mut().zip(src) {
        *channel = (s * a + f32::from(*channel) * (1.0 - a)).round() as u8;
    }
    dst[3] = 0xff;
}

/// Anti-aliased thick line. `taper` in `[0, 1)` narrows the far end.
fn draw_thick_line_aa(
    canvas: &mut Canvas,
    from: (f32, f32),
    to: (f32, f32),
    thickness: f32,
    taper: f32,
    color: Color,
) {
    let (x0, y0) = from;
    let (x1, y1) = to;
    let pad = thickness.ceil() + 1.0;
    let min_x = (x0.min(x1) - pad).floor() as i32;
    let max_x = (x0.max(x1) + pad).ceil() as i32;
    let min_y = (y0.min(y1) - pad).floor() as i32;
    let max_y = (y0.max(y1) + pad).ceil() as i32;
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 - x0;
            let py = y as f32 - y0;
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lx = x0 + t * dx;
            let ly = y0 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let local_thickness = thickness * (1.0 - t * taper);
            let aa = (1.0 - (dist - local_thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(canvas, x, y, color, aa);
            }
        }
    }
}

fn draw_circle(canvas: &mut Canvas, cx: f32, cy: f32, radius: f32, color: Color, alpha: f32) {
    let reach = radius.ceil() as i32 + 1;
    let (ox, oy) = (cx.round() as i32, cy.round() as i32);
    for y in -reach..=reach {
        for x in -reach..=reach {
            let px = ox + x;
            let py = oy + y;
            let dist = ((px as f32 - cx).powi(2) + (py as f32 - cy).powi(2)).sqrt();
            let aa = if dist > radius {
                1.0 - (dist - radius).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0 {
                set_pixel(canvas, px, py, color, aa * alpha);
            }
        }
    }
}

fn draw_ring(canvas: &mut Canvas, cx: f32, cy: f32, r: f32, thickness: f32, color: Color) {
    let inner = (r - thickness).max(0.0);
    let reach = r.ceil() as i32 + 2;
    let (ox, oy) = (cx.round() as i32, cy.round() as i32);
    for y in -reach..=reach {
        for x in -reach..=reach {
            let px = ox + x;
            let py = oy + y;
            let dist = ((px as f32 - cx).powi(2) + (py as f32 - cy).powi(2)).sqrt();
            let aa = if dist > r {
                1.0 - (dist - r).min(1.0)
            } else if dist < inner {
                1.0 - (inner - dist).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0 {
                set_pixel(canvas, px, py, color, aa);
            }
        }
    }
}

fn fill_triangle(canvas: &mut Canvas, points: [(f32, f32); 3], color: Color, alpha: f32) {
    let [a, b, c] = points;
    let edge = |p: (f32, f32), q: (f32, f32), x: f32, y: f32| {
        (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
    };
    let area = edge(a, b, c.0, c.1);
    if area == 0.0 {
        return;
    }
    let min_x = a.0.min(b.0).min(c.0).floor() as i32;
    let max_x = a.0.max(b.0).max(c.0).ceil() as i32;
    let min_y = a.1.min(b.1).min(c.1).floor() as i32;
    let max_y = a.1.max(b.1).max(c.1).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (sx, sy) = (x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(b, c, sx, sy) * area.signum();
            let w1 = edge(c, a, sx, sy) * area.signum();
            let w2 = edge(a, b, sx, sy) * area.signum();
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                set_pixel(canvas, x, y, color, alpha);
            }
        }
    }
}

fn fill_rect(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, color: Color) {
    for py in y..y + h {
        for px in x..x + w {
            set_pixel(canvas, px, py, color, 1.0);
        }
    }
}

fn stroke_rect(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, thickness: f32, color: Color) {
    let (left, top) = (x as f32, y as f32);
    let (right, bottom) = ((x + w - 1) as f32, (y + h - 1) as f32);
    for (from, to) in [
        ((left, top), (right, top)),
        ((left, bottom), (right, bottom)),
        ((left, top), (left, bottom)),
        ((right, top), (right, bottom)),
    ] {
        draw_thick_line_aa(canvas, from, to, thickness, 0.0, color);
    }
}

fn blit(canvas: &mut Canvas, sprite: &RgbaImage, cx: i32, cy: i32) {
    let (w, h) = sprite.dimensions();
    let left = cx - (w / 2) as i32;
    let top = cy - (h / 2) as i32;
    for (x, y, px) in sprite.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        if a > 0 {
            set_pixel(
                canvas,
                left + x as i32,
                top + y as i32,
                Color::new(r, g, b),
                f32::from(a) / 255.0,
            );
        }
    }
}

fn measure(glyphs: &[PositionedGlyph]) -> (i32, i32, i32, i32) {
    glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    )
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font: &Font,
    scale: Scale,
    align: Align,
    color: Color,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let (min_x, max_x, min_y, max_y) = measure(&glyphs);
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = match align {
        Align::Left => x,
        Align::Center => x - width_px / 2,
    };
    let offset_y = y - height_px / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                set_pixel(canvas, px, py, color, v);
            });
        }
    }
}

/// Outline box standing in for text when no font could be loaded.
fn draw_text_placeholder(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font_size: f32,
    align: Align,
    color: Color,
) {
    let chars = text.chars().count() as f32;
    if chars == 0.0 {
        return;
    }
    let w = (chars * font_size * 0.5).round() as i32;
    let h = (font_size * 0.7).round() as i32;
    let left = match align {
        Align::Left => x,
        Align::Center => x - w / 2,
    };
    stroke_rect(canvas, left, y - h / 2, w, h, 1.0, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationParams, AnimationState};
    use crate::clock::HighlightState;
    use crate::config::{BLACK, GOLD, WHITE};
    use crate::flames::FlameTransition;
    use crate::time_source::Instant;
    use crate::angles::HandAngles;
    use chrono_tz::Tz;

    fn frame(highlight: bool) -> Frame {
        let instant = Instant {
            hour: 5,
            minute: 0,
            second: 0,
            fraction: 0.0,
            timezone: Tz::Europe__Madrid,
        };
        Frame {
            instant,
            angles: HandAngles::from_instant(&instant),
            flames: [true; FLAME_COUNT],
            flame_transition: FlameTransition::Unchanged,
            active_sign: Some(5),
            highlight_sign: Some(5),
            highlight: HighlightState {
                active: highlight,
                glow_alpha: if highlight { 120.0 } else { 0.0 },
                orbit: 0.0,
            },
            animation: AnimationState::with_phase(AnimationParams::default(), 0.0),
            override_active: false,
        }
    }

    fn empty_context() -> RenderContext {
        RenderContext {
            font: None,
            signs: Vec::new(),
        }
    }

    #[test]
    fn polar_follows_clock_convention() {
        let (x, y) = polar(100.0, 100.0, 50.0, 0.0);
        assert!((x - 100.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
        let (x, y) = polar(100.0, 100.0, 50.0, 90.0);
        assert!((x - 150.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
        let (x, y) = polar(100.0, 100.0, 50.0, 180.0);
        assert!((x - 100.0).abs() < 1e-9 && (y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn highlight_adds_glow_and_orbit() {
        let config = ClockConfig::default();
        let ring = ZodiacRing::default();

        let mut plain = Scene::new();
        build_clock_scene(&mut plain, &frame(false), &ring, &config);
        let mut lit = Scene::new();
        build_clock_scene(&mut lit, &frame(true), &ring, &config);

        assert_eq!(lit.commands().len(), plain.commands().len() + 9);
        let glow = lit.commands().iter().find(|c| {
            matches!(c, DrawCommand::Disc { radius, .. } if *radius == 30.0)
        });
        assert!(matches!(glow, Some(DrawCommand::Disc { alpha, .. }) if (*alpha - 120.0 / 255.0).abs() < 1e-6));
    }

    #[test]
    fn dark_flames_lose_their_halo() {
        let config = ClockConfig::default();
        let ring = ZodiacRing::default();
        let triangles = |f: &Frame| {
            let mut scene = Scene::new();
            build_clock_scene(&mut scene, f, &ring, &config);
            scene
                .commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::Triangle { .. }))
                .count()
        };
        let lit = frame(false);
        let mut dark = lit;
        dark.flames[3] = false;
        assert_eq!(triangles(&lit), FLAME_COUNT * 5);
        assert_eq!(triangles(&dark), FLAME_COUNT * 5 - 4);
    }

    #[test]
    fn scene_starts_with_clear_and_ends_with_readout() {
        let config = ClockConfig::default();
        let mut scene = Scene::new();
        build_clock_scene(&mut scene, &frame(false), &ZodiacRing::default(), &config);
        assert_eq!(scene.commands()[0], DrawCommand::Clear(BLACK));
        assert!(matches!(
            scene.commands().last(),
            Some(DrawCommand::Text { text, .. }) if text == "05:00:00"
        ));
    }

    #[test]
    fn sprites_follow_the_ring_walk() {
        let config = ClockConfig::default();
        let mut scene = Scene::new();
        build_clock_scene(&mut scene, &frame(false), &ZodiacRing::new(5), &config);
        let slots: Vec<usize> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, [5, 6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4]);

        // Leo sits at 150°, lower right of the centre, wherever the walk begins.
        let leo = scene.commands().iter().find_map(|c| match c {
            DrawCommand::Sprite { cx, cy, slot: 5 } => Some((*cx, *cy)),
            _ => None,
        });
        assert_eq!(leo, Some((500, 573)));
    }

    #[test]
    fn set_pixel_blends_and_clips() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        let mut canvas = Canvas::new(&mut buf, 4, 4);
        canvas.clear(BLACK);
        set_pixel(&mut canvas, 1, 1, WHITE, 0.5);
        assert_eq!(canvas.pixel(1, 1), Some([128, 128, 128, 255]));
        set_pixel(&mut canvas, -1, 0, WHITE, 1.0);
        set_pixel(&mut canvas, 4, 0, WHITE, 1.0);
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn triangle_fills_its_interior() {
        let mut buf = vec![0u8; 20 * 20 * 4];
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        fill_triangle(&mut canvas, [(10.0, 2.0), (2.0, 18.0), (18.0, 18.0)], GOLD, 1.0);
        assert_eq!(canvas.pixel(10, 12), Some([255, 215, 0, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn ring_touches_its_radius_only() {
        let mut buf = vec![0u8; 40 * 40 * 4];
        let mut canvas = Canvas::new(&mut buf, 40, 40);
        canvas.clear(BLACK);
        draw_ring(&mut canvas, 20.0, 20.0, 15.0, 2.0, WHITE);
        assert_eq!(canvas.pixel(34, 20), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 0, 255]));
    }

    #[test]
    fn text_without_font_draws_a_placeholder_box() {
        let mut buf = vec![0u8; 60 * 30 * 4];
        let mut canvas = Canvas::new(&mut buf, 60, 30);
        canvas.clear(BLACK);
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Text {
            x: 30,
            y: 15,
            text: "XII".to_string(),
            font_size: 20.0,
            align: Align::Center,
            color: WHITE,
        });
        scene.render(&mut canvas, &empty_context());
        let lit = buf.chunks_exact(4).filter(|p| p[0] > 0).count();
        assert!(lit > 0);
    }
}

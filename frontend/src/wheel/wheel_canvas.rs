use std::f64::consts::{PI, TAU};
use std::rc::Rc;

use gloo_events::EventListener;
use shared::color::{pick_label_color, slice_palette, Rgb};
use shared::spin::slice_angle;
use shared::{Face, Outcome, OutcomeKind};
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::slice_painter::{ImageCache, SlicePainter, Wedge};

const MIN_SIZE: f64 = 320.0;
const MAX_SIZE: f64 = 720.0;
const INNER_COVERAGE: f64 = 0.88;
const HUB_RATIO: f64 = 0.14;
const DIVIDER_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const RIM_COLOR: &str = "#1f2433";

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub outcomes: Rc<Vec<Outcome>>,
    pub rotation: f64,
    pub is_spinning: bool,
}

fn viewport_size() -> f64 {
    let Some(window) = window() else {
        return MIN_SIZE;
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(MIN_SIZE);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(MIN_SIZE);
    (width.min(height) * 0.9).clamp(MIN_SIZE, MAX_SIZE)
}

fn pixel_ratio() -> f64 {
    let dpr = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    (dpr * 2.0).clamp(1.0, 4.0)
}

/// Bitmap edge in device pixels for a wheel drawn `size` CSS pixels wide.
fn backing_dimension(size: f64, dpr: f64) -> u32 {
    (size * dpr).round().max(1.0) as u32
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let size = use_state(viewport_size);
    let dpr = use_state(pixel_ratio);
    let images = use_mut_ref(ImageCache::default);
    let load_tick = use_state(|| 0u32);

    {
        let size = size.clone();
        let dpr = dpr.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    size.set(viewport_size());
                    dpr.set(pixel_ratio());
                })
            });
            move || drop(listener)
        });
    }

    {
        let images = images.clone();
        let load_tick = load_tick.clone();
        use_effect_with(props.outcomes.clone(), move |outcomes| {
            let faces = outcomes.iter().flat_map(|o| o.faces());
            images
                .borrow_mut()
                .preload(faces, move |tick| load_tick.set(tick));
            || ()
        });
    }

    // Assigning width/height wipes the bitmap, so only do it when the size changes.
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((*size, *dpr), move |(size, dpr)| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let edge = backing_dimension(*size, *dpr);
                if canvas.width() != edge || canvas.height() != edge {
                    canvas.set_width(edge);
                    canvas.set_height(edge);
                }
            }
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let images = images.clone();
        use_effect_with(
            (props.outcomes.clone(), props.rotation, *size, *dpr, *load_tick),
            move |(outcomes, rotation, size, dpr, _)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    match context_2d(&canvas) {
                        Some(context) => {
                            let images = images.borrow();
                            draw_wheel(&context, &images, outcomes, *rotation, *size, *dpr);
                        }
                        None => log::error!("canvas has no 2d context"),
                    }
                }
                || ()
            },
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            id="wheel"
            class={classes!(
                "block",
                "mx-auto",
                "rounded-full",
                props.is_spinning.then_some("cursor-wait"),
            )}
            style={format!("width: {0}px; height: {0}px;", *size)}
            role="img"
            aria-label="Fruit wheel"
        />
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

pub fn draw_wheel(
    context: &CanvasRenderingContext2d,
    images: &ImageCache,
    outcomes: &[Outcome],
    rotation: f64,
    size: f64,
    dpr: f64,
) {
    let _ = context.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    context.clear_rect(0.0, 0.0, size, size);
    if outcomes.is_empty() {
        return;
    }

    let radius = size / 2.0 - 6.0;
    let inner_radius = radius * INNER_COVERAGE;
    let slice = slice_angle(outcomes.len());

    context.save();
    let _ = context.translate(size / 2.0, size / 2.0);

    // Rim
    context.begin_path();
    let _ = context.arc(0.0, 0.0, radius + 4.0, 0.0, TAU);
    context.set_fill_style_str(RIM_COLOR);
    context.fill();

    let _ = context.rotate(rotation);

    for (index, outcome) in outcomes.iter().enumerate() {
        let start = index as f64 * slice;
        for (wedge, face, chosen) in wedges(outcome, start, slice, inner_radius, radius) {
            images.painter_for(face).paint(context, &wedge, chosen);
        }
    }

    draw_dividers(context, outcomes, slice, radius);

    for (index, outcome) in outcomes.iter().enumerate() {
        let center = index as f64 * slice + slice / 2.0;
        draw_label(context, outcome, center, rotation, inner_radius, size);
    }

    context.restore();
    draw_hub(context, size);
}

/// Split slices are drawn as two half-wedges, each with its own chosen state.
fn wedges(
    outcome: &Outcome,
    start: f64,
    slice: f64,
    inner_radius: f64,
    outer_radius: f64,
) -> Vec<(Wedge, &Face, bool)> {
    let wedge = |from: f64, to: f64| Wedge {
        start: from,
        end: to,
        inner_radius,
        outer_radius,
    };
    match &outcome.kind {
        OutcomeKind::Simple { face, chosen } => {
            vec![(wedge(start, start + slice), face, *chosen)]
        }
        OutcomeKind::Split { parts } => {
            let mid = start + slice / 2.0;
            vec![
                (wedge(start, mid), &parts[0].face, parts[0].chosen),
                (wedge(mid, start + slice), &parts[1].face, parts[1].chosen),
            ]
        }
    }
}

fn draw_dividers(
    context: &CanvasRenderingContext2d,
    outcomes: &[Outcome],
    slice: f64,
    radius: f64,
) {
    context.set_stroke_style_str(DIVIDER_COLOR);
    context.set_line_width(2.0);
    for index in 0..outcomes.len() {
        let angle = index as f64 * slice;
        context.begin_path();
        context.move_to(0.0, 0.0);
        context.line_to(radius * angle.cos(), radius * angle.sin());
        context.stroke();
    }
}

fn draw_label(
    context: &CanvasRenderingContext2d,
    outcome: &Outcome,
    center: f64,
    rotation: f64,
    inner_radius: f64,
    size: f64,
) {
    let background = outcome
        .faces()
        .first()
        .and_then(|face| Rgb::from_hex(&face.color).ok())
        .unwrap_or(Rgb::new(0x55, 0x55, 0x55));
    let (_, accent) = slice_palette(background, outcome.is_chosen());
    let font_px = (size * 0.032).max(11.0);

    context.save();
    let _ = context.rotate(center);
    // keep text upright on the left half of the wheel
    let flipped = (rotation + center).cos() < 0.0;
    let text_radius = inner_radius * 0.62;
    let _ = context.translate(text_radius, 0.0);
    if flipped {
        let _ = context.rotate(PI);
    }

    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_font(&format!("600 {font_px:.0}px system-ui, sans-serif"));
    context.set_fill_style_str(pick_label_color(accent).as_css());
    if outcome.is_chosen() {
        context.set_global_alpha(0.55);
    }

    let label = format!("{} {}", outcome.icons().join(""), outcome.label);
    let max_width = inner_radius * 0.7;
    let text = fit_text(context, &label, max_width);
    let _ = context.fill_text(&text, 0.0, 0.0);
    context.restore();
}

fn fit_text(context: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
    let width = |s: &str| context.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
    if width(text) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while chars.len() > 1 {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "…";
        if width(&candidate) <= max_width {
            return candidate;
        }
    }
    text.chars().take(1).collect()
}

fn draw_hub(context: &CanvasRenderingContext2d, size: f64) {
    let center = size / 2.0;
    context.begin_path();
    let _ = context.arc(center, center, size * HUB_RATIO / 2.0, 0.0, TAU);
    context.set_fill_style_str("#ffffff");
    context.fill();
    context.set_stroke_style_str(RIM_COLOR);
    context.set_line_width(3.0);
    context.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_bitmap_tracks_size_and_ratio_only() {
        assert_eq!(backing_dimension(720.0, 4.0), 2880);
        assert_eq!(backing_dimension(320.0, 1.0), 320);
        assert_eq!(backing_dimension(333.3, 2.0), 667);
        assert_eq!(backing_dimension(0.0, 2.0), 1);
    }
}

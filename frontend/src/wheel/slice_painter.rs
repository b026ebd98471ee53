//! How a single wedge of the wheel gets filled.
//!
//! A slice is either a flat color (base ring plus lighter inner disc) or a
//! photo clipped to the wedge. Both grey out once the slice has been chosen.

use std::cell::Cell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use shared::color::{desaturate, slice_palette, Rgb, VEIL_DESATURATE, VEIL_LIFT};
use shared::Face;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

const FALLBACK_COLOR: Rgb = Rgb::new(0x55, 0x55, 0x55);

/// Angular span and radii of the area to fill, in wheel-local space.
#[derive(Debug, Clone, Copy)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Wedge {
    fn trace_sector(&self, ctx: &CanvasRenderingContext2d, radius: f64) {
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        let _ = ctx.arc(0.0, 0.0, radius, self.start, self.end);
        ctx.close_path();
    }

    fn trace_ring(&self, ctx: &CanvasRenderingContext2d) {
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, self.outer_radius, self.start, self.end);
        let inner = self.inner_radius;
        let _ = ctx.arc_with_anticlockwise(0.0, 0.0, inner, self.end, self.start, true);
        ctx.close_path();
    }
}

pub trait SlicePainter {
    fn paint(&self, ctx: &CanvasRenderingContext2d, wedge: &Wedge, chosen: bool);
}

pub struct FlatPainter {
    base: Rgb,
}

impl FlatPainter {
    pub fn new(face: &Face) -> Self {
        Self {
            base: Rgb::from_hex(&face.color).unwrap_or(FALLBACK_COLOR),
        }
    }

    fn paint_ring(&self, ctx: &CanvasRenderingContext2d, wedge: &Wedge, chosen: bool) {
        let (base, _) = slice_palette(self.base, chosen);
        wedge.trace_ring(ctx);
        ctx.set_fill_style_str(&base.to_hex());
        ctx.fill();
    }
}

impl SlicePainter for FlatPainter {
    fn paint(&self, ctx: &CanvasRenderingContext2d, wedge: &Wedge, chosen: bool) {
        let (_, accent) = slice_palette(self.base, chosen);
        wedge.trace_sector(ctx, wedge.inner_radius);
        ctx.set_fill_style_str(&accent.to_hex());
        ctx.fill();

        self.paint_ring(ctx, wedge, chosen);
    }
}

pub struct PhotoPainter<'a> {
    image: &'a HtmlImageElement,
    flat: FlatPainter,
}

impl SlicePainter for PhotoPainter<'_> {
    fn paint(&self, ctx: &CanvasRenderingContext2d, wedge: &Wedge, chosen: bool) {
        ctx.save();
        wedge.trace_sector(ctx, wedge.inner_radius);
        ctx.clip();

        // cover the whole disc so every wedge shows its own part of the photo
        let r = wedge.inner_radius;
        let _ = ctx
            .draw_image_with_html_image_element_and_dw_and_dh(self.image, -r, -r, 2.0 * r, 2.0 * r);

        if chosen {
            let veil = desaturate(self.flat.base, VEIL_DESATURATE, VEIL_LIFT);
            ctx.set_global_alpha(0.7);
            ctx.set_fill_style_str(&veil.to_hex());
            ctx.begin_path();
            let _ = ctx.arc(0.0, 0.0, r, 0.0, TAU);
            ctx.fill();
        }
        ctx.restore();

        self.flat.paint_ring(ctx, wedge, chosen);
    }
}

/// Photos keyed by URL, each with the onload hook that keeps it alive.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, (HtmlImageElement, Closure<dyn FnMut()>)>,
    loaded: Rc<Cell<u32>>,
}

impl ImageCache {
    /// Starts loading every photo not seen yet. `on_load` receives a counter
    /// that changes each time one finishes.
    pub fn preload<'f>(
        &mut self,
        faces: impl IntoIterator<Item = &'f Face>,
        on_load: impl Fn(u32) + Clone + 'static,
    ) {
        for url in faces.into_iter().filter_map(|f| f.photo.as_ref()) {
            if self.images.contains_key(url) {
                continue;
            }
            let image = match HtmlImageElement::new() {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("could not create image for {url}: {e:?}");
                    continue;
                }
            };

            let loaded = self.loaded.clone();
            let on_load = on_load.clone();
            let hook = Closure::wrap(Box::new(move || {
                loaded.set(loaded.get().wrapping_add(1));
                on_load(loaded.get());
            }) as Box<dyn FnMut()>);

            image.set_onload(Some(hook.as_ref().unchecked_ref()));
            image.set_src(url);
            self.images.insert(url.clone(), (image, hook));
        }
    }

    fn ready(&self, url: &str) -> Option<&HtmlImageElement> {
        self.images
            .get(url)
            .map(|(image, _)| image)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }

    /// Photo painter once the face's image has decoded, flat color until then.
    pub fn painter_for<'a>(&'a self, face: &Face) -> Box<dyn SlicePainter + 'a> {
        let flat = FlatPainter::new(face);
        match face.photo.as_deref().and_then(|url| self.ready(url)) {
            Some(image) => Box::new(PhotoPainter { image, flat }),
            None => Box::new(flat),
        }
    }
}

use std::f64::consts::TAU;

use choreo_core::{MotionConfig, Rect, Rgba, Surface, Viewport};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// `Surface` over a 2D canvas context, drawing in CSS pixels.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext: {e:?}"))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the CSS box and scale drawing by the DPR.
    pub fn resize(&mut self, motion: &MotionConfig) -> Viewport {
        let viewport = dom::sync_canvas_backing_size(&self.canvas, motion);
        let dpr = motion.device_pixel_ratio as f64;
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        viewport
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, area: Rect) {
        self.ctx.clear_rect(
            area.x as f64,
            area.y as f64,
            area.width as f64,
            area.height as f64,
        );
    }

    fn fill_rect(&mut self, area: Rect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(
            area.x as f64,
            area.y as f64,
            area.width as f64,
            area.height as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        self.ctx.move_to(a.x as f64, a.y as f64);
        self.ctx.line_to(b.x as f64, b.y as f64);
        self.ctx.line_to(c.x as f64, c.y as f64);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }
}

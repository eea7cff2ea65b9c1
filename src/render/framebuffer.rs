//! Frame buffer: shared color + depth storage and the sphere rasterizer.
//!
//! The buffer is striped into rows, each behind its own lock, so any number
//! of `render_sphere` calls can run concurrently against a shared
//! `&FrameBuffer`. A pixel's depth test and its combined color+depth write
//! form one critical section under the owning row's lock; the final visible
//! color therefore depends only on the "nearest depth wins" rule, never on
//! traversal order across spheres.

use std::sync::Mutex;

use super::shader::{FlatShader, PhongShader, SphereShader};
use super::templates::DiscTemplates;
use super::{ProjectedSphere, ShadingMode};
use crate::colors;
use crate::light::DirectionalLight;

/// One pixel row of color and depth cells.
struct Row {
    color: Vec<u32>,
    depth: Vec<f32>,
}

/// Owns the pixel and depth buffers and rasterizes projected spheres.
///
/// Coordinates follow the square-aspect convention of the projection: both
/// axes are scaled by `width / 2`, with the origin at the top-left and rows
/// stored top to bottom.
pub struct FrameBuffer {
    rows: Vec<Mutex<Row>>,
    templates: DiscTemplates,
    light: DirectionalLight,
    shading: ShadingMode,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let rows = (0..height)
            .map(|_| {
                Mutex::new(Row {
                    color: vec![colors::BACKGROUND; width as usize],
                    depth: vec![f32::INFINITY; width as usize],
                })
            })
            .collect();

        Self {
            rows,
            templates: DiscTemplates::new(),
            light: DirectionalLight::default(),
            shading: ShadingMode::default(),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading = mode;
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    /// Reset every pixel to the background color and every depth cell to
    /// infinity. Must complete before the frame's first `render_sphere`.
    pub fn clear(&self) {
        for row in &self.rows {
            let mut row = row.lock().expect("row lock poisoned");
            row.color.fill(colors::BACKGROUND);
            row.depth.fill(f32::INFINITY);
        }
    }

    /// Rasterize one projected sphere into the buffer.
    ///
    /// Safe to call concurrently from many threads; pixel writes are
    /// depth-tested under the owning row's lock.
    pub fn render_sphere(&self, sphere: &ProjectedSphere) {
        let half_width = self.width as f32 / 2.0;
        let center_x = sphere.screen_x * half_width + half_width;
        let center_y = sphere.screen_y * half_width + half_width;
        let radius_px = sphere.screen_radius * half_width;

        let offsets = self.templates.offsets(radius_px);

        match self.shading {
            ShadingMode::Flat => {
                let shader = FlatShader::new(sphere.color);
                self.fill_disc(sphere, center_x, center_y, &offsets, &shader);
            }
            ShadingMode::Phong => {
                let shader = PhongShader::new(
                    sphere.color,
                    sphere.screen_x,
                    sphere.screen_y,
                    radius_px.round(),
                    self.light.direction(),
                );
                self.fill_disc(sphere, center_x, center_y, &offsets, &shader);
            }
        }
    }

    fn fill_disc<S: SphereShader>(
        &self,
        sphere: &ProjectedSphere,
        center_x: f32,
        center_y: f32,
        offsets: &[(i32, i32)],
        shader: &S,
    ) {
        let half_width = self.width as f32 / 2.0;
        let center_x = center_x.round() as i32;
        let center_y = center_y.round() as i32;

        for &(dx, dy) in offsets {
            let x = center_x + dx;
            let y = center_y + dy;
            if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
                continue;
            }

            let Some(color) = shader.shade(dx, dy) else {
                continue;
            };

            // Bulge the disc's depth outward from center to rim so that
            // interpenetrating spheres occlude each other roughly like
            // spheres instead of flat discs.
            let rim_distance = ((dx * dx + dy * dy) as f32).sqrt();
            let depth = sphere.screen_z + rim_distance / half_width;

            let mut row = self.rows[y as usize].lock().expect("row lock poisoned");
            let index = x as usize;
            if depth < row.depth[index] {
                row.depth[index] = depth;
                row.color[index] = color;
            }
        }
    }

    /// Whether a screen-space disc can overlap the visible frame.
    ///
    /// Collaborators use this to cull spheres before rasterization. The test
    /// is conservative: it bounds the disc by its scanned square.
    pub fn is_circle_on_screen(&self, screen_x: f32, screen_y: f32, screen_radius: f32) -> bool {
        let half_width = self.width as f32 / 2.0;
        let center_x = screen_x * half_width + half_width;
        let center_y = screen_y * half_width + half_width;
        let reach = screen_radius * half_width * 2.0;

        center_x + reach >= 0.0
            && center_x - reach < self.width as f32
            && center_y + reach >= 0.0
            && center_y - reach < self.height as f32
    }

    /// The color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.rows[y as usize].lock().expect("row lock poisoned");
        Some(row.color[x as usize])
    }

    /// The stored depth at (x, y), or None if out of bounds.
    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.rows[y as usize].lock().expect("row lock poisoned");
        Some(row.depth[x as usize])
    }

    /// Copy the current pixel contents into a contiguous row-major array
    /// (top-left origin, packed `0x00RRGGBB`) for a host display layer.
    pub fn resolve_into(&self, out: &mut [u32]) {
        debug_assert_eq!(
            out.len(),
            (self.width * self.height) as usize,
            "output size doesn't match buffer dimensions"
        );
        let width = self.width as usize;
        for (y, row) in self.rows.iter().enumerate() {
            let row = row.lock().expect("row lock poisoned");
            out[y * width..(y + 1) * width].copy_from_slice(&row.color);
        }
    }
}

//! Bar chart rendering to PNG.
//!
//! Draws one bar per label in [`ranked`](super::ranked) order onto an RGB
//! canvas and encodes it as a PNG (zlib via flate2). Labels are not drawn;
//! callers render the legend next to the image in the same order.

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use std::collections::HashMap;
use std::io::Write;

use super::ranked;
use crate::error::Result;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

type Rgb = [u8; 3];

/// Canvas geometry and colors.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub background: Rgb,
    pub grid: Rgb,
    pub axis: Rgb,
    pub bar: Rgb,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            margin: 40,
            background: [255, 255, 255],
            grid: [230, 230, 230],
            axis: [90, 90, 90],
            bar: [135, 206, 235], // skyblue
        }
    }
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let pixels = fill
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the canvas.
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                let i = ((y * self.width + x) * 3) as usize;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    /// Scanlines prefixed with filter type 0.
    fn raw_scanlines(&self) -> Vec<u8> {
        let stride = (self.width * 3) as usize;
        let mut raw = Vec::with_capacity((stride + 1) * self.height as usize);
        for row in self.pixels.chunks(stride) {
            raw.push(0);
            raw.extend_from_slice(row);
        }
        raw
    }

    fn encode_png(&self) -> Result<Vec<u8>> {
        let mut ihdr = Vec::with_capacity(13);
        ihdr.extend_from_slice(&self.width.to_be_bytes());
        ihdr.extend_from_slice(&self.height.to_be_bytes());
        // bit depth 8, color type 2 (RGB), deflate, no filter method, no interlace
        ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.raw_scanlines())?;
        let idat = encoder.finish()?;

        let mut png = PNG_SIGNATURE.to_vec();
        write_chunk(&mut png, b"IHDR", &ihdr);
        write_chunk(&mut png, b"IDAT", &idat);
        write_chunk(&mut png, b"IEND", &[]);
        Ok(png)
    }
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);

    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}

/// Render a label → count distribution as a PNG bar chart.
pub fn render_chart(distribution: &HashMap<String, usize>, style: &ChartStyle) -> Result<Vec<u8>> {
    let mut canvas = Canvas::new(style.width, style.height, style.background);

    let left = style.margin;
    let right = style.width.saturating_sub(style.margin / 2);
    let top = style.margin / 2;
    let bottom = style.height.saturating_sub(style.margin);
    let plot_width = right.saturating_sub(left);
    let plot_height = bottom.saturating_sub(top);

    let bars = ranked(distribution);
    let max_count = bars.iter().map(|(_, count)| *count).max().unwrap_or(0) as u32;

    if max_count > 0 && plot_height > 0 {
        // One grid line per count, thinned out for large maxima
        let step = max_count.div_ceil(10).max(1);
        let mut level = step;
        while level <= max_count {
            let y = bottom - plot_height * level / max_count;
            canvas.fill_rect(left, y, right, y + 1, style.grid);
            level += step;
        }

        let slot = plot_width / bars.len() as u32;
        let bar_width = (slot * 3 / 5).max(1);
        for (i, (_, count)) in bars.iter().enumerate() {
            let x0 = left + slot * i as u32 + slot.saturating_sub(bar_width) / 2;
            let bar_height = plot_height * *count as u32 / max_count;
            canvas.fill_rect(x0, bottom - bar_height, x0 + bar_width, bottom, style.bar);
        }
    }

    // Axes
    canvas.fill_rect(left, top, left + 2, bottom + 2, style.axis);
    canvas.fill_rect(left, bottom, right, bottom + 2, style.axis);

    canvas.encode_png()
}

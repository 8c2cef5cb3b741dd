use crate::types::Rgba;

/// Software pixel target, row-major, origin top-left.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![Rgba::BLACK; width as usize * height as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// RGBA8 bytes for texture upload.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect()
    }

    /// Fills the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the surface.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let x0 = x0.clamp(0, self.width as i32) as usize;
        let x1 = x1.clamp(0, self.width as i32) as usize;
        let y0 = y0.clamp(0, self.height as i32) as usize;
        let y1 = y1.clamp(0, self.height as i32) as usize;
        let stride = self.width as usize;
        for y in y0..y1 {
            self.pixels[y * stride + x0..y * stride + x1.max(x0)].fill(color);
        }
    }

    /// Blends every pixel toward `color` by `amount`.
    pub fn tint(&mut self, color: Rgba, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        for pixel in &mut self.pixels {
            *pixel = pixel.mix(color, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut surface = Surface::new(4, 3);
        let red = Rgba::rgb(255, 0, 0);
        surface.fill_rect(-5, 1, 2, 10, red);
        assert_eq!(surface.pixel(0, 1), Some(red));
        assert_eq!(surface.pixel(1, 2), Some(red));
        assert_eq!(surface.pixel(2, 1), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn inverted_rectangles_draw_nothing() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(3, 3, 1, 1, Rgba::rgb(1, 2, 3));
        assert!(surface.pixels().iter().all(|&p| p == Rgba::BLACK));
    }
}

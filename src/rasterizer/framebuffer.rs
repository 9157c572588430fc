//! Depth-tested framebuffer shared across rasterization threads

use parking_lot::Mutex;

use super::fragment::{FragColor, Fragment};

/// The render target. Every cell pairs a color with the depth of the
/// fragment that produced it, behind its own lock so fragment writes from
/// worker threads can land concurrently.
///
/// Clearing and reading take `&mut self`: the borrow checker guarantees no
/// fragment write can overlap either one.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    cells: Vec<Mutex<FragColor>>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: (0..width * height).map(|_| Mutex::new(FragColor::EMPTY)).collect(),
        }
    }

    /// Reset every cell to black at infinite depth.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell.get_mut() = FragColor::EMPTY;
        }
    }

    /// Depth-tested write. The fragment lands only if it is strictly closer
    /// than what the cell already holds; depth ties keep the incumbent.
    ///
    /// Coordinates must be inside the buffer, which the rasterizer's bounds
    /// check guarantees.
    pub fn write(&self, fragment: &Fragment) {
        let (x, y) = (fragment.x as usize, fragment.y as usize);
        debug_assert!(x < self.width && y < self.height);

        let mut cell = self.cells[y * self.width + x].lock();
        if fragment.z < cell.z {
            *cell = FragColor {
                color: fragment.color,
                z: fragment.z,
            };
        }
    }

    /// Read one cell. Takes `&mut self`, so no writes can be in flight.
    pub fn cell(&mut self, x: usize, y: usize) -> FragColor {
        debug_assert!(x < self.width && y < self.height);
        *self.cells[y * self.width + x].get_mut()
    }

    /// Copy the frame out as row-major RGBA bytes, row 0 first.
    pub fn to_rgba(&mut self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for cell in &mut self.cells {
            bytes.extend_from_slice(&cell.get_mut().color.to_bytes());
        }
        bytes
    }
}

//! Bresenham line walker

use nalgebra_glm::Vec3;

/// Walk the grid cells covering the segment between two screen-space
/// points, both endpoints included. Coordinates are truncated to integers
/// before the walk; z is ignored.
pub fn line(from: &Vec3, to: &Vec3) -> Line {
    let start = (from.x as i32, from.y as i32);
    let end = (to.x as i32, to.y as i32);
    let dx = (end.0 - start.0).abs();
    let dy = (end.1 - start.1).abs();
    Line {
        current: start,
        end,
        dx,
        dy,
        sx: if start.0 < end.0 { 1 } else { -1 },
        sy: if start.1 < end.1 { 1 } else { -1 },
        err: dx - dy,
        done: false,
    }
}

/// Lazy iterator over the cells of a line. Each `next` yields one cell and
/// advances the error accumulator along the major axis.
pub struct Line {
    current: (i32, i32),
    end: (i32, i32),
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Iterator for Line {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let cell = self.current;
        if cell == self.end {
            self.done = true;
            return Some(cell);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.current.0 += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.current.1 += self.sy;
        }
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm as glm;

    #[test]
    fn test_diagonal_endpoints_inclusive() {
        let cells: Vec<_> = line(&glm::vec3(0.0, 0.0, 0.0), &glm::vec3(5.0, 5.0, 0.0)).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (0, 0));
        assert_eq!(cells[5], (5, 5));
    }

    #[test]
    fn test_degenerate_segment_yields_single_cell() {
        let cells: Vec<_> = line(&glm::vec3(3.7, 2.2, 0.0), &glm::vec3(3.1, 2.9, 0.0)).collect();
        assert_eq!(cells, vec![(3, 2)]);
    }

    #[test]
    fn test_steep_line_touches_every_row() {
        let cells: Vec<_> = line(&glm::vec3(0.0, 0.0, 0.0), &glm::vec3(2.0, 7.0, 0.0)).collect();
        assert_eq!(cells.len(), 8);
        for row in 0..8 {
            assert_eq!(cells.iter().filter(|c| c.1 == row).count(), 1);
        }
        assert_eq!(cells[7], (2, 7));
    }

    #[test]
    fn test_reversed_direction() {
        let cells: Vec<_> = line(&glm::vec3(5.0, 2.0, 0.0), &glm::vec3(1.0, 2.0, 0.0)).collect();
        assert_eq!(cells, vec![(5, 2), (4, 2), (3, 2), (2, 2), (1, 2)]);
    }

    #[test]
    fn test_negative_coordinates_walk_through() {
        let cells: Vec<_> = line(&glm::vec3(-2.0, -2.0, 0.0), &glm::vec3(2.0, 2.0, 0.0)).collect();
        assert_eq!(cells.first(), Some(&(-2, -2)));
        assert_eq!(cells.last(), Some(&(2, 2)));
        assert!(cells.contains(&(0, 0)));
    }
}

use juliaflow_core::PixelResult;

/// Stores per-pixel [`PixelResult`] data for a full frame.
///
/// This is the raw kernel output before coloring. It is consumed once by
/// the palette and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<PixelResult>,
}

impl IterationBuffer {
    pub fn new(width: u32, height: u32, max_iterations: u32, data: Vec<PixelResult>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            max_iterations,
            data,
        }
    }

    /// Number of samples whose orbit escaped.
    pub fn escaped_count(&self) -> usize {
        self.data.iter().filter(|r| r.escaped()).count()
    }

    /// The result at pixel `(x, y)`, or `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<PixelResult> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_escaped_samples() {
        let data = vec![
            PixelResult::Bounded,
            PixelResult::Escaped { iterations: 0 },
            PixelResult::Escaped { iterations: 9 },
            PixelResult::Bounded,
        ];
        let buf = IterationBuffer::new(2, 2, 10, data);
        assert_eq!(buf.escaped_count(), 2);
        assert_eq!(buf.get(1, 1), Some(PixelResult::Bounded));
        assert_eq!(buf.get(0, 1), Some(PixelResult::Escaped { iterations: 9 }));
        assert_eq!(buf.get(2, 0), None);
    }
}

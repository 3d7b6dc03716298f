use crate::{config::RunConfig, frame::Frame, threshold::ThresholdPolicy};

/// Sentinel row written to column 0 in spike mode. Sinks treat it as "no
/// point here" rather than a real row.
pub const SPIKE_SENTINEL: i32 = -1;

/// The pair of edge traces produced by one scan pass at one skip value.
///
/// Both traces have length = output width; rows are already remapped to
/// output space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeResult {
    pub bottom: Vec<i32>,
    pub top: Vec<i32>,
}

/// Locates the outermost light/dark transitions of a frame, column by column.
pub struct EdgeScanner {
    out_width: u32,
    out_height: u32,
    threshold: ThresholdPolicy,
    spike: bool,
}

impl EdgeScanner {
    pub fn new(out_width: u32, out_height: u32, threshold: ThresholdPolicy, spike: bool) -> Self {
        Self {
            out_width,
            out_height,
            threshold,
            spike,
        }
    }

    pub fn from_config(cfg: &RunConfig) -> Self {
        Self::new(cfg.out_width, cfg.out_height, cfg.threshold, cfg.spike)
    }

    /// Scan one frame, tolerating `skip` transitions per column before the
    /// reported one.
    pub fn scan(&self, frame: &Frame, skip: u32) -> EdgeResult {
        let width = self.out_width as usize;
        let mut bottom = vec![0i32; width];
        let mut top = vec![0i32; width];

        for x in 0..self.out_width {
            let xi = (x as u64 * frame.width() as u64 / self.out_width as u64) as u32;
            bottom[x as usize] = self.remap(self.scan_bottom(frame, xi, skip), frame.height());
            top[x as usize] = self.remap(self.scan_top(frame, xi, skip), frame.height());
        }

        if self.spike && width > 0 {
            bottom[0] = SPIKE_SENTINEL;
            top[0] = SPIKE_SENTINEL;
        }

        EdgeResult { bottom, top }
    }

    /// Walk rows bottom-up; report the last row before the accepted
    /// transition's sample. Too few transitions lock the row to the bottom.
    fn scan_bottom(&self, frame: &Frame, xi: u32, skip: u32) -> u32 {
        let in_h = frame.height();
        let mut current = self
            .threshold
            .classify(frame.sample(xi, in_h - 1), false, true);
        let mut passes = skip;

        let mut y = in_h - 1;
        while y > 0 {
            let next = self.threshold.classify(frame.sample(xi, y - 1), current, false);
            if next != current {
                current = next;
                if passes == 0 {
                    return y;
                }
                passes -= 1;
            }
            y -= 1;
        }

        in_h - 1
    }

    /// Same walk, top-down. The insufficient-transitions fallback also locks
    /// to the bottom row, not the top; preserved intentionally.
    fn scan_top(&self, frame: &Frame, xi: u32, skip: u32) -> u32 {
        let in_h = frame.height();
        let mut current = self.threshold.classify(frame.sample(xi, 0), false, true);
        let mut passes = skip;

        let mut y = 0;
        while y + 1 < in_h {
            let next = self.threshold.classify(frame.sample(xi, y + 1), current, false);
            if next != current {
                current = next;
                if passes == 0 {
                    return y;
                }
                passes -= 1;
            }
            y += 1;
        }

        in_h - 1
    }

    fn remap(&self, y: u32, in_h: u32) -> i32 {
        (y as u64 * self.out_height as u64 / in_h as u64) as i32
    }
}

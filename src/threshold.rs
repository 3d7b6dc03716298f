/// Reduces a luma sample to a boolean light/dark class.
///
/// `current` is the class the scan currently holds and `first` marks the
/// initial sample of a scan, where no prior class exists yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// Light iff the sample is pure white (luma 255).
    WhiteSplit,
    /// Asymmetric thresholds that depend on the current class, biasing the
    /// scan toward stable silhouettes under compression noise.
    Hysteretic,
}

impl ThresholdPolicy {
    pub fn classify(self, luma: u8, current: bool, first: bool) -> bool {
        match self {
            ThresholdPolicy::WhiteSplit => luma == u8::MAX,
            ThresholdPolicy::Hysteretic => {
                if first {
                    luma > 127
                } else if current {
                    luma > 10
                } else {
                    luma > 250
                }
            }
        }
    }
}

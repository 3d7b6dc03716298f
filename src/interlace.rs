//! Composition of extra edge scans into the primary channel pair.
//!
//! Pixel interlacing assigns output columns to channel depths in a repeating
//! cycle, so a single pair of traces carries an apparent multi-level trace.

/// Merge deeper-skip scans into the primary pair, in place.
///
/// `alternating` must have even length, ordered `[top, bottom]` per skip
/// depth, shallowest first. Priority rules keep outer edges visible: an
/// alternate bottom is only adopted below the primary top, an alternate top
/// only above the primary bottom.
pub fn merge(bottom: &mut [i32], top: &mut [i32], alternating: &[&[i32]]) {
    debug_assert_eq!(bottom.len(), top.len());
    debug_assert_eq!(alternating.len() % 2, 0);

    let depth = alternating.len().div_ceil(2);

    for x in 0..bottom.len() {
        let column_depth = x % (depth + 1);
        let original_bottom = bottom[x];
        let original_top = top[x];

        for (i, alt) in alternating.iter().enumerate() {
            let in_depth = (i + 2).div_ceil(2);
            if in_depth > column_depth {
                break;
            }

            let v = alt[x];
            if i % 2 == 1 {
                // Bottom slot: adopt only below the primary top; on even
                // depths a rejected value restores the outer edge.
                if v > top[x] {
                    bottom[x] = v;
                } else if in_depth % 2 == 0 {
                    bottom[x] = original_bottom;
                }
            } else {
                // Top slot: adopt only above the primary bottom.
                if v < bottom[x] {
                    top[x] = v;
                } else {
                    top[x] = original_top;
                }
            }
        }
    }
}

/// Element-wise upper clamp: `dest[i] = min(dest[i], max[i])`.
pub fn clamp_max(dest: &mut [i32], max: &[i32]) {
    for (d, &m) in dest.iter_mut().zip(max) {
        if *d > m {
            *d = m;
        }
    }
}

/// Element-wise lower clamp: `dest[i] = max(dest[i], min[i])`.
pub fn clamp_min(dest: &mut [i32], min: &[i32]) {
    for (d, &m) in dest.iter_mut().zip(min) {
        if *d < m {
            *d = m;
        }
    }
}

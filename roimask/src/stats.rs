use crate::sample::Sample;
use crate::view::MaskedView;

/// Summary statistics of the "on" samples of a masked view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskedStats {
    pub count: u64,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Statistics over the on-samples of `view`, or `None` when the mask
/// turns every position off.
pub fn masked_stats<T>(view: &MaskedView<'_, T>) -> Option<MaskedStats>
where
    T: Sample + Copy + Into<f64>,
{
    let mut count = 0u64;
    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &v in view.cursor() {
        let v: f64 = v.into();
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    if count == 0 {
        return None;
    }
    Some(MaskedStats {
        count,
        sum,
        mean: sum / count as f64,
        min,
        max,
    })
}

/// Fraction of the region's box the mask turns on.
pub fn coverage<T: Sample>(view: &MaskedView<'_, T>) -> f64 {
    let mut on = 0u64;
    let mut total = 0u64;
    for s in view.localizing_cursor() {
        total += 1;
        if s.on {
            on += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        on as f64 / total as f64
    }
}

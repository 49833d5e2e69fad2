use super::error::EmptyViewError;
use super::filter::FilteredView;

/// Number of bins in the house value histogram.
pub const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_price: f64,
    pub mean_income: f64,
    /// Mean `(longitude, latitude)`, used to centre the map.
    pub centroid: (f64, f64),
}

/// Derive the sidebar statistics for a view.
///
/// Averages over zero rows are undefined, so an empty view is an error rather
/// than a NaN.
pub fn summarize(view: &FilteredView) -> Result<Summary, EmptyViewError> {
    if view.is_empty() {
        return Err(EmptyViewError);
    }

    let (mut price, mut income, mut lon, mut lat) = (0.0, 0.0, 0.0, 0.0);
    for r in view.records() {
        price += r.median_house_value;
        income += r.median_income;
        lon += r.longitude;
        lat += r.latitude;
    }

    let n = view.len() as f64;
    Ok(Summary {
        count: view.len(),
        mean_price: price / n,
        mean_income: income / n,
        centroid: (lon / n, lat / n),
    })
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `(center, count)` for every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.start + (i as f64 + 0.5) * self.bin_width, c))
    }
}

/// Equal-width bins over the observed range, last bin closed on the right.
///
/// When every value is identical the range is widened by half a unit on each
/// side. Returns `None` for no values or no bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let bin_width = (hi - lo) / bins as f64;
    let mut counts = vec![0; bins];
    for &v in values {
        let idx = (((v - lo) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram {
        start: lo,
        bin_width,
        counts,
    })
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Whole dollars with thousands separators, e.g. `$206,856`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

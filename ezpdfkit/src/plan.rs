//! Split planning.
//!
//! A [`Strategy`] plus a page count gives a [`SplitPlan`]: ordered,
//! non-overlapping [`Segment`]s inside `[1, total_pages]`. Planning only
//! works on page numbers; nothing here touches a document.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{EzPdfError, Result};

/// How a document is divided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum Strategy {
    /// Pull the given pages into a single output. Not a contiguous split,
    /// so [`plan`] refuses it; see
    /// [`crate::split::Splitter::split_extract`].
    Extract,
    /// Start a new segment at each 1-based point.
    SplitAt {
        /// Accepted split points.
        points: Vec<u32>,
    },
    /// Chunks of `n` pages; the last chunk may be shorter.
    EveryN {
        /// Pages per chunk.
        n: u32,
    },
    /// One segment per page.
    EachPage,
    /// First half and second half, the first half rounded down.
    Halves,
}

impl Strategy {
    /// Short name used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::SplitAt { .. } => "split-at",
            Self::EveryN { .. } => "every-n",
            Self::EachPage => "each-page",
            Self::Halves => "halves",
        }
    }
}

/// An inclusive, 1-based run of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// First page, 1-based.
    pub start_page: u32,
    /// Last page, 1-based, inclusive.
    pub end_page: u32,
}

impl Segment {
    /// Create a segment from `start_page` to `end_page` inclusive.
    pub fn new(start_page: u32, end_page: u32) -> Self {
        Self {
            start_page,
            end_page,
        }
    }

    /// Number of pages in the segment.
    pub fn len(&self) -> usize {
        (self.end_page + 1).saturating_sub(self.start_page) as usize
    }

    /// True for a segment that holds no page.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The segment's pages in order.
    pub fn pages(&self) -> Vec<u32> {
        (self.start_page..=self.end_page).collect()
    }
}

/// Ordered segments produced for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPlan {
    /// Page count the plan was computed for.
    pub total_pages: u32,
    /// Segments in output order.
    pub segments: Vec<Segment>,
}

impl SplitPlan {
    /// Number of outputs this plan produces.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the plan produces nothing.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Compute the segments for `strategy` over `total_pages` pages.
///
/// # Errors
///
/// Returns [`EzPdfError::InvalidParameter`] when:
/// - `total_pages` is zero
/// - the strategy is [`Strategy::Extract`]
/// - `SplitAt` has no point in `1..total_pages`
/// - `EveryN` has `n` outside `1..=total_pages`
///
/// # Examples
///
/// ```
/// use ezpdfkit::plan::{plan, Segment, Strategy};
///
/// let plan = plan(10, &Strategy::EveryN { n: 3 }).unwrap();
/// assert_eq!(plan.segments.last(), Some(&Segment::new(10, 10)));
/// ```
pub fn plan(total_pages: u32, strategy: &Strategy) -> Result<SplitPlan> {
    if total_pages == 0 {
        return Err(EzPdfError::invalid_parameter("Document has no pages"));
    }

    let segments = match strategy {
        Strategy::Extract => {
            return Err(EzPdfError::invalid_parameter(
                "Extraction selects pages; it does not produce a split plan",
            ));
        }
        Strategy::SplitAt { points } => split_at(total_pages, points)?,
        Strategy::EveryN { n } => every_n(total_pages, *n)?,
        Strategy::EachPage => (1..=total_pages).map(|p| Segment::new(p, p)).collect(),
        Strategy::Halves => halves(total_pages),
    };

    debug!(
        strategy = strategy.name(),
        total_pages,
        segments = segments.len(),
        "computed split plan"
    );

    Ok(SplitPlan {
        total_pages,
        segments,
    })
}

fn split_at(total_pages: u32, points: &[u32]) -> Result<Vec<Segment>> {
    let valid: BTreeSet<u32> = points
        .iter()
        .copied()
        .filter(|&p| p >= 1 && p < total_pages)
        .collect();

    if valid.is_empty() {
        return Err(EzPdfError::invalid_parameter("No valid split points"));
    }

    // 1 and total+1 frame the points; a point at 1 collapses into the frame.
    let mut boundaries = valid;
    boundaries.insert(1);
    boundaries.insert(total_pages + 1);
    let boundaries: Vec<u32> = boundaries.into_iter().collect();

    Ok(boundaries
        .windows(2)
        .map(|w| Segment::new(w[0], w[1] - 1))
        .collect())
}

fn every_n(total_pages: u32, n: u32) -> Result<Vec<Segment>> {
    if n < 1 || n > total_pages {
        return Err(EzPdfError::invalid_parameter(format!(
            "Pages per file must be between 1 and {total_pages}, got {n}"
        )));
    }

    let mut segments = Vec::with_capacity(total_pages.div_ceil(n) as usize);
    let mut start = 1u32;
    while start <= total_pages {
        let end = start.saturating_add(n - 1).min(total_pages);
        segments.push(Segment::new(start, end));
        start = end + 1;
    }

    Ok(segments)
}

fn halves(total_pages: u32) -> Vec<Segment> {
    let mid = total_pages / 2;
    [Segment::new(1, mid), Segment::new(mid + 1, total_pages)]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect()
}

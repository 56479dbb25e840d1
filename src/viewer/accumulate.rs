//! "Select N rows" across pages.
//!
//! Walks [`page_stream`] from a starting page and picks records in page
//! order until the selection would hold the requested number of rows.

use futures::StreamExt;
use std::collections::HashSet;
use tracing::{debug, info};

use super::selection::Selection;
use crate::api::{page_stream, ApiResult, Artwork, ArtworkPage, ArtworkSource};

/// Records picked by one accumulation run
#[derive(Debug, Clone, Default)]
pub struct Accumulation {
    /// Newly picked records, in page order
    pub added: Vec<Artwork>,

    /// The last page fetched, if any fetch happened
    pub last_page: Option<ArtworkPage>,

    /// Number of pages requested
    pub pages_fetched: u32,
}

/// Snapshot reported after every fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulationProgress {
    pub page: u32,
    pub total_pages: u32,
    pub selected: usize,
    pub target: usize,
}

/// Pick records starting at `from_page` until `selection` plus the picked
/// records reaches `target`. Already selected records are skipped.
pub async fn accumulate_rows<S>(
    source: &S,
    from_page: u32,
    target: usize,
    selection: &Selection,
) -> ApiResult<Accumulation>
where
    S: ArtworkSource + ?Sized,
{
    accumulate_rows_with_progress(source, from_page, target, selection, |_| {}).await
}

/// [`accumulate_rows`] with a callback invoked after every page
pub async fn accumulate_rows_with_progress<S, F>(
    source: &S,
    from_page: u32,
    target: usize,
    selection: &Selection,
    mut on_progress: F,
) -> ApiResult<Accumulation>
where
    S: ArtworkSource + ?Sized,
    F: FnMut(AccumulationProgress),
{
    let mut result = Accumulation::default();
    if target <= selection.len() {
        debug!("Selection already holds {} of {} rows", selection.len(), target);
        return Ok(result);
    }

    let mut remaining = target - selection.len();
    let mut picked = HashSet::new();
    let mut pages = Box::pin(page_stream(source, from_page));

    while let Some(page) = pages.next().await {
        let page = page?;
        result.pages_fetched += 1;

        let fresh: Vec<Artwork> = page
            .data
            .iter()
            .filter(|a| !selection.contains(a.id) && picked.insert(a.id))
            .take(remaining)
            .cloned()
            .collect();

        remaining -= fresh.len();
        debug!(
            "Page {} contributed {} rows, {} still needed",
            page.pagination.current_page,
            fresh.len(),
            remaining
        );
        result.added.extend(fresh);

        on_progress(AccumulationProgress {
            page: page.pagination.current_page,
            total_pages: page.pagination.total_pages,
            selected: selection.len() + result.added.len(),
            target,
        });

        result.last_page = Some(page);
        if remaining == 0 {
            break;
        }
    }

    info!(
        "Accumulated {} rows over {} pages",
        result.added.len(),
        result.pages_fetched
    );
    Ok(result)
}

//! Sequential page iteration over an [`ArtworkSource`]

use futures::stream::{self, Stream};

use super::{errors::ApiResult, source::ArtworkSource, types::ArtworkPage};

/// Stream of consecutive pages starting at `from`.
///
/// Pages are requested one at a time, only when the consumer polls for the
/// next item. The stream ends after the page the API reports as last, after
/// an empty page, or right after yielding an error.
pub fn page_stream<S>(source: &S, from: u32) -> impl Stream<Item = ApiResult<ArtworkPage>> + '_
where
    S: ArtworkSource + ?Sized,
{
    stream::unfold(Some(from.max(1)), move |next| async move {
        let page = next?;
        match source.fetch_page(page).await {
            Ok(payload) => {
                let following = if payload.pagination.is_last_page() || payload.data.is_empty() {
                    None
                } else {
                    Some(page + 1)
                };
                Some((Ok(payload), following))
            }
            Err(e) => Some((Err(e), None)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeSource;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_stream_walks_to_last_page() {
        let source = FakeSource::new(30, 12);
        let pages: Vec<_> = page_stream(&source, 1).collect().await;

        assert_eq!(pages.len(), 3);
        let sizes: Vec<usize> = pages.iter().map(|p| p.as_ref().unwrap().data.len()).collect();
        assert_eq!(sizes, vec![12, 12, 6]);
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let source = FakeSource::new(100, 10);
        let mut pages = Box::pin(page_stream(&source, 4));

        let first = pages.next().await.unwrap().unwrap();
        assert_eq!(first.pagination.current_page, 4);
        assert_eq!(source.requested(), vec![4]);
    }

    #[tokio::test]
    async fn test_stream_stops_after_error() {
        let source = FakeSource::new(100, 10).failing_on(2);
        let pages: Vec<_> = page_stream(&source, 1).collect().await;

        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_ok());
        assert!(pages[1].is_err());
    }
}

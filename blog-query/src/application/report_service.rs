use std::future::{self, Future};
use std::sync::Arc;

use futures_util::TryStreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{error, info, instrument, warn};

use crate::data::post_query_repository::PostQueryRepository;
use crate::domain::error::DomainError;
use crate::domain::query::ReportSpec;
use crate::presentation::report::{REPORT_END, REPORT_START, ReportLine};

#[derive(Clone)]
pub struct ReportService<R: PostQueryRepository + 'static> {
    repo: Arc<R>,
}

impl<R> ReportService<R>
where
    R: PostQueryRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Streams the post summary report into `sink` and returns the number of
    /// summary lines written.
    pub async fn generate_post_summary_report<W>(
        &self,
        max_items: u32,
        sink: &mut W,
    ) -> Result<usize, DomainError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.generate_post_summary_report_with_shutdown(max_items, sink, future::pending())
            .await
    }

    /// Like [`Self::generate_post_summary_report`], but stops between lines once
    /// `shutdown` resolves. A stopped report has no end marker.
    ///
    /// Lines already written are never retracted: on failure the sink is
    /// flushed and the error is returned after being logged.
    #[instrument(skip(self, sink, shutdown))]
    pub async fn generate_post_summary_report_with_shutdown<W, S>(
        &self,
        max_items: u32,
        sink: &mut W,
        shutdown: S,
    ) -> Result<usize, DomainError>
    where
        W: AsyncWrite + Unpin + Send,
        S: Future<Output = ()> + Send,
    {
        match self.write_report(max_items, sink, shutdown).await {
            Ok(lines) => {
                info!(lines, "post summary report completed");
                Ok(lines)
            }
            Err(err) => {
                let _ = sink.flush().await;
                if matches!(err, DomainError::Cancelled) {
                    warn!("post summary report cancelled");
                } else {
                    error!(error = %err, "error generating post summary report");
                }
                Err(err)
            }
        }
    }

    async fn write_report<W, S>(
        &self,
        max_items: u32,
        sink: &mut W,
        shutdown: S,
    ) -> Result<usize, DomainError>
    where
        W: AsyncWrite + Unpin + Send,
        S: Future<Output = ()> + Send,
    {
        let mut rows = self.repo.post_report_rows(ReportSpec { max_items });
        tokio::pin!(shutdown);

        sink.write_all(format!("{REPORT_START}\n").as_bytes()).await?;

        let mut written = 0;
        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => return Err(DomainError::Cancelled),
                next = rows.try_next() => next?,
            };
            let Some(row) = next else {
                break;
            };

            let line = format!("{}\n", ReportLine(&row));
            sink.write_all(line.as_bytes()).await?;
            written += 1;
        }

        sink.write_all(format!("{REPORT_END}\n").as_bytes()).await?;
        sink.flush().await?;
        Ok(written)
    }
}

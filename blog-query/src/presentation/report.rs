use std::fmt;

use crate::presentation::dto::PostReportRow;

pub const REPORT_START: &str = "<--REPORT_START-->";
pub const REPORT_END: &str = "<--REPORT_END-->";
pub const LINE_PREFIX: &str = "POST_SUMMARY";

/// One `POST_SUMMARY|id|author|count|latest` line, without the newline.
pub struct ReportLine<'a>(pub &'a PostReportRow);

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.0;
        write!(
            f,
            "{}|{}|{}|{}|{}",
            LINE_PREFIX,
            row.post_id,
            row.author_name,
            row.comment_count,
            row.latest_comment_author.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(latest: Option<&str>, count: i64) -> PostReportRow {
        PostReportRow {
            post_id: 2,
            author_name: "Carol".into(),
            comment_count: count,
            latest_comment_author: latest.map(String::from),
        }
    }

    #[test]
    fn formats_line_with_latest_author() {
        let row = row(Some("Bo"), 2);
        assert_eq!(ReportLine(&row).to_string(), "POST_SUMMARY|2|Carol|2|Bo");
    }

    #[test]
    fn absent_latest_author_is_empty_token() {
        let row = row(None, 0);
        assert_eq!(ReportLine(&row).to_string(), "POST_SUMMARY|2|Carol|0|");
    }
}

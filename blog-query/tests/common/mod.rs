#![allow(dead_code)]

pub mod fixtures {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use blog_query::domain::author::Author;
    use blog_query::domain::comment::Comment;
    use blog_query::domain::post::Post;
    use blog_query::domain::query::{PostSearchSpec, ReportSpec};
    use blog_query::{
        Dataset, DomainError, InMemoryPostQueryRepository, PostQueryRepository, PostReportRow,
        PostSummary,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use futures_util::stream::{self, BoxStream, StreamExt};

    pub fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    /// Three posts; post 2 has comments by Ann (t=10) and Bo (t=20).
    pub fn blog_dataset() -> Dataset {
        Dataset::default()
            .with_author(Author::new(1, "Alice"))
            .with_author(Author::new(2, "Ann"))
            .with_author(Author::new(3, "Bo"))
            .with_author(Author::new(4, "Carol"))
            .with_post(Post::new(3, 1, "Gardening", "tomatoes and basil", at(200)))
            .with_post(Post::new(1, 1, "Hello World", "first post", at(100)))
            .with_post(Post::new(2, 4, "Rust tips", "say HELLO now", at(300)))
            .with_comment(Comment::new(2, 2, 3, at(20)))
            .with_comment(Comment::new(1, 2, 2, at(10)))
            .with_comment(Comment::new(3, 3, 4, at(5)))
    }

    /// Eight posts with repeated titles and timestamps.
    pub fn catalog_dataset() -> Dataset {
        let posts = [
            (1, 2, "Alpha", "learning rust", 10),
            (2, 3, "beta", "nothing here", 20),
            (3, 2, "Gamma", "Rust in production", 20),
            (4, 3, "alpha", "more RUST", 30),
            (5, 2, "Delta", "50% off", 40),
            (6, 3, "Alpha", "trusty tools", 40),
            (7, 2, "Epsilon", "500 off", 50),
            (8, 3, "Zeta", "the end", 60),
        ];
        posts.into_iter().fold(
            Dataset::default()
                .with_author(Author::new(2, "Ann"))
                .with_author(Author::new(3, "Bo")),
            |dataset, (id, author_id, title, content, secs)| {
                dataset.with_post(Post::new(id, author_id, title, content, at(secs)))
            },
        )
    }

    pub fn many_posts(count: i64) -> Dataset {
        (1..=count).fold(
            Dataset::default().with_author(Author::new(1, "Ann")),
            |dataset, id| {
                dataset.with_post(Post::new(id, 1, format!("post {id}"), "body", at(id)))
            },
        )
    }

    pub fn memory(dataset: Dataset) -> InMemoryPostQueryRepository {
        InMemoryPostQueryRepository::new(dataset)
    }

    pub fn report_row(post_id: i64) -> PostReportRow {
        PostReportRow {
            post_id,
            author_name: "Ann".into(),
            comment_count: 0,
            latest_comment_author: None,
        }
    }

    /// What a scripted report stream does after its rows run out.
    #[derive(Clone, Copy)]
    pub enum Tail {
        Fail,
        Stall,
    }

    /// Repository yielding fixed rows, then failing or stalling; searches always fail.
    pub struct ScriptedRepository {
        rows: Vec<PostReportRow>,
        tail: Tail,
        calls: AtomicUsize,
    }

    impl ScriptedRepository {
        pub fn new(rows: Vec<PostReportRow>, tail: Tail) -> Self {
            Self {
                rows,
                tail,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostQueryRepository for ScriptedRepository {
        fn post_report_rows(
            &self,
            _spec: ReportSpec,
        ) -> BoxStream<'_, Result<PostReportRow, DomainError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rows = stream::iter(self.rows.clone().into_iter().map(Ok::<_, DomainError>));
            match self.tail {
                Tail::Fail => rows
                    .chain(stream::once(async {
                        Err(DomainError::DataSource(sqlx::Error::PoolTimedOut))
                    }))
                    .boxed(),
                Tail::Stall => rows.chain(stream::pending()).boxed(),
            }
        }

        async fn post_summaries(
            &self,
            _spec: &PostSearchSpec,
        ) -> Result<Vec<PostSummary>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::DataSource(sqlx::Error::PoolTimedOut))
        }
    }
}

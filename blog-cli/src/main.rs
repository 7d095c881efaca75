use std::sync::Arc;

use blog_query::infrastructure::config::AppConfig;
use blog_query::infrastructure::database::create_pool;
use blog_query::infrastructure::logging::init_logging;
use blog_query::{
    PostSummary, PostgresPostQueryRepository, ReportService, SearchService, SortKey,
};
use clap::{Parser, Subcommand};
use tokio::io::{self, AsyncWrite, AsyncWriteExt, BufWriter};

#[derive(Parser, Debug)]
struct Cli {
    /// Overrides DATABASE_URL.
    #[clap(long)]
    database_url: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Streams the post summary report to stdout.
    Report {
        #[clap(long)]
        max_items: u32,
    },
    /// Newest matching posts, one JSON object per line.
    Search {
        #[clap(long)]
        query: Option<String>,
        #[clap(long)]
        limit: Option<u32>,
    },
    SearchPaged {
        #[clap(long)]
        query: Option<String>,
        #[clap(long, default_value_t = 0)]
        skip: u32,
        #[clap(long)]
        take: u32,
        /// One of id, title, created_at, author_name.
        #[clap(long, default_value = "created_at")]
        sort_by: SortKey,
        #[clap(long)]
        desc: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Cli::parse();

    let config = AppConfig::from_env_with_database_url(args.database_url)?;
    let pool = create_pool(&config).await?;

    let repo = Arc::new(PostgresPostQueryRepository::new(pool));
    let mut stdout = BufWriter::new(io::stdout());

    match args.command {
        Command::Report { max_items } => {
            let reports = ReportService::new(Arc::clone(&repo));
            reports
                .generate_post_summary_report_with_shutdown(max_items, &mut stdout, async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;
        }
        Command::Search { query, limit } => {
            let search = SearchService::new(Arc::clone(&repo));
            let posts = search
                .search_post_summaries(query.as_deref(), limit)
                .await?;
            write_json_lines(&mut stdout, &posts).await?;
        }
        Command::SearchPaged {
            query,
            skip,
            take,
            sort_by,
            desc,
        } => {
            let search = SearchService::new(Arc::clone(&repo));
            let posts = search
                .search_post_summaries_paged(query.as_deref(), skip, take, sort_by, desc)
                .await?;
            write_json_lines(&mut stdout, &posts).await?;
        }
    }

    stdout.flush().await?;
    Ok(())
}

async fn write_json_lines<W>(out: &mut W, posts: &[PostSummary]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for post in posts {
        let line = serde_json::to_string(post)?;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    Ok(())
}

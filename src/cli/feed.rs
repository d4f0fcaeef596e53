use clap::Parser;
use error_stack::{Report, Result};
use std::fmt::{self, Display};

use feedview::feed::{FeedSnapshot, LoadOutcome, PageItem, SortMode};
use feedview::App;

use super::CommandError;

/// Show one page of the feed
#[derive(Debug, Parser)]
pub struct FeedCommand {
    /// Page to show, starting at 1
    #[clap(long, default_value_t = 1)]
    pub page: u64,
    /// Only list posts matching this term (searched by the server)
    #[clap(long)]
    pub search: Option<String>,
    /// Ordering of the shown page: default, likes or recent
    #[clap(long, default_value_t = SortMode::Default)]
    pub sort: SortMode,
    /// Only show posts with one of these tags; may be repeated
    #[clap(long = "tag")]
    pub tags: Vec<String>,
    /// Also list every tag used across the catalog
    #[clap(long = "tags")]
    pub list_tags: bool,
}

pub async fn run(app: &App, args: FeedCommand) -> Result<(), CommandError> {
    let store = app.feed_store();
    if args.list_tags {
        store.load_all_tags().await;
    }

    let mut outcome = match args.search.as_deref() {
        Some(term) => store.search(term).await,
        None => store.load_page(args.page).await,
    };
    if args.search.is_some() && args.page != 1 && outcome == LoadOutcome::Loaded {
        outcome = store.load_page(args.page).await;
    }

    match outcome {
        LoadOutcome::Failed => {
            let message = store
                .last_error()
                .map(|failure| failure.message)
                .unwrap_or_default();

            return Err(Report::new(CommandError).attach_printable(message));
        }
        LoadOutcome::OutOfRange => {
            let pages = store.pagination().total_pages();
            println!("Page {} does not exist, the feed has {pages} page(s).", args.page);
            return Ok(());
        }
        LoadOutcome::Loaded | LoadOutcome::Stale => {}
    }

    store.set_sort_mode(args.sort);
    store.set_selected_tags(args.tags);

    print!("{}", FeedView(&store.snapshot()));
    Ok(())
}

struct FeedView<'a>(&'a FeedSnapshot);

impl Display for FeedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feed = self.0;

        if !feed.search_term.is_empty() {
            writeln!(
                f,
                "Results for {:?}: {} post(s)",
                feed.search_term, feed.pagination.total_count
            )?;
        }
        if !feed.selected_tags.is_empty() {
            let tags = feed.selected_tags.iter().cloned().collect::<Vec<_>>();
            writeln!(f, "Tags: {}", tags.join(", "))?;
        }
        writeln!(f, "Sort: {}", feed.sort_mode)?;
        writeln!(f)?;

        if feed.posts.is_empty() {
            writeln!(f, "No posts found.")?;
        }
        for post in &feed.posts {
            writeln!(f, "#{:<4} {}", post.id, post.title)?;
            writeln!(f, "      by user {} | {}", post.user_id, post.reactions)?;
            if !post.tags.is_empty() {
                writeln!(f, "      #{}", post.tags.join(" #"))?;
            }
        }

        let pagination = &feed.pagination;
        if pagination.is_visible() {
            writeln!(f)?;
            let items = pagination
                .window()
                .into_iter()
                .map(|item| match item {
                    PageItem::Page(n) if n == pagination.current_page => format!("[{n}]"),
                    PageItem::Page(n) => n.to_string(),
                    PageItem::Ellipsis => "...".into(),
                })
                .collect::<Vec<_>>();
            writeln!(f, "Pages: {}", items.join(" "))?;
        }

        if !feed.all_tags.is_empty() {
            let tags = feed.all_tags.iter().cloned().collect::<Vec<_>>();
            writeln!(f)?;
            writeln!(f, "Available tags: {}", tags.join(", "))?;
        }

        Ok(())
    }
}

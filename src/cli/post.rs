use clap::Parser;
use error_stack::{Result, ResultExt};
use std::fmt::{self, Display};

use feedview::gateway::GatewayError;
use feedview::pages::PostDetail;
use feedview::types::PostId;
use feedview::App;

use super::CommandError;

/// Show a post with its comments and author
#[derive(Debug, Parser)]
pub struct PostCommand {
    pub id: PostId,
}

pub async fn run(app: &App, args: PostCommand) -> Result<(), CommandError> {
    match app.post_detail(args.id).await {
        Ok(detail) => print!("{}", PostView(&detail)),
        Err(error) if error.current_context() == &GatewayError::NotFound => {
            println!("Post {} not found.", args.id);
        }
        Err(error) => return Err(error).change_context(CommandError),
    }
    Ok(())
}

struct PostView<'a>(&'a PostDetail);

impl Display for PostView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let PostDetail {
            post,
            comments,
            author,
        } = self.0;

        writeln!(f, "{}", post.title)?;
        match author {
            Some(author) => writeln!(f, "by {} (@{})", author.full_name(), author.username)?,
            None => writeln!(f, "by user {}", post.user_id)?,
        }
        writeln!(f)?;
        writeln!(f, "{}", post.body)?;
        writeln!(f)?;
        if !post.tags.is_empty() {
            writeln!(f, "#{}", post.tags.join(" #"))?;
        }
        writeln!(f, "{}", post.reactions)?;

        writeln!(f)?;
        writeln!(f, "Comments ({})", comments.len())?;
        for comment in comments {
            writeln!(f, "  @{}: {}", comment.user.username, comment.body)?;
        }
        Ok(())
    }
}

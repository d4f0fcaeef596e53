use clap::Parser;
use error_stack::{Result, ResultExt};
use std::fmt::{self, Display};

use feedview::gateway::GatewayError;
use feedview::pages::UserProfile;
use feedview::types::UserId;
use feedview::App;

use super::CommandError;

/// Show a user profile and the posts they wrote
#[derive(Debug, Parser)]
pub struct UserCommand {
    pub id: UserId,
}

pub async fn run(app: &App, args: UserCommand) -> Result<(), CommandError> {
    match app.user_profile(args.id).await {
        Ok(profile) => print!("{}", ProfileView(&profile)),
        Err(error) if error.current_context() == &GatewayError::NotFound => {
            println!("User {} not found.", args.id);
        }
        Err(error) => return Err(error).change_context(CommandError),
    }
    Ok(())
}

struct ProfileView<'a>(&'a UserProfile);

impl Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let UserProfile { user, posts } = self.0;

        writeln!(f, "[{}] {} (@{})", user.initials(), user.full_name(), user.username)?;
        writeln!(f, "email: {}", user.email)?;
        if let Some(phone) = &user.phone {
            writeln!(f, "phone: {phone}")?;
        }
        if let Some(birth_date) = &user.birth_date {
            writeln!(f, "born: {birth_date}")?;
        }
        if let Some(address) = &user.address {
            writeln!(f, "lives in: {}, {}", address.address, address.city)?;
        }

        writeln!(f)?;
        if posts.is_empty() {
            return writeln!(f, "No posts yet.");
        }
        writeln!(f, "Posts ({})", posts.len())?;
        for post in posts {
            writeln!(f, "  #{:<4} {} ({})", post.id, post.title, post.reactions)?;
        }
        Ok(())
    }
}

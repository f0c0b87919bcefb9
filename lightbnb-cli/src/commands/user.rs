//! User command - look up and create accounts

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use lightbnb_core::{LightbnbConfig, NewUser};
use lightbnb_db::UserRepo;

#[derive(Args, Debug)]
#[command(about = "Look up or create users")]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Fetch a single user by email or id
    Get {
        /// Exact email address
        #[arg(long, conflicts_with = "id")]
        email: Option<String>,
        /// Numeric user id
        #[arg(long)]
        id: Option<i32>,
    },
    /// Create a user and print the new id
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Already-hashed password (stored as given)
        #[arg(long, env = "LIGHTBNB_PASSWORD_HASH")]
        password_hash: String,
    },
}

/// Which key `user get` looks up by
enum Lookup {
    Email(String),
    Id(i32),
}

pub async fn run(args: UserArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        UserCommand::Get { email, id } => {
            let lookup = match (email, id) {
                (Some(email), _) => Lookup::Email(email),
                (None, Some(id)) => Lookup::Id(id),
                (None, None) => bail!("pass --email or --id"),
            };

            let pool = super::connect(config).await?;
            let repo = UserRepo::new(&pool);
            let user = match lookup {
                Lookup::Email(email) => repo.get_by_email(&email).await?,
                Lookup::Id(id) => repo.get_by_id(id).await?,
            };
            let user = user.context("No matching user")?;
            super::print_json(&user)
        }
        UserCommand::Create {
            name,
            email,
            password_hash,
        } => {
            let pool = super::connect(config).await?;
            let id = UserRepo::new(&pool)
                .create(&NewUser::new(name, email, password_hash))
                .await?;
            super::print_json(&serde_json::json!({ "id": id }))
        }
    }
}

//! User CLI commands
//!
//! Admin maintenance of the authorized user list.

use clap::Subcommand;

use crate::display::user::format_user_list;
use crate::error::ClaimsResult;
use crate::models::{SessionContext, UserId};
use crate::services::{NewUser, UserService};
use crate::storage::Storage;

use super::parse_role;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Authorize a new user
    Add {
        /// Email address (unique)
        email: String,
        /// Display name
        name: String,
        /// Role (employee, manager, admin)
        #[arg(short, long, default_value = "employee")]
        role: String,
    },
    /// List authorized users
    List,
    /// Edit a user's name or role
    Edit {
        /// User ID
        id: String,
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New role
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Remove a user
    Remove {
        /// User ID
        id: String,
    },
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    session: &SessionContext,
    cmd: UserCommands,
) -> ClaimsResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { email, name, role } => {
            let role = parse_role(&role)?;
            let user = service.add(session, NewUser::new(email, name, role))?;

            println!("Added user: {}", user.name);
            println!("  Email: {}", user.email);
            println!("  Role: {}", user.role);
            println!("  ID: {}", user.id);
        }

        UserCommands::List => {
            let users = service.list()?;
            println!("{}", format_user_list(&users));
        }

        UserCommands::Edit { id, name, role } => {
            let role = role.as_deref().map(parse_role).transpose()?;
            let user = service.update(session, &UserId::from(id), name, role)?;
            println!("Updated user: {}", user);
        }

        UserCommands::Remove { id } => {
            let id = UserId::from(id);
            service.remove(session, &id)?;
            println!("Removed user: {}", id);
        }
    }

    Ok(())
}

//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};

/// Rolo - personal relationship manager
///
/// Keeps track of the people you meet, what you talked about, and how the
/// relationship is doing.
#[derive(Parser, Debug)]
#[command(name = "rolo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session management
    Auth(AuthCommand),

    /// Contact list, detail, and export
    Contacts(ContactsCommand),

    /// Meeting records
    Meetings(MeetingsCommand),

    /// Show version
    Version,
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Create an account
    Register {
        /// Email address (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Login and persist the session token
    Login {
        /// Email address (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Clear the session
    Logout,

    /// Show session status
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ContactsCommand {
    #[command(subcommand)]
    pub action: ContactsAction,
}

#[derive(Subcommand, Debug)]
pub enum ContactsAction {
    /// List contacts
    List {
        /// Filter by name, company, or position
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a contact with its timeline and playbook
    Show {
        /// Contact ID
        id: i64,
    },

    /// Create a contact
    Create {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        wechat: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
    },

    /// Update fields of a contact
    Update {
        /// Contact ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        stage: Option<String>,
    },

    /// Delete a contact and all its meetings
    Delete {
        /// Contact ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a contact as markdown
    Export {
        /// Contact ID
        id: i64,

        /// Copy to the clipboard instead of writing a file
        #[arg(long)]
        copy: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Meeting Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct MeetingsCommand {
    #[command(subcommand)]
    pub action: MeetingsAction,
}

#[derive(Subcommand, Debug)]
pub enum MeetingsAction {
    /// Record a meeting from raw conversation notes
    Add {
        /// Raw notes of what happened
        text: String,

        /// Attach to a known contact
        #[arg(long)]
        contact_id: Option<i64>,

        /// Let the backend resolve or create the contact by name
        #[arg(long)]
        contact_name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        scenario: Option<String>,
    },

    /// List meetings
    List {
        /// Restrict to one contact
        #[arg(long)]
        contact_id: Option<i64>,
    },

    /// Show one meeting with its extracted facts
    Show {
        /// Meeting ID
        id: i64,
    },
}

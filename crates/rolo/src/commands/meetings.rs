//! Meeting commands.

use anyhow::Result;
use colored::Colorize;
use rolo_core::types::NewMeeting;
use rolo_core::AppContext;

use crate::cli::MeetingsAction;
use crate::format;

/// Handle meeting commands
pub async fn execute(action: MeetingsAction, ctx: &AppContext) -> Result<()> {
    match action {
        MeetingsAction::Add {
            text,
            contact_id,
            contact_name,
            location,
            scenario,
        } => {
            let req = NewMeeting {
                contact_name,
                raw_text: text,
                meeting_date: None,
                location,
                scenario,
            };
            match contact_id {
                Some(id) => ctx.store.add_meeting(id, &req).await?,
                None => ctx.store.create_meeting(&req).await?,
            }
            Ok(())
        }
        MeetingsAction::List { contact_id } => list(contact_id, ctx).await,
        MeetingsAction::Show { id } => show(id, ctx).await,
    }
}

async fn list(contact_id: Option<i64>, ctx: &AppContext) -> Result<()> {
    let meetings = ctx.client.list_meetings(contact_id).await?;

    if meetings.is_empty() {
        println!("No meetings recorded yet.");
        return Ok(());
    }

    for meeting in &meetings {
        let topics = meeting
            .topics
            .as_deref()
            .unwrap_or_default()
            .join(", ");
        println!(
            "{:>4}  {}  {}  {}  {}",
            meeting.id.to_string().dimmed(),
            format::format_date(Some(&meeting.meeting_date)),
            meeting.location.as_deref().unwrap_or("-"),
            topics,
            format::status_label(meeting.status).dimmed(),
        );
    }

    Ok(())
}

async fn show(id: i64, ctx: &AppContext) -> Result<()> {
    let meeting = ctx.client.get_meeting(id).await?;

    println!(
        "{} {}",
        format::format_datetime(&meeting.meeting_date).bold(),
        meeting.location.as_deref().unwrap_or(""),
    );
    println!("{}", "─".repeat(40));
    println!("{}", meeting.raw_text);

    if let Some(topics) = &meeting.topics {
        println!("\nTopics:      {}", topics.join(", "));
    }
    if let Some(facts) = &meeting.key_facts {
        println!("\n{}", "Key Facts".bold());
        for fact in facts {
            match &fact.category {
                Some(category) => println!("  · [{}] {}", category, fact.fact),
                None => println!("  · {}", fact.fact),
            }
        }
    }
    if let Some(commitments) = &meeting.my_commitments {
        println!("\n{}", "My Commitments".bold());
        for c in commitments {
            match &c.deadline {
                Some(deadline) => println!("  · {} (by {})", c.commitment, deadline),
                None => println!("  · {}", c.commitment),
            }
        }
    }
    if let Some(commitments) = &meeting.their_commitments {
        println!("\n{}", "Their Commitments".bold());
        for c in commitments {
            println!("  · {}", c.commitment);
        }
    }
    if let Some(open_loops) = &meeting.open_loops {
        println!("\n{}", "Open Loops".bold());
        for item in open_loops {
            println!("  · {}", item);
        }
    }

    println!(
        "\nStatus:      {}",
        format::status_label(meeting.status)
    );
    if let Some(error) = &meeting.error_message {
        println!("Error:       {}", error.red());
    }

    Ok(())
}

//! Contact commands.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use rolo_core::types::{NewContact, UpdateContact};
use rolo_core::AppContext;

use crate::cli::ContactsAction;
use crate::format;

/// Handle contact commands
pub async fn execute(action: ContactsAction, ctx: &AppContext) -> Result<()> {
    match action {
        ContactsAction::List { search, json } => list(search, json, ctx).await,
        ContactsAction::Show { id } => show(id, ctx).await,
        ContactsAction::Create {
            name,
            nickname,
            phone,
            email,
            wechat,
            company,
            position,
        } => {
            let req = NewContact {
                name,
                nickname,
                phone,
                email,
                wechat,
                current_company: company,
                current_position: position,
            };
            ctx.store.create_contact(&req).await?;
            Ok(())
        }
        ContactsAction::Update {
            id,
            name,
            phone,
            email,
            company,
            position,
            stage,
        } => {
            let req = UpdateContact {
                name,
                phone,
                email,
                current_company: company,
                current_position: position,
                relationship_stage: stage,
                ..Default::default()
            };
            ctx.store.update_contact(id, &req).await?;
            Ok(())
        }
        ContactsAction::Delete { id, yes } => delete(id, yes, ctx).await,
        ContactsAction::Export { id, .. } => export(id, ctx).await,
    }
}

async fn list(search: Option<String>, json: bool, ctx: &AppContext) -> Result<()> {
    ctx.store.load_contacts(search.as_deref()).await?;
    let contacts = ctx.store.contacts();

    if json {
        println!("{}", serde_json::to_string_pretty(&contacts)?);
        return Ok(());
    }

    if contacts.is_empty() {
        println!("No contacts yet. Record one with {}.", "rolo meetings add".cyan());
        return Ok(());
    }

    for contact in &contacts {
        let name = contact.name.as_deref().unwrap_or("(unnamed)");
        let role = match (&contact.current_company, &contact.current_position) {
            (Some(company), Some(position)) => format!("{} · {}", company, position),
            (Some(company), None) => company.clone(),
            (None, Some(position)) => position.clone(),
            (None, None) => String::new(),
        };
        println!(
            "{:>4}  {}  {}  {}  {}",
            contact.id.to_string().dimmed(),
            name.bold(),
            role,
            format::stage_label(contact.relationship_stage.as_deref()).cyan(),
            format::format_date(contact.last_meeting_date.as_ref()).dimmed(),
        );
    }

    Ok(())
}

async fn show(id: i64, ctx: &AppContext) -> Result<()> {
    ctx.store.load_contact_detail(id).await?;
    let Some(aggregate) = ctx.store.current_contact() else {
        return Ok(());
    };

    let contact = &aggregate.contact;
    println!("{}", contact.name.as_deref().unwrap_or("(unnamed)").bold());
    println!("{}", "─".repeat(40));

    if let Some(company) = &contact.current_company {
        let position = contact.current_position.as_deref().unwrap_or("");
        println!("Work:      {} {}", company, position);
    }
    println!(
        "Stage:     {} ({})",
        format::stage_label(contact.relationship_stage.as_deref()),
        format::temperature(contact.temperature_score),
    );
    if let Some(phone) = &contact.phone {
        println!("Phone:     {}", phone);
    }
    if let Some(email) = &contact.email {
        println!("Email:     {}", email);
    }
    if let Some(wechat) = &contact.wechat {
        println!("WeChat:    {}", wechat);
    }
    if let Some(summary) = &contact.career_summary {
        println!("Career:    {}", summary);
    }

    println!("\n{}", "Timeline".bold());
    if aggregate.meetings.is_empty() {
        println!("  (no meetings yet)");
    }
    for meeting in &aggregate.meetings {
        println!(
            "  {}  {}  {}  {}",
            format::format_date(Some(&meeting.meeting_date)),
            meeting.location.as_deref().unwrap_or("-"),
            format::sentiment_label(meeting.sentiment.as_deref()),
            format::status_label(meeting.status).dimmed(),
        );
    }

    if let Some(playbook) = &aggregate.action_playbook {
        if let Some(hooks) = &playbook.conversation_hooks {
            println!("\n{}", "Conversation Hooks".bold());
            for topic in hooks.top_topics.iter().flatten() {
                println!("  · {}", topic);
            }
            for question in hooks.conversation_questions.iter().flatten() {
                println!("  ? {}", question);
            }
        }
    }

    // Leaving the detail view
    ctx.store.clear_current_contact();
    Ok(())
}

async fn delete(id: i64, yes: bool, ctx: &AppContext) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete contact {} and all its meetings?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    ctx.store.delete_contact(id).await?;
    Ok(())
}

async fn export(id: i64, ctx: &AppContext) -> Result<()> {
    // The export file is named after the contact
    let contact = ctx.client.get_contact(id).await?;
    let name = contact.name.unwrap_or_default();

    ctx.store.export_contact(id, &name).await;
    Ok(())
}

//! Account and session commands.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use rolo_core::types::{LoginRequest, RegisterRequest};
use rolo_core::AppContext;

use crate::cli::AuthAction;

/// Handle auth commands
pub async fn execute(action: AuthAction, ctx: &AppContext) -> Result<()> {
    match action {
        AuthAction::Register { email } => register(email, ctx).await,
        AuthAction::Login { email } => login(email, ctx).await,
        AuthAction::Logout => logout(ctx),
        AuthAction::Status => status(ctx),
    }
}

fn prompt_credentials(email: Option<String>) -> Result<(String, String)> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;
    Ok((email, password))
}

async fn register(email: Option<String>, ctx: &AppContext) -> Result<()> {
    let (email, password) = prompt_credentials(email)?;

    let user = ctx.client.register(&RegisterRequest { email, password }).await?;

    println!("{} Account created for {}", "✓".green(), user.email.cyan());
    println!("  Run {} to sign in.", "rolo auth login".cyan());
    Ok(())
}

async fn login(email: Option<String>, ctx: &AppContext) -> Result<()> {
    let (email, password) = prompt_credentials(email)?;

    let token = ctx
        .client
        .login(&LoginRequest {
            email: email.clone(),
            password,
        })
        .await?;
    ctx.session.login(token.access_token, None)?;

    println!("{} Logged in as {}", "✓".green(), email.cyan());
    Ok(())
}

fn logout(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        println!("{} Not logged in.", "✗".red());
        return Ok(());
    }

    ctx.session.clear();
    println!("{} Logged out.", "✓".green());
    Ok(())
}

fn status(ctx: &AppContext) -> Result<()> {
    println!("{}", "Session Status".bold());
    println!("{}", "─".repeat(40));

    match ctx.session.token() {
        Some(token) => {
            let prefix = &token[..12.min(token.len())];
            println!("Token:     {} ({}...)", "Present".green(), prefix.yellow());
        }
        None => println!("Token:     {}", "Not logged in".red()),
    }

    if let Some(user) = ctx.session.user() {
        println!("User:      {}", user.email);
    }

    Ok(())
}

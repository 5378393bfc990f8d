use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use super::Console;
use crate::ui::alert;

pub async fn login(console: &Console, login: Option<String>, password: Option<String>) -> Result<()> {
    let theme = ColorfulTheme::default();
    let login = match login {
        Some(login) => login,
        None => Input::with_theme(&theme).with_prompt("Login").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&theme).with_prompt("Password").interact()?,
    };

    let session = console
        .services
        .auth
        .login(&login, &password)
        .await
        .context("Login failed")?;

    alert::success(&format!(
        "Signed in as admin #{} until {}",
        session.admin_id,
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    ));
    Ok(())
}

pub async fn logout(console: &Console) -> Result<()> {
    let had_session = console.services.auth.current().await.is_some();
    console.services.auth.logout().await.context("Failed to remove the session")?;
    if had_session {
        alert::success("Signed out");
    } else {
        alert::info("No active session");
    }
    Ok(())
}

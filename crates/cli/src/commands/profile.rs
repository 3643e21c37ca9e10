//! Session profile commands.
//!
//! # Usage
//!
//! ```bash
//! tc-cli profile show
//!
//! # Deactivate the signed-in account (prompts unless --yes)
//! tc-cli profile deactivate --yes
//! ```

use terracotta_admin::components::{ActionTarget, ConfirmDialog};
use terracotta_admin::state::AppState;

use super::CommandError;

/// Resolve the session cookie and show who is signed in.
pub async fn show(state: &AppState) -> Result<(), CommandError> {
    let profile = state.sign_in().await?;
    #[allow(clippy::print_stdout)]
    {
        println!("ID:    {}", profile.user_id);
        println!("Name:  {}", profile.name);
        println!("Email: {}", profile.email);
        println!("Role:  {}", profile.role);
    }
    Ok(())
}

/// Deactivate the signed-in account, prompting first.
///
/// The session dies with the account, so the local session state is
/// dropped once the backend confirms.
pub async fn deactivate(state: &AppState, assume_yes: bool) -> Result<(), CommandError> {
    let profile = state.sign_in().await?;

    let summary = format!("Deactivate the account for {}", profile.email);
    let mut dialog = ConfirmDialog::new();
    dialog.open(ActionTarget::new(profile.user_id.clone(), summary.clone()));

    if !super::confirmed(&format!("{summary}?"), assume_yes) {
        dialog.cancel();
        tracing::info!("aborted");
        return Ok(());
    }

    let market = state.market().clone();
    dialog
        .confirm(|_target| async move { market.deactivate_account().await })
        .await?;
    state.sign_out().await;

    tracing::info!("account deactivated; session cleared");
    Ok(())
}

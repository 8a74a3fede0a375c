use marquee::account::{AuthUser, ProfileSync, SyncOutcome};
use marquee::error::Result;
use marquee::state::FileStateStore;

/// Run the first-sign-in profile sync for the given user
pub async fn run(
    config_path: &str,
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
) -> Result<()> {
    let (config, dc) = super::connect(config_path)?;

    let sync = ProfileSync::new(FileStateStore::new(&config.state.path));
    let user = AuthUser {
        email: Some(email),
        display_name,
        photo_url,
    };

    match sync.on_auth_state_changed(&dc, Some(&user)).await? {
        SyncOutcome::Synced => tracing::info!("✅ Profile saved"),
        SyncOutcome::AlreadySynced => {
            tracing::info!("Profile already saved (flag in {})", sync.store().path().display())
        }
        SyncOutcome::SignedOut => {}
    }

    Ok(())
}

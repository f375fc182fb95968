use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::colors::colorize_optional;

use super::open_registry;

/// Update any given profile field, then print the card.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Profile { name, phone, note } = cmd {
        let mut registry = open_registry(cfg)?;

        if name.is_some() || phone.is_some() || note.is_some() {
            let mut profile = registry.profile().clone();
            if let Some(v) = name {
                profile.name = v.clone();
            }
            if let Some(v) = phone {
                profile.phone = v.clone();
            }
            if let Some(v) = note {
                profile.note = v.clone();
            }
            registry.set_profile(profile);
            registry.store().audit("profile", "", "Profile updated");
            success("Profile saved (stored locally only).");
        }

        let p = registry.profile();
        header("Profile");
        println!("Name : {}", colorize_optional(&p.name));
        println!("Phone: {}", colorize_optional(&p.phone));
        println!("Note : {}", colorize_optional(&p.note));
    }

    Ok(())
}

use placescout_core::{load_profiles, AppConfig};

/// Prints the saved searches in the configured profiles file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub(crate) fn run_profiles(config: &AppConfig) -> anyhow::Result<()> {
    let profiles = load_profiles(&config.profiles_path)?;

    if profiles.searches.is_empty() {
        println!(
            "no saved searches in {}; add entries under `searches:`",
            config.profiles_path.display()
        );
        return Ok(());
    }

    println!(
        "{:<24}{:<24}{:<10}{:<8}TYPES",
        "PROFILE", "LOCATION", "MILES", "EMAILS"
    );
    for p in &profiles.searches {
        println!(
            "{:<24}{:<24}{:<10}{:<8}{}",
            p.slug(),
            truncate(&p.location, 22),
            p.radius_miles,
            if p.extract_emails { "yes" } else { "no" },
            p.place_types.join(", ")
        );
    }

    Ok(())
}

pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}

use crate::errors::AppResult;
use crate::ui::messages::{header, info};

const CHECKLIST: &[&str] = &[
    "Signed in to the target platform with a verified account",
    "Payment method ready and payment password at hand",
    "Target link opens correctly (on mobile, prefer opening it in the app)",
    "Network is stable; no large downloads or uploads running",
    "`rcountdown watch` is running in the foreground with sound and --notify",
    "Checkout flow is familiar, so no time is lost switching pages",
];

/// Print the pre-start checklist.
pub fn handle() -> AppResult<()> {
    header("Pre-start checklist");
    for item in CHECKLIST {
        println!("  ✅ {}", item);
    }
    println!();
    info("rcountdown only reminds you and opens links; it never places orders or bypasses platform rules.");
    Ok(())
}

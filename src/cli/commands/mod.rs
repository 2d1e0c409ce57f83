pub mod branch;
pub mod checkin;
pub mod example;
pub mod history;
pub mod story;
pub mod sync;
pub mod tag;

pub fn show_how_to_get_started() {
    println!("🌿 story-flow - story-driven git workflows");
    println!();
    println!("Everyday loop:");
    println!("  🚀 story-flow story-start --id 123 --description \"Add Login\"");
    println!("  💾 story-flow story-commit --scope auth --description \"implement basic login flow\"");
    println!("  📤 story-flow story-push");
    println!("  🔄 story-flow sync");
    println!();
    println!("Housekeeping:");
    println!("  ↩️  story-flow undo [--hard]        # Undo the last commit");
    println!("  ⏪ story-flow revert --commit <sha> # Revert a published commit");
    println!("  🏷️  story-flow tag --version v1.0.0 --message \"Release\" [--push]");
    println!("  🔀 story-flow resolve [--rebase=false]");
    println!();
    println!("💡 Run 'story-flow example' for a full walkthrough.");
}

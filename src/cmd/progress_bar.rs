use indicatif::{ProgressBar, ProgressStyle};

/// Creates and returns a configured progress bar with a custom message.
///
/// The bar draws to stderr and stays hidden when stderr is not a terminal, so
/// it never mixes with the summary on stdout.
///
/// # Arguments
///
/// * `length` - The total number of cases to run.
/// * `message` - A static string slice that will be displayed as the message prefix for the progress bar.
///
/// # Example
///
/// ```
/// use packcheck::cmd::progress_bar::create_progress_bar;
/// let pb = create_progress_bar(4, "Round-tripping");
/// pb.inc(1);
/// pb.finish_and_clear();
/// ```
pub fn create_progress_bar(length: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(message);
    pb
}

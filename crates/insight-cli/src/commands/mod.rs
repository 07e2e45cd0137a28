pub mod analyze;
pub mod config;
pub mod feynman;
pub mod timer;

use insight_core::{Config, Notification, NotificationLevel};

/// Print a notification to stderr unless notifications are turned off.
pub fn notify(config: &Config, notice: &Notification) {
    if !config.notifications.enabled {
        return;
    }
    let tag = match notice.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
        NotificationLevel::Error => "error",
    };
    match &notice.description {
        Some(description) => eprintln!("[{tag}] {}: {description}", notice.title),
        None => eprintln!("[{tag}] {}", notice.title),
    }
}

/// Current-thread runtime for one command. Shut down in the background so a
/// pending stdin read cannot hold the process open.
pub fn block_on<F, T>(future: F) -> Result<T, Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<T, Box<dyn std::error::Error>>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = rt.block_on(future);
    rt.shutdown_background();
    result
}

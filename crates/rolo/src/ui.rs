//! Terminal implementations of the core notification and navigation seams.

use colored::Colorize;
use rolo_core::client::Navigator;
use rolo_core::notify::{Notifier, ToastKind};

/// Prints store notifications as colored status lines.
pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn toast(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => println!("{} {}", "✓".green(), message),
            ToastKind::Error => eprintln!("{} {}", "✗".red(), message),
        }
    }

    fn modal(&self, title: &str, body: &str) {
        println!("{}", title.bold());
        println!("  {}", body);
    }
}

/// There is no login page to jump to in a terminal; point the user at the
/// login command instead.
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn to_login(&self) {
        eprintln!(
            "{} Session expired. Run {} to sign in again.",
            "✗".red(),
            "rolo auth login".cyan()
        );
    }
}

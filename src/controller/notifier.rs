use colored::Colorize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

// fire-and-forget; the controller never waits on an acknowledgment
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.push(Notice {
            message: message.to_string(),
            severity,
        });
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => println!(
                "{}{}{} {}",
                "[".bold().white(),
                "OK".bold().green(),
                "]".bold().white(),
                message.bold().white()
            ),
            Severity::Error => println!(
                "{}{}{} {}",
                "[".bold().white(),
                "ERR".bold().red(),
                "]".bold().white(),
                message.bold().white()
            ),
        }
    }
}

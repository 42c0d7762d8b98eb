/// A write-only sink for user-facing notices.
pub trait Notify {
    fn notify(&self, message: &str);
}

impl<T: Notify + ?Sized> Notify for &T {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Where notices end up.
///
/// Deploys route notices to the diagnostic log; everything else prints
/// them to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notifier {
    Status,
    Log,
}

impl Notifier {
    pub fn for_mode(deploy: bool) -> Self {
        if deploy { Self::Log } else { Self::Status }
    }
}

impl Notify for Notifier {
    fn notify(&self, message: &str) {
        match self {
            Self::Status => eprintln!("{message}"),
            Self::Log => tracing::info!("{message}"),
        }
    }
}

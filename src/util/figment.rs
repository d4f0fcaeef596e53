use error_stack::{Context, Report};

/// Breaks a [`figment::Error`] down into printable attachments so a
/// config failure says which key failed and where it was read from.
pub trait FigmentErrorAttachable<T: Context> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, error: figment::Error) -> Report<T> {
        // figment chains every failure it ran into during extraction
        error.into_iter().fold(self, |report, e| {
            let mut message = e.kind.to_string();

            if let (Some(profile), Some(md)) = (&e.profile, &e.metadata) {
                if !e.path.is_empty() {
                    let key = md.interpolate(profile, &e.path);
                    message.push_str(&format!(" for key {key:?}"));
                }
            }

            if let Some(md) = &e.metadata {
                match &md.source {
                    Some(source) => message.push_str(&format!(" in {source} {}", md.name)),
                    None => message.push_str(&format!(" in {}", md.name)),
                }
            }

            report.attach_printable(message)
        })
    }
}

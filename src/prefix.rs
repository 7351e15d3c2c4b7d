use crate::schema::Field;
use itertools::Itertools;

/// Separator placed between ancestor names in a prompt prefix.
pub const ANCESTOR_DELIMITER: &str = "::";

/// Marker prepended to prompts inside a repeated or map context.
pub const REPEATED_MARKER: &str = "<repeated> ";

/// Default prompt template.
pub const DEFAULT_PREFIX_FORMAT: &str = "{ancestor}{name} ({type})";

/// Renders prompt labels from a template with `{ancestor}`, `{name}` and `{type}` placeholders.
pub struct PrefixFormatter;

impl PrefixFormatter {
    /// Renders the prompt for `field`.
    ///
    /// Repetition is sticky: once any ancestor was entered from a repeated or
    /// map field, every prompt below it carries the repeated marker.
    pub fn format_prompt<S: AsRef<str>>(
        template: &str,
        field: &Field,
        ancestors: &[S],
        ancestor_has_repeated: bool,
    ) -> String {
        Self::format_parts(
            template,
            field.name(),
            field.type_name(),
            ancestors,
            field.is_repeated() || ancestor_has_repeated,
        )
    }

    pub(crate) fn format_parts<S: AsRef<str>>(
        template: &str,
        name: &str,
        type_name: &str,
        ancestors: &[S],
        repeated: bool,
    ) -> String {
        let ancestor = if ancestors.is_empty() {
            String::new()
        } else {
            format!(
                "{}{}",
                ancestors.iter().map(AsRef::<str>::as_ref).join(ANCESTOR_DELIMITER),
                ANCESTOR_DELIMITER
            )
        };

        let rendered = template
            .replace("{ancestor}", &ancestor)
            .replace("{name}", name)
            .replace("{type}", type_name);

        if repeated {
            format!("{}{}", REPEATED_MARKER, rendered)
        } else {
            rendered
        }
    }
}

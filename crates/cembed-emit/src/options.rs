use crate::ident::sanitize;

/// Immutable per-invocation embedding configuration.
///
/// Resolved once from the CLI and passed by reference to every transcode
/// call; never mutated mid-run.
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
    /// Prepended to every sanitized identifier. Ignored when
    /// `variable_name` is set.
    pub prefix: String,
    /// Explicit identifier override for a single-file invocation.
    pub variable_name: Option<String>,
    /// Omit the `static` qualifier on generated declarations.
    pub no_static: bool,
    /// Append one `0` element after each file's data bytes.
    pub zero_terminator: bool,
    /// Also emit a `#ifdef _DEBUG` runtime-load alternative per file.
    pub debug_load: bool,
    /// Emit a filename/array/size correlation table with this name.
    pub table_name: Option<String>,
}

impl EmbedOptions {
    /// Resolve the generated identifier for one input filename.
    pub fn identifier_for(&self, filename: &str) -> String {
        match &self.variable_name {
            Some(name) => name.clone(),
            None => format!("{}{}", self.prefix, sanitize(filename)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_prefix() {
        let options = EmbedOptions {
            prefix: "res_".to_string(),
            variable_name: Some("logo".to_string()),
            ..EmbedOptions::default()
        };
        assert_eq!(options.identifier_for("img/logo.png"), "logo");
    }

    #[test]
    fn prefix_applied_to_sanitized_name() {
        let options = EmbedOptions {
            prefix: "res_".to_string(),
            ..EmbedOptions::default()
        };
        assert_eq!(options.identifier_for("img/logo.png"), "res_img_logo_png");
    }
}

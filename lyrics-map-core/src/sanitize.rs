use {
    std::{borrow::Cow, fs, path::Path},
    once_cell::sync::Lazy,
    regex::Regex,
    anyhow::{Context, Result},
};

// Textual match only: a `: NaN` inside a string value is rewritten too.
static NAN_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*NaN").expect("valid NaN pattern"));

pub fn sanitize_nan_tokens(text: &str) -> (Cow<'_, str>, usize) {
    let replacements = NAN_VALUE.find_iter(text).count();
    (NAN_VALUE.replace_all(text, ": null"), replacements)
}

/// Rewrites `path` in place and returns how many tokens were replaced. The
/// file is left untouched when there is nothing to replace.
pub fn sanitize_file(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let (fixed, replacements) = sanitize_nan_tokens(&text);
    if replacements > 0 {
        fs::write(path, fixed.as_bytes()).with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(replacements)
}

/// Map a filename to a valid C identifier fragment.
///
/// ASCII letters and digits pass through; every other character becomes a
/// single `_`. Output length in characters equals input length. Uniqueness
/// across files is not this function's concern.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

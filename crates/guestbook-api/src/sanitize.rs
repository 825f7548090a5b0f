/// Collapse every whitespace run to a single space, trim, and cap the result
/// at `max_chars` characters.
pub fn sanitize(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let capped: String = collapsed.chars().take(max_chars).collect();
    capped.trim_end().to_string()
}

use std::path::Path;

/// Turns a file name into a symbol by replacing everything outside `[0-9a-zA-Z_]`.
pub fn identifier_from_path(path: &Path) -> String {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Formats bytes as `0x`-prefixed hex literals, `columns` to a line, each line indented by
/// `indent` spaces and ending with a trailing comma.
pub fn format_bytes(bytes: &[u8], columns: usize, indent: usize) -> String {
    let indent = " ".repeat(indent);
    bytes
        .chunks(columns.max(1))
        .map(|line| {
            let values: Vec<String> = line.iter().map(|byte| format!("0x{byte:02x},")).collect();
            format!("{indent}{}", values.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

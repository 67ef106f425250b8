//! Debug utilities for printing octets as hex strings.

/// Formats a byte slice as a space-separated hex string.
///
/// At most `max` bytes are shown; the remainder is summarised.
///
/// # Example
///
/// ```
/// use reproca_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[0x01, 0x02, 0x03], 2), "01 02... (1 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut result = octets
        .iter()
        .take(max)
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ");

    if octets.len() > max {
        result.push_str(&format!("... ({} more)", octets.len() - max));
    }

    result
}

/// Renders a byte slice as rows of 16 pipe-delimited hex octets.
///
/// # Example
///
/// ```
/// use reproca_buffers::hexdump;
///
/// assert_eq!(hexdump(&[0x06, 0x00]), "|06|00|\n");
/// ```
pub fn hexdump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3 + data.len() / 16 + 2);
    for row in data.chunks(16) {
        out.push('|');
        for byte in row {
            out.push_str(&format!("{byte:02x}|"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_octets_single() {
        assert_eq!(print_octets(&[0x01], 16), "01");
    }

    #[test]
    fn test_print_octets_truncated() {
        let data: Vec<u8> = (0..20).collect();
        let result = print_octets(&data, 10);
        assert!(result.starts_with("00 01 02"));
        assert!(result.ends_with("... (10 more)"));
    }

    #[test]
    fn test_hexdump_rows() {
        let data: Vec<u8> = (0..17).collect();
        let dump = hexdump(&data);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "|00|01|02|03|04|05|06|07|08|09|0a|0b|0c|0d|0e|0f|"
        );
        assert_eq!(lines[1], "|10|");
    }

    #[test]
    fn test_hexdump_empty() {
        assert_eq!(hexdump(&[]), "");
    }
}

//! Hex rendering of octets for debug output.

use std::fmt::{self, Write};

/// Writes up to `max` octets as space-separated lowercase hex, followed by a
/// count of the octets left out.
pub(crate) fn write_octets<W: Write>(out: &mut W, octets: &[u8], max: usize) -> fmt::Result {
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write!(out, "{:02x}", byte)?;
    }
    if octets.len() > max {
        write!(out, "... ({} more)", octets.len() - max)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(octets: &[u8], max: usize) -> String {
        let mut out = String::new();
        write_octets(&mut out, octets, max).unwrap();
        out
    }

    #[test]
    fn empty() {
        assert_eq!(render(&[], 16), "");
    }

    #[test]
    fn several() {
        assert_eq!(render(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
    }

    #[test]
    fn truncated() {
        let data: Vec<u8> = (0..20).collect();
        assert!(render(&data, 10).ends_with("09... (10 more)"));
    }
}

//! Route ID assignment.
//!
//! # Responsibilities
//! - Hash a route path and its declared parameter count
//! - Render the hash as a fixed-width, identifier-safe token
//!
//! # Design Decisions
//! - cyrb53: 53-bit avalanching hash, fast, no seed randomisation
//! - Hash input is the UTF-16 code units of the path so IDs stay stable
//!   for non-ASCII route names across implementations
//! - Arity is appended to the path; this separates overloads but does not
//!   guarantee uniqueness (the builder rejects collisions)

use crate::routing::types::RouteId;

/// Character used to right-pad short hashes.
pub const PAD: char = '-';

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 53-bit cyrb53 hash of `input`.
pub fn cyrb53(input: &str, seed: u32) -> u64 {
    let mut h1: u32 = 0xdead_beef ^ seed;
    let mut h2: u32 = 0x41c6_ce57 ^ seed;

    for unit in input.encode_utf16() {
        let ch = u32::from(unit);
        h1 = (h1 ^ ch).wrapping_mul(2_654_435_761);
        h2 = (h2 ^ ch).wrapping_mul(1_597_334_677);
    }

    h1 = (h1 ^ (h1 >> 16)).wrapping_mul(2_246_822_507);
    h1 ^= (h2 ^ (h2 >> 13)).wrapping_mul(3_266_489_909);
    h2 = (h2 ^ (h2 >> 16)).wrapping_mul(2_246_822_507);
    h2 ^= (h1 ^ (h1 >> 13)).wrapping_mul(3_266_489_909);

    (u64::from(h2 & 0x1f_ffff) << 32) + u64::from(h1)
}

/// Lowercase radix-36 rendering of `value`.
pub fn to_radix36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Every byte comes from DIGITS, so this is ASCII.
    digits.into_iter().map(char::from).collect()
}

/// Truncate or pad a rendered hash to exactly `width` characters.
pub fn fit_width(rendered: &str, width: usize) -> String {
    let mut id: String = rendered.chars().take(width).collect();
    while id.len() < width {
        id.push(PAD);
    }
    id
}

/// Assign the route ID for `route_path` with `params` declared parameters.
pub fn route_id(route_path: &str, params: usize, width: usize) -> RouteId {
    let hash = cyrb53(&format!("{route_path}{params}"), 0);
    RouteId::new(fit_width(&to_radix36(hash), width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrb53_known_values() {
        assert_eq!(cyrb53("", 0), 3_338_908_027_751_811);
        assert_eq!(cyrb53("a", 0), 7_929_297_801_672_961);
        assert_eq!(cyrb53("revenge", 0), 4_051_478_007_546_757);
        assert_eq!(cyrb53("revenue", 0), 8_309_097_637_345_594);
        assert_eq!(cyrb53("revenue", 1), 8_697_026_808_958_300);
    }

    #[test]
    fn test_radix36() {
        assert_eq!(to_radix36(0), "0");
        assert_eq!(to_radix36(35), "z");
        assert_eq!(to_radix36(36), "10");
        assert_eq!(to_radix36(7_929_297_801_672_961), "262p94epp1d");
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("262p94epp1d", 10), "262p94epp1");
        assert_eq!(fit_width("z", 10), "z---------");
        assert_eq!(fit_width("abc", 3), "abc");
    }

    #[test]
    fn test_route_id_is_deterministic() {
        assert_eq!(route_id("/foo", 1, 10).as_str(), "2b4e7k513w");
        assert_eq!(route_id("/page/open", 1, 10).as_str(), "27lx547cdr");
        assert_eq!(route_id("/foo", 1, 10), route_id("/foo", 1, 10));
    }

    #[test]
    fn test_route_id_depends_on_arity() {
        assert_eq!(route_id("/foo", 2, 10).as_str(), "1n1mjw8hhp");
        assert_ne!(route_id("/foo", 1, 10), route_id("/foo", 2, 10));
    }

    #[test]
    fn test_route_id_width() {
        for width in [4, 6, 10, 11] {
            assert_eq!(route_id("/some/route", 3, width).as_str().len(), width);
        }
        assert!(route_id("/x", 0, 10)
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == PAD));
    }
}

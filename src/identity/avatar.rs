// src/identity/avatar.rs
//! Placeholder avatar shown when no logo image loads

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyColor {
    pub bg: &'static str,
    pub text: &'static str,
}

const PALETTE: [CompanyColor; 8] = [
    // blue
    CompanyColor {
        bg: "#DBEAFE",
        text: "#2563EB",
    },
    // green
    CompanyColor {
        bg: "#D1FAE5",
        text: "#059669",
    },
    // red
    CompanyColor {
        bg: "#FEE2E2",
        text: "#DC2626",
    },
    // purple
    CompanyColor {
        bg: "#F3E8FF",
        text: "#7C3AED",
    },
    // amber
    CompanyColor {
        bg: "#FEF3C7",
        text: "#D97706",
    },
    // cyan
    CompanyColor {
        bg: "#CFFAFE",
        text: "#0891B2",
    },
    // pink
    CompanyColor {
        bg: "#FCE7F3",
        text: "#DB2777",
    },
    // indigo
    CompanyColor {
        bg: "#E0E7FF",
        text: "#4F46E5",
    },
];

/// Palette entry for a company name. Same name, same color.
pub fn get_company_color(name: &str) -> CompanyColor {
    let name = if name.is_empty() { "Unknown" } else { name };

    // hash = code + ((hash << 5) - hash), with the shift done in 32-bit
    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = unit as i64 + (shifted - hash);
    }

    PALETTE[(hash.unsigned_abs() % PALETTE.len() as u64) as usize]
}

/// Single uppercase initial, `?` for an empty name
pub fn get_company_initials(name: &str) -> String {
    match name.chars().next() {
        Some(first) => first.to_uppercase().collect(),
        None => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_deterministic() {
        assert_eq!(get_company_color("Acme"), get_company_color("Acme"));
        assert!(PALETTE.contains(&get_company_color("Acme")));
    }

    #[test]
    fn test_color_hash_values() {
        // "A" hashes to 65 → 65 % 8 = 1
        assert_eq!(get_company_color("A"), PALETTE[1]);
        // "Ab": 98 + (65 * 32 - 65) = 2113 → 2113 % 8 = 1
        assert_eq!(get_company_color("Ab"), PALETTE[1]);
        // empty names share the "Unknown" entry
        assert_eq!(get_company_color(""), get_company_color("Unknown"));
    }

    #[test]
    fn test_color_survives_long_names() {
        let long = "Extraordinarily Long Company Name Incorporated International".repeat(4);
        assert!(PALETTE.contains(&get_company_color(&long)));
    }

    #[test]
    fn test_initials() {
        assert_eq!(get_company_initials("acme"), "A");
        assert_eq!(get_company_initials("Zeta"), "Z");
        assert_eq!(get_company_initials(""), "?");
    }
}

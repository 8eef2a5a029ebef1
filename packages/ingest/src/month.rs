//! Danish month names as they appear in the payslip filenames.

/// Maps a Danish month name to its 1-based number.
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    match name {
        "januar" => Some(1),
        "februar" => Some(2),
        "marts" => Some(3),
        "april" => Some(4),
        "maj" => Some(5),
        "juni" => Some(6),
        "juli" => Some(7),
        "august" => Some(8),
        "september" => Some(9),
        "oktober" => Some(10),
        "november" => Some(11),
        "december" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_twelve_months() {
        let names = [
            "januar",
            "februar",
            "marts",
            "april",
            "maj",
            "juni",
            "juli",
            "august",
            "september",
            "oktober",
            "november",
            "december",
        ];
        for (index, name) in names.iter().enumerate() {
            assert_eq!(month_number(name), Some(index as u32 + 1));
        }
    }

    #[test]
    fn unknown_names_are_none() {
        assert_eq!(month_number("january"), None);
        assert_eq!(month_number(""), None);
    }
}

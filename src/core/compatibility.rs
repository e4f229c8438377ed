use crate::models::{BloodType, Compatibility};
use crate::models::domain::BloodType::*;

/// Donor types a recipient can receive red cells from
///
/// The table is total over the eight types: O- is the universal donor and
/// AB+ the universal recipient.
pub fn acceptable_donors(recipient: BloodType) -> &'static [BloodType] {
    match recipient {
        ONegative => &[ONegative],
        OPositive => &[ONegative, OPositive],
        ANegative => &[ONegative, ANegative],
        APositive => &[ONegative, OPositive, ANegative, APositive],
        BNegative => &[ONegative, BNegative],
        BPositive => &[ONegative, OPositive, BNegative, BPositive],
        AbNegative => &[ONegative, ANegative, BNegative, AbNegative],
        AbPositive => &[
            ONegative, OPositive, ANegative, APositive, BNegative, BPositive, AbNegative,
            AbPositive,
        ],
    }
}

/// Can `donor` give to `recipient`?
#[inline]
pub fn can_donate(donor: BloodType, recipient: BloodType) -> bool {
    acceptable_donors(recipient).contains(&donor)
}

/// Classify a donor against a recipient
#[inline]
pub fn classify(donor: BloodType, recipient: BloodType) -> Compatibility {
    if donor == recipient {
        Compatibility::PerfectMatch
    } else if can_donate(donor, recipient) {
        Compatibility::Compatible
    } else {
        Compatibility::NotCompatible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_donor_and_recipient() {
        for t in BloodType::ALL {
            assert!(can_donate(ONegative, t), "O- should donate to {}", t);
            assert!(can_donate(t, AbPositive), "{} should donate to AB+", t);
        }
    }

    #[test]
    fn test_every_type_accepts_itself() {
        for t in BloodType::ALL {
            assert_eq!(classify(t, t), Compatibility::PerfectMatch);
        }
    }

    #[test]
    fn test_table_sizes() {
        let recipients = [
            ONegative, OPositive, ANegative, APositive, BNegative, BPositive, AbNegative,
            AbPositive,
        ];
        let sizes: Vec<usize> = recipients
            .iter()
            .map(|t| acceptable_donors(*t).len())
            .collect();
        assert_eq!(sizes, vec![1, 2, 2, 4, 2, 4, 4, 8]);
    }

    #[test]
    fn test_rh_negative_recipient_rejects_positive() {
        assert_eq!(classify(OPositive, ONegative), Compatibility::NotCompatible);
        assert_eq!(classify(APositive, AbNegative), Compatibility::NotCompatible);
        assert_eq!(classify(ANegative, AbNegative), Compatibility::Compatible);
    }

    #[test]
    fn test_cross_group_rejected() {
        assert!(!can_donate(APositive, BPositive));
        assert!(!can_donate(BNegative, ANegative));
        assert!(!can_donate(AbNegative, ANegative));
    }
}

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Number of positional features the scoring service expects.
pub const FEATURE_COUNT: usize = 5;

/// Feature names in the positional order of [`FeatureVector`].
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "purchases",
    "loyalty",
    "discounts",
    "discounts x loyalty",
];

/// Largest integer a JSON client can represent exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Loyalty program membership, sent to the service as 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoyaltyFlag {
    NonMember,
    Member,
}

impl LoyaltyFlag {
    /// Maps a numeric value onto the flag. Only exactly `0` and `1` are accepted.
    pub fn from_number(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Self::NonMember)
        } else if value == 1.0 {
            Some(Self::Member)
        } else {
            None
        }
    }

    pub fn as_number(self) -> f64 {
        match self {
            Self::NonMember => 0.0,
            Self::Member => 1.0,
        }
    }
}

/// Validated customer attributes collected by the prediction form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormInput {
    pub age: f64,
    pub purchases: f64,
    pub loyalty: LoyaltyFlag,
    pub discounts_used: f64,
}

impl FormInput {
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector::from(self)
    }
}

/// Positional model input:
/// `[age, purchases, loyalty, discounts, loyalty * discounts]`.
///
/// Only constructible from a [`FormInput`], so the interaction term is always
/// the product of the loyalty flag and the discount count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Pairs every value with its feature name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<&FormInput> for FeatureVector {
    fn from(input: &FormInput) -> Self {
        let loyalty = input.loyalty.as_number();
        Self([
            input.age,
            input.purchases,
            loyalty,
            input.discounts_used,
            loyalty * input.discounts_used,
        ])
    }
}

// Integral values go out as JSON integers (`27`, not `27.0`), which is how
// browsers serialize numbers and what the service has always received.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(FEATURE_COUNT))?;
        for value in self.0 {
            seq.serialize_element(&JsonNumber(value))?;
        }
        seq.end()
    }
}

struct JsonNumber(f64);

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(age: f64, purchases: f64, loyalty: LoyaltyFlag, discounts_used: f64) -> FormInput {
        FormInput {
            age,
            purchases,
            loyalty,
            discounts_used,
        }
    }

    #[test]
    fn test_loyalty_flag_accepts_only_zero_and_one() {
        assert_eq!(LoyaltyFlag::from_number(0.0), Some(LoyaltyFlag::NonMember));
        assert_eq!(LoyaltyFlag::from_number(-0.0), Some(LoyaltyFlag::NonMember));
        assert_eq!(LoyaltyFlag::from_number(1.0), Some(LoyaltyFlag::Member));
        assert_eq!(LoyaltyFlag::from_number(0.5), None);
        assert_eq!(LoyaltyFlag::from_number(2.0), None);
        assert_eq!(LoyaltyFlag::from_number(-1.0), None);
        assert_eq!(LoyaltyFlag::from_number(f64::NAN), None);
    }

    #[test]
    fn test_feature_vector_order() {
        let vector = input(27.0, 11.0, LoyaltyFlag::Member, 0.0).feature_vector();
        assert_eq!(vector.values(), &[27.0, 11.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_interaction_term_is_loyalty_times_discounts() {
        let cases = [
            (LoyaltyFlag::Member, 0.0),
            (LoyaltyFlag::Member, 4.0),
            (LoyaltyFlag::NonMember, 4.0),
            (LoyaltyFlag::Member, 2.5),
            (LoyaltyFlag::NonMember, 0.0),
        ];
        for (loyalty, discounts) in cases {
            let vector = input(40.0, 8.0, loyalty, discounts).feature_vector();
            let values = vector.values();
            assert_eq!(values[4], values[2] * values[3]);
        }
    }

    #[test]
    fn test_integral_features_serialize_without_fraction() {
        let vector = input(27.0, 11.0, LoyaltyFlag::Member, 0.0).feature_vector();
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, "[27,11,1,0,0]");
    }

    #[test]
    fn test_fractional_features_keep_fraction() {
        let vector = input(30.5, 2.0, LoyaltyFlag::Member, 1.5).feature_vector();
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, "[30.5,2,1,1.5,1.5]");
    }

    #[test]
    fn test_named_features() {
        let vector = input(40.0, 8.0, LoyaltyFlag::NonMember, 5.0).feature_vector();
        let named: Vec<_> = vector.named().collect();
        assert_eq!(named[0], ("age", 40.0));
        assert_eq!(named[4], ("discounts x loyalty", 0.0));
    }
}

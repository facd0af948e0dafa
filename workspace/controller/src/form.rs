use std::fmt;

use common::{FormInput, LoyaltyFlag};

use crate::error::{FieldError, ValidationErrors};

/// The four inputs of the prediction form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Age,
    Purchases,
    Loyalty,
    Discounts,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Age, Self::Purchases, Self::Loyalty, Self::Discounts];

    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Purchases => "Total number of purchases",
            Self::Loyalty => "Loyalty",
            Self::Discounts => "Total number of discounts used",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub age: String,
    pub purchases: String,
    pub loyalty: String,
    pub discounts: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Age => &self.age,
            FormField::Purchases => &self.purchases,
            FormField::Loyalty => &self.loyalty,
            FormField::Discounts => &self.discounts,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Age => &mut self.age,
            FormField::Purchases => &mut self.purchases,
            FormField::Loyalty => &mut self.loyalty,
            FormField::Discounts => &mut self.discounts,
        };
        *slot = value.into();
    }

    /// Parses all four fields.
    ///
    /// Empty fields are reported as missing before any numeric check runs, so
    /// an unfilled loyalty field never passes as `0`. Loyalty must then be
    /// exactly `0` or `1`.
    pub fn validate(&self) -> Result<FormInput, ValidationErrors> {
        let mut errors = Vec::new();

        let age = parse_number(FormField::Age, &self.age, &mut errors);
        let purchases = parse_number(FormField::Purchases, &self.purchases, &mut errors);
        let loyalty = parse_loyalty(&self.loyalty, &mut errors);
        let discounts_used = parse_number(FormField::Discounts, &self.discounts, &mut errors);

        match (age, purchases, loyalty, discounts_used) {
            (Some(age), Some(purchases), Some(loyalty), Some(discounts_used))
                if errors.is_empty() =>
            {
                Ok(FormInput {
                    age,
                    purchases,
                    loyalty,
                    discounts_used,
                })
            }
            _ => Err(ValidationErrors::from_failed(errors)),
        }
    }
}

fn coerce(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_number(field: FormField, raw: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    if raw.trim().is_empty() {
        errors.push(FieldError::Missing(field));
        return None;
    }
    let value = coerce(raw);
    if value.is_none() {
        errors.push(FieldError::NotANumber(field));
    }
    value
}

fn parse_loyalty(raw: &str, errors: &mut Vec<FieldError>) -> Option<LoyaltyFlag> {
    if raw.trim().is_empty() {
        errors.push(FieldError::Missing(FormField::Loyalty));
        return None;
    }
    let flag = coerce(raw).and_then(LoyaltyFlag::from_number);
    if flag.is_none() {
        errors.push(FieldError::InvalidLoyalty);
    }
    flag
}

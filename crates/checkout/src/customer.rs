//! Checkout form state: contact details and the shipping address.

use serde::{Deserialize, Serialize};

use affinity_core::ContactEmail;

use crate::error::ValidationError;

/// Contact details collected on the info step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub email: String,
    pub phone: Option<String>,
    pub marketing_consent: bool,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone: None,
            marketing_consent: true,
        }
    }
}

impl CustomerInfo {
    /// Contact info with just an email filled in.
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Validate the email for the info step gate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email has no `@`.
    pub fn contact_email(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(&self.email).map_err(ValidationError::InvalidEmail)
    }
}

/// Delivery address collected on the shipping step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    /// State, county or province.
    pub province: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// An empty address pre-filled with a country.
    #[must_use]
    pub fn with_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    /// Names of required fields that are still empty.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("address1", &self.address1),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validate the address for the shipping step gate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingAddressFields` listing every empty
    /// required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingAddressFields(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Aoife".to_string(),
            last_name: "Byrne".to_string(),
            address1: "1 Grafton Street".to_string(),
            address2: None,
            city: "Dublin".to_string(),
            province: "Dublin".to_string(),
            postal_code: "D02 XY45".to_string(),
            country: "Ireland".to_string(),
        }
    }

    #[test]
    fn test_customer_defaults_to_marketing_consent() {
        let customer = CustomerInfo::default();
        assert!(customer.marketing_consent);
        assert!(customer.email.is_empty());
    }

    #[test]
    fn test_contact_email_gate() {
        assert!(CustomerInfo::with_email("shopper@example.com").contact_email().is_ok());
        assert!(matches!(
            CustomerInfo::with_email("shopper.example.com").contact_email(),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(CustomerInfo::default().contact_email().is_err());
    }

    #[test]
    fn test_complete_address_validates() {
        assert_eq!(complete_address().validate(), Ok(()));
    }

    #[test]
    fn test_optional_fields_are_not_required() {
        let address = ShippingAddress {
            first_name: String::new(),
            last_name: String::new(),
            province: String::new(),
            country: String::new(),
            ..complete_address()
        };
        assert_eq!(address.validate(), Ok(()));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let address = ShippingAddress::with_country("Ireland");
        assert_eq!(
            address.validate(),
            Err(ValidationError::MissingAddressFields(vec![
                "address1",
                "city",
                "postal_code"
            ]))
        );

        let address = ShippingAddress {
            city: String::new(),
            ..complete_address()
        };
        assert_eq!(address.missing_required_fields(), vec!["city"]);
    }
}

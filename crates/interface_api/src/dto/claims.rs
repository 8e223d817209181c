//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::MoneyError;
use domain_claims::{Claim, HOURS_DECIMAL_PLACES, MAX_HOURLY_RATE, MAX_HOURS_WORKED};

/// Text fields of the multipart claim submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClaimForm {
    #[validate(custom(function = "validate_hours"))]
    pub hours_worked: Decimal,
    #[validate(custom(function = "validate_rate"))]
    pub hourly_rate: Decimal,
    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes: Option<String>,
}

fn validate_hours(hours: &Decimal) -> Result<(), ValidationError> {
    if *hours < Decimal::new(5, 1) || *hours > Decimal::from(MAX_HOURS_WORKED) {
        return Err(ValidationError::new("range").with_message(
            format!("Hours worked must be between 0.5 and {}", MAX_HOURS_WORKED).into(),
        ));
    }
    if hours.normalize().scale() > HOURS_DECIMAL_PLACES {
        return Err(ValidationError::new("precision").with_message(
            format!(
                "Hours worked must have at most {} decimal places",
                HOURS_DECIMAL_PLACES
            )
            .into(),
        ));
    }
    Ok(())
}

fn validate_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate <= Decimal::ZERO || *rate > Decimal::from(MAX_HOURLY_RATE) {
        return Err(ValidationError::new("range").with_message(
            format!("Hourly rate must be greater than 0 and at most {}", MAX_HOURLY_RATE).into(),
        ));
    }
    Ok(())
}

/// A claim as returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub claim_number: String,
    pub lecturer_id: String,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub currency: String,
    pub total_payment: Decimal,
    pub notes: Option<String>,
    pub document_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Claim> for ClaimResponse {
    type Error = MoneyError;

    fn try_from(claim: Claim) -> Result<Self, Self::Error> {
        let total = claim.total_payment()?;
        let mut total_payment = total.amount();
        total_payment.rescale(total.currency().decimal_places());
        Ok(Self {
            id: claim.id.value(),
            claim_number: claim.id.to_string(),
            lecturer_id: claim.lecturer_id.to_string(),
            lecturer_name: claim.lecturer_name,
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate.amount(),
            currency: claim.hourly_rate.currency().code().to_string(),
            total_payment,
            notes: claim.notes,
            document_name: claim.document_name,
            status: claim.status.to_string(),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        })
    }
}

/// Body of a 303 redirect, carrying the flash message
#[derive(Debug, Serialize, Deserialize)]
pub struct FlashResponse {
    pub redirect_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FlashResponse {
    pub fn success(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
            success_message: Some(message.into()),
            error_message: None,
        }
    }

    pub fn error(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
            success_message: None,
            error_message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn form(hours: Decimal, rate: Decimal) -> ClaimForm {
        ClaimForm {
            hours_worked: hours,
            hourly_rate: rate,
            notes: None,
        }
    }

    #[test]
    fn test_hours_bounds() {
        assert!(form(dec!(0.5), dec!(500)).validate().is_ok());
        assert!(form(dec!(744), dec!(500)).validate().is_ok());
        assert!(form(dec!(0.4), dec!(500)).validate().is_err());
        assert!(form(dec!(745), dec!(500)).validate().is_err());
    }

    #[test]
    fn test_hours_precision() {
        assert!(form(dec!(7.25), dec!(500)).validate().is_ok());
        assert!(form(dec!(7.250), dec!(500)).validate().is_ok());
        let errors = form(dec!(7.125), dec!(500)).validate().unwrap_err();
        assert!(errors.to_string().contains("at most 2 decimal places"));
    }

    #[test]
    fn test_rate_bounds() {
        assert!(form(dec!(10), dec!(0)).validate().is_err());
        assert!(form(dec!(10), dec!(100000)).validate().is_ok());
        assert!(form(dec!(10), dec!(100000.01)).validate().is_err());
    }

    #[test]
    fn test_notes_length() {
        let mut long = form(dec!(10), dec!(500));
        long.notes = Some("x".repeat(1001));
        assert!(long.validate().is_err());
    }

    proptest! {
        #[test]
        fn half_hour_steps_within_a_month_are_valid(halves in 1i64..=1488, cents in 1i64..=10_000_000) {
            let hours = Decimal::new(halves * 5, 1);
            let rate = Decimal::new(cents, 2);
            prop_assert!(form(hours, rate).validate().is_ok());
        }
    }

    #[test]
    fn test_response_formats_total_with_currency_places() {
        use core_kernel::{ClaimId, Currency, Money, UserId};
        use domain_claims::{ClaimStatus, NewClaimRecord};

        let claim = NewClaimRecord {
            lecturer_id: UserId::from("user123"),
            lecturer_name: "John Doe".to_string(),
            hours_worked: dec!(10),
            hourly_rate: Money::new(dec!(500), Currency::ZAR),
            notes: None,
            document_ref: "claims/user123/doc.pdf".to_string(),
            document_name: "doc.pdf".to_string(),
            status: ClaimStatus::PendingReview,
            created_at: Utc::now(),
        }
        .into_claim(ClaimId::new(5));

        let overflowing = Claim {
            hours_worked: Decimal::MAX,
            ..claim.clone()
        };
        let response = ClaimResponse::try_from(claim).unwrap();

        assert_eq!(response.claim_number, "CLM-5");
        assert_eq!(response.total_payment.to_string(), "5000.00");
        assert!(matches!(
            ClaimResponse::try_from(overflowing),
            Err(MoneyError::Overflow { .. })
        ));
    }

    #[test]
    fn test_flash_skips_empty_messages() {
        let json = serde_json::to_value(FlashResponse::error("/", "Claim not found")).unwrap();
        assert_eq!(json["error_message"], "Claim not found");
        assert!(json.get("success_message").is_none());
    }
}

//! Checkout form input and validation.

use core::fmt;
use core::str::FromStr;

use serde::Deserialize;

use food_delivery_core::Email;

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Credit,
    Debit,
    Pix,
}

impl PaymentMethod {
    /// All methods in display order.
    pub const ALL: [Self; 3] = [Self::Credit, Self::Debit, Self::Pix];

    /// Form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Pix => "pix",
        }
    }

    /// Label shown next to the radio button.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Credit => "Cartão de Crédito",
            Self::Debit => "Cartão de Débito",
            Self::Pix => "Pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown payment method value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method {0:?}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// Raw checkout form submission. Every field is kept as typed so the form
/// can be shown again after a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub payment_method: String,
}

/// A validated delivery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryDetails {
    pub name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// A blank form with the default payment method selected.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            payment_method: PaymentMethod::default().as_str().to_string(),
            ..Self::default()
        }
    }

    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns every problem found, as messages ready to show the customer.
    pub fn validate(&self) -> Result<DeliveryDetails, Vec<String>> {
        let mut errors = Vec::new();

        let required = [
            (&self.name, "Informe seu nome completo."),
            (&self.address, "Informe o endereço de entrega."),
            (&self.city, "Informe a cidade."),
            (&self.zip_code, "Informe o CEP."),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                errors.push(message.to_string());
            }
        }

        let email = Email::parse(&self.email)
            .map_err(|e| errors.push(format!("E-mail inválido: {e}.")))
            .ok();
        let payment_method = self
            .payment_method
            .parse::<PaymentMethod>()
            .map_err(|_| errors.push("Escolha um método de pagamento.".to_string()))
            .ok();

        match (email, payment_method) {
            (Some(email), Some(payment_method)) if errors.is_empty() => Ok(DeliveryDetails {
                name: self.name.trim().to_string(),
                email,
                address: self.address.trim().to_string(),
                city: self.city.trim().to_string(),
                zip_code: self.zip_code.trim().to_string(),
                payment_method,
            }),
            _ => Err(errors),
        }
    }
}

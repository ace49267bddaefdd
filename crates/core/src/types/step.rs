//! Checkout step enum.

use serde::{Deserialize, Serialize};

/// A stage of the checkout drawer.
///
/// The order of the variants is the order a shopper moves through them:
/// `Cart -> Info -> Shipping -> Review -> Success`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Reviewing cart lines and quantities.
    #[default]
    Cart,
    /// Entering contact information.
    Info,
    /// Entering the shipping address and picking a shipping method.
    Shipping,
    /// Reviewing the order before payment.
    Review,
    /// Order placed.
    Success,
}

impl CheckoutStep {
    /// All steps in order.
    pub const ALL: [Self; 5] = [
        Self::Cart,
        Self::Info,
        Self::Shipping,
        Self::Review,
        Self::Success,
    ];

    /// Zero-based position in the flow.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Cart => 0,
            Self::Info => 1,
            Self::Shipping => 2,
            Self::Review => 3,
            Self::Success => 4,
        }
    }

    /// The step a forward transition leads to, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Cart => Some(Self::Info),
            Self::Info => Some(Self::Shipping),
            Self::Shipping => Some(Self::Review),
            Self::Review => Some(Self::Success),
            Self::Success => None,
        }
    }

    /// Returns `true` if `self` comes strictly before `other` in the flow.
    #[must_use]
    pub const fn is_before(self, other: Self) -> bool {
        self.index() < other.index()
    }

    /// Returns `true` for the form steps that offer "Edit" links backwards.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Info | Self::Shipping | Self::Review)
    }

    /// Snake-case name used in logs and serialized state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Info => "info",
            Self::Shipping => "shipping",
            Self::Review => "review",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckoutStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(Self::Cart),
            "info" => Ok(Self::Info),
            "shipping" => Ok(Self::Shipping),
            "review" => Ok(Self::Review),
            "success" => Ok(Self::Success),
            _ => Err(format!("invalid checkout step: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_the_flow() {
        let mut step = CheckoutStep::Cart;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, CheckoutStep::ALL.to_vec());
    }

    #[test]
    fn test_ordering_matches_index() {
        for pair in CheckoutStep::ALL.windows(2) {
            if let [a, b] = pair {
                assert!(a.is_before(*b));
                assert!(a < b);
                assert_eq!(a.index() + 1, b.index());
            }
        }
    }

    #[test]
    fn test_display_round_trips_from_str() {
        for step in CheckoutStep::ALL {
            assert_eq!(step.to_string().parse::<CheckoutStep>(), Ok(step));
        }
        assert!("payment".parse::<CheckoutStep>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&CheckoutStep::Review).ok();
        assert_eq!(json.as_deref(), Some("\"review\""));
    }

    #[test]
    fn test_editable_steps() {
        assert!(!CheckoutStep::Cart.is_editable());
        assert!(CheckoutStep::Info.is_editable());
        assert!(CheckoutStep::Review.is_editable());
        assert!(!CheckoutStep::Success.is_editable());
    }
}

use serde::Serialize;

/// Where the landing page can send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Citizen,
    Delivery,
}

impl Destination {
    pub fn title(self) -> &'static str {
        match self {
            Destination::Citizen => "Citizen Prediction",
            Destination::Delivery => "Delivery Prediction",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Destination::Citizen => "Find the best time to travel between two junctions",
            Destination::Delivery => "Plan delivery routes around predicted traffic",
        }
    }

    /// Subcommand that opens the page.
    pub fn command(self) -> &'static str {
        match self {
            Destination::Citizen => "citizen",
            Destination::Delivery => "delivery",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LandingPage;

impl LandingPage {
    pub const TITLE: &'static str = "Smart Traffic Prediction";

    pub fn destinations(&self) -> [Destination; 2] {
        [Destination::Citizen, Destination::Delivery]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_both_pages() {
        let commands: Vec<_> = LandingPage
            .destinations()
            .iter()
            .map(|d| d.command())
            .collect();
        assert_eq!(commands, vec!["citizen", "delivery"]);
    }
}

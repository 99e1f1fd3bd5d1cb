use lectern_kernel::settings::ReservationSettings;
use serde::Serialize;

/// Conditions shown beside the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservationTerms {
    pub hold_days: u32,
    pub loan_days: u32,
}

impl ReservationTerms {
    pub fn from_settings(settings: &ReservationSettings) -> Self {
        Self {
            hold_days: settings.hold_days,
            loan_days: settings.loan_days,
        }
    }

    /// The terms as displayed, one line each.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("The book will be held for you for {} days", self.hold_days),
            "A notice will be sent to the email you provided when the book is ready".to_string(),
            format!("The loan period is {} days", self.loan_days),
            "Bring your library card when collecting the book".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terms_match_desk_policy() {
        let terms = ReservationTerms::from_settings(&ReservationSettings::default());
        assert_eq!(
            terms.lines(),
            vec![
                "The book will be held for you for 3 days",
                "A notice will be sent to the email you provided when the book is ready",
                "The loan period is 14 days",
                "Bring your library card when collecting the book",
            ]
        );
    }

    #[test]
    fn terms_follow_configured_periods() {
        let settings = ReservationSettings {
            hold_days: 5,
            loan_days: 21,
            ..ReservationSettings::default()
        };
        let lines = ReservationTerms::from_settings(&settings).lines();
        assert_eq!(lines[0], "The book will be held for you for 5 days");
        assert_eq!(lines[2], "The loan period is 21 days");
    }
}
